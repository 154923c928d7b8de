// Rolodex - Contact Directory Client Library
// "A searchable contact list, a typed HTTP layer, and code warmed before you need it"

pub mod api;
pub mod common;
pub mod config;
pub mod error;
pub mod http;
pub mod prefetch;
pub mod visited;

// Re-export commonly used types
pub use api::{Contact, ContactList, ContactsApi, ListFilters, ListParams};
pub use config::Settings;
pub use error::{RolodexError, RolodexResult};
pub use http::classify::ErrorClassifier;
pub use http::connectivity::{ConnectivityProbe, HttpConnectivityProbe};
pub use http::failure::{ApiFailure, ErrorKind};
pub use http::hooks::StatusHooks;
pub use http::{ApiResponse, HttpClient};
pub use prefetch::{Prefetcher, RouteEntry, RouteTable};
pub use visited::VisitedContacts;
