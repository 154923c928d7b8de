// Contact API Module

pub mod contacts;
pub mod dto;
pub mod types;


pub use contacts::ContactsApi;
pub use types::{Contact, ContactList, ListFilters, ListMeta, ListParams};
