// Contact Domain Types
// "What the UI consumes, free of wire-format noise"

use chrono::{DateTime, Utc};

/// A directory contact as consumed by the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone: String,
    pub gender: String,
    pub email: Option<String>,
    pub note: Option<String>,
    pub telegram: Option<String>,
    pub avatar: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pagination summary derived from the backend's skip/limit accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMeta {
    pub total_count: u64,
    pub total_pages: u64,
    pub page: u64,
}

/// One page of contacts plus its pagination summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactList {
    pub items: Vec<Contact>,
    pub meta: ListMeta,
}

/// Substring filters for the contact list search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// Page request for the contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u64,
    pub limit: u64,
    pub filters: ListFilters,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            filters: ListFilters::default(),
        }
    }
}

/// Trim a filter value, dropping empty and whitespace-only input.
pub(crate) fn clean_filter(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
