// Contact API Operations
// "Typed calls in, classified failures out"

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tokio_util::sync::CancellationToken;

use crate::api::dto::{map_contact, map_contact_list, parse_payload, ContactDto, ContactListDto};
use crate::api::types::{clean_filter, Contact, ContactList, ListParams};
use crate::http::failure::ApiFailure;
use crate::http::{ApiResponse, HttpClient};

const CONTACTS_ENDPOINT: &str = "/passenger";

/// Typed access to the contact-directory REST backend.
pub struct ContactsApi {
    http: Arc<HttpClient>,
}

impl ContactsApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetch a single contact by id.
    pub async fn get_contact(
        &self,
        id: i64,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse<Contact>, ApiFailure> {
        let response = self
            .http
            .get_json(&format!("{CONTACTS_ENDPOINT}/{id}"), &[], cancel)
            .await?;
        let dto: ContactDto = parse_payload(response.data)?;
        Ok(ApiResponse {
            status: response.status,
            message: response.message,
            data: map_contact(dto),
        })
    }

    /// Fetch one page of contacts, optionally filtered.
    pub async fn get_contact_list(
        &self,
        params: &ListParams,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse<ContactList>, ApiFailure> {
        let query = list_query(params);
        let response = self.http.get_json(CONTACTS_ENDPOINT, &query, cancel).await?;
        let dto: ContactListDto = parse_payload(response.data)?;
        Ok(ApiResponse {
            status: response.status,
            message: response.message,
            data: map_contact_list(dto),
        })
    }
}

/// Map page/filter params to the backend's skip/limit/where query.
///
/// Empty and whitespace-only filter values are dropped before send. The
/// `where` object rides as one JSON-encoded parameter.
pub(crate) fn list_query(params: &ListParams) -> Vec<(String, String)> {
    let page = params.page.max(1);
    let skip = (page - 1) * params.limit;

    let mut query = vec![
        ("skip".to_string(), skip.to_string()),
        ("limit".to_string(), params.limit.to_string()),
    ];

    let mut where_map = Map::new();
    if let Some(v) = clean_filter(&params.filters.first_name) {
        where_map.insert("first_name".to_string(), json!({ "contains": v }));
    }
    if let Some(v) = clean_filter(&params.filters.last_name) {
        where_map.insert("last_name".to_string(), json!({ "contains": v }));
    }
    if let Some(v) = clean_filter(&params.filters.phone) {
        where_map.insert("phone".to_string(), json!({ "contains": v }));
    }
    if !where_map.is_empty() {
        query.push(("where".to_string(), Value::Object(where_map).to_string()));
    }

    query
}
