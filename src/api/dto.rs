// Wire DTOs and Validated Parsing
// "A 2xx body that fails its shape check is its own failure kind"

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::api::types::{Contact, ContactList, ListMeta};
use crate::http::failure::ApiFailure;

/// Validate an already-received 2xx body against the expected shape.
///
/// Shape failures short-circuit to [`ApiFailure::invalid_response`] without
/// touching the transport-error classification; this is a distinct failure
/// path layered on top of a successful response.
pub fn parse_payload<T: DeserializeOwned>(value: Value) -> Result<T, ApiFailure> {
    serde_json::from_value(value).map_err(|err| {
        debug!(error = %err, "response body failed shape validation");
        ApiFailure::invalid_response()
    })
}

/// Contact record in the backend's field naming.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub gender: String,
    pub email: Option<String>,
    pub note: Option<String>,
    pub telegram: Option<String>,
    pub avatar: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "createdAt", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// Substring match operators accepted by the backend's filter language.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterItemDto {
    pub contains: Option<String>,
    #[serde(rename = "startsWith")]
    pub starts_with: Option<String>,
    #[serde(rename = "endsWith")]
    pub ends_with: Option<String>,
}

/// Echo of the filters the backend applied to this page.
/// Strict on purpose: unknown criteria keys mean the contract drifted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CriteriaDto {
    pub first_name: Option<FilterItemDto>,
    pub last_name: Option<FilterItemDto>,
    pub phone: Option<FilterItemDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageMetaDto {
    pub skipped: u64,
    pub limit: u64,
    pub total: u64,
    pub criteria: CriteriaDto,
}

/// Paginated contact-list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactListDto {
    pub meta: PageMetaDto,
    pub items: Vec<ContactDto>,
}

pub fn map_contact(dto: ContactDto) -> Contact {
    let full_name = format!("{} {}", dto.first_name, dto.last_name);
    Contact {
        id: dto.id,
        first_name: dto.first_name,
        last_name: dto.last_name,
        full_name,
        phone: dto.phone,
        gender: dto.gender,
        email: dto.email,
        note: dto.note,
        telegram: dto.telegram,
        avatar: dto.avatar,
        company: dto.company,
        address: dto.address,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
    }
}

pub fn map_contact_list(dto: ContactListDto) -> ContactList {
    let meta = map_meta(&dto.meta);
    ContactList {
        items: dto.items.into_iter().map(map_contact).collect(),
        meta,
    }
}

fn map_meta(meta: &PageMetaDto) -> ListMeta {
    let (page, total_pages) = if meta.limit == 0 {
        (1, 0)
    } else {
        (
            meta.skipped / meta.limit + 1,
            meta.total.div_ceil(meta.limit),
        )
    };
    ListMeta {
        total_count: meta.total,
        total_pages,
        page,
    }
}
