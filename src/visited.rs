// Recently Visited Contacts
// "A short memory, most recent first, gone on reload"

use async_trait::async_trait;
use futures_util::future::join_all;
use std::collections::VecDeque;
use tracing::debug;

use crate::api::types::Contact;
use crate::api::ContactsApi;
use crate::http::failure::ApiFailure;

/// Anything that can resolve a contact id to a full record.
///
/// Lets the visited list be exercised without a live backend.
#[async_trait]
pub trait ContactSource: Sync {
    async fn contact(&self, id: i64) -> Result<Contact, ApiFailure>;
}

#[async_trait]
impl ContactSource for ContactsApi {
    async fn contact(&self, id: i64) -> Result<Contact, ApiFailure> {
        self.get_contact(id, None).await.map(|response| response.data)
    }
}

/// Bounded, most-recent-first list of visited contact ids.
///
/// Purely in-memory; the list resets with the process. Recording an id that
/// is already present moves it to the front instead of duplicating it.
#[derive(Debug, Clone)]
pub struct VisitedContacts {
    ids: VecDeque<i64>,
    capacity: usize,
}

impl VisitedContacts {
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, id: i64) {
        if let Some(pos) = self.ids.iter().position(|&existing| existing == id) {
            self.ids.remove(pos);
        }
        self.ids.push_front(id);
        while self.ids.len() > self.capacity {
            self.ids.pop_back();
        }
    }

    pub fn ids(&self) -> Vec<i64> {
        self.ids.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolve the visited ids to contacts, most recent first.
    ///
    /// All fetches run concurrently with all-settled semantics: ids that fail
    /// to resolve are dropped and the order of the rest is preserved.
    pub async fn resolve<S: ContactSource>(&self, source: &S) -> Vec<Contact> {
        let fetches = self.ids.iter().map(|&id| source.contact(id));
        join_all(fetches)
            .await
            .into_iter()
            .zip(self.ids.iter())
            .filter_map(|(result, id)| match result {
                Ok(contact) => Some(contact),
                Err(err) => {
                    debug!(id, error = %err, "visited contact failed to resolve");
                    None
                }
            })
            .collect()
    }
}
