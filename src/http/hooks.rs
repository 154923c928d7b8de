// Status Side-channel Hooks
// "Cross-cutting reactions to specific statuses, owned by someone else"

use std::sync::Arc;

use tracing::warn;

type Hook = Arc<dyn Fn() + Send + Sync>;

/// Optional callbacks fired after classification for statuses that typically
/// need a cross-cutting reaction (auth redirect, maintenance banner).
///
/// Hooks observe only that the condition occurred; nothing they do can alter
/// the classified result.
#[derive(Clone, Default)]
pub struct StatusHooks {
    on_unauthorized: Option<Hook>,
    on_forbidden: Option<Hook>,
    on_service_unavailable: Option<Hook>,
}

impl StatusHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn on_forbidden(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_forbidden = Some(Arc::new(hook));
        self
    }

    pub fn on_service_unavailable(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_service_unavailable = Some(Arc::new(hook));
        self
    }

    pub(crate) fn dispatch(&self, status: u16) {
        match status {
            401 => match &self.on_unauthorized {
                Some(hook) => hook(),
                None => warn!("unauthorized response"),
            },
            403 => match &self.on_forbidden {
                Some(hook) => hook(),
                None => warn!("forbidden response"),
            },
            503 => match &self.on_service_unavailable {
                Some(hook) => hook(),
                None => warn!("service unavailable response"),
            },
            _ => {}
        }
    }
}

impl std::fmt::Debug for StatusHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusHooks")
            .field("on_unauthorized", &self.on_unauthorized.is_some())
            .field("on_forbidden", &self.on_forbidden.is_some())
            .field("on_service_unavailable", &self.on_service_unavailable.is_some())
            .finish()
    }
}
