// Connectivity Probe
// "Offline and unreachable look identical until you ask a third party"

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ProbeSettings;
use crate::error::{RolodexError, RolodexResult};

/// Capability for distinguishing "no internet" from "server unreachable".
///
/// Injected into the classifier so tests can substitute deterministic fakes;
/// production wiring supplies [`HttpConnectivityProbe`].
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Quick client-side signal, analogous to a platform online flag.
    async fn online(&self) -> bool;

    /// Bounded best-effort reachability check against a known-good endpoint.
    async fn reach(&self) -> bool;
}

/// Production probe: HEAD request to a well-known endpoint, bounded to a few
/// seconds by an internal deadline that is not exposed to callers.
pub struct HttpConnectivityProbe {
    client: reqwest::Client,
    url: reqwest::Url,
    deadline: Duration,
    online_hint: Arc<AtomicBool>,
}

impl HttpConnectivityProbe {
    pub fn new(settings: &ProbeSettings) -> RolodexResult<Self> {
        let url = reqwest::Url::parse(&settings.url)
            .map_err(|_| RolodexError::invalid_config_value("probe.url", &settings.url))?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RolodexError::configuration(format!("probe client: {e}")))?;

        Ok(Self {
            client,
            url,
            deadline: Duration::from_secs(settings.timeout_secs),
            online_hint: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Handle for the embedding platform to report connectivity changes.
    pub fn online_hint(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.online_hint)
    }
}

#[async_trait]
impl ConnectivityProbe for HttpConnectivityProbe {
    async fn online(&self) -> bool {
        self.online_hint.load(Ordering::Relaxed)
    }

    async fn reach(&self) -> bool {
        let request = self.client.head(self.url.clone()).send();
        match tokio::time::timeout(self.deadline, request).await {
            // Any answer counts: an opaque or error response still proves the
            // network path works and the failure was backend-specific.
            Ok(Ok(_)) => true,
            Ok(Err(err)) => {
                debug!(error = %err, "connectivity probe failed");
                false
            }
            Err(_) => {
                debug!("connectivity probe timed out");
                false
            }
        }
    }
}
