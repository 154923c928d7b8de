// HTTP Error Classification
// "Every possible failure maps to exactly one kind"

use std::sync::Arc;

use tracing::debug;

use crate::http::connectivity::ConnectivityProbe;
use crate::http::failure::{ApiFailure, TransportFailure};
use crate::http::hooks::StatusHooks;

/// Converts transport failures into [`ApiFailure`] values.
///
/// This is the terminal step of request error handling: it never fails, and
/// callers above it treat the result as data rather than as an exception.
/// Classification is pure aside from the connectivity probe (one bounded
/// outbound request on the network-error branch) and the status hooks.
pub struct ErrorClassifier {
    probe: Arc<dyn ConnectivityProbe>,
    hooks: StatusHooks,
}

impl ErrorClassifier {
    pub fn new(probe: Arc<dyn ConnectivityProbe>, hooks: StatusHooks) -> Self {
        Self { probe, hooks }
    }

    /// Classify a captured failure.
    ///
    /// The branch order is fixed and evaluated sequentially; the variant
    /// priority was already resolved when the [`TransportFailure`] was built,
    /// so the match here is total with no fallthrough gaps.
    pub async fn classify(&self, failure: TransportFailure) -> ApiFailure {
        let classified = match failure {
            TransportFailure::Canceled => ApiFailure::canceled(),
            TransportFailure::Timeout { message } => {
                debug!(%message, "request timed out");
                ApiFailure::timed_out()
            }
            TransportFailure::Network { message } => {
                debug!(%message, "network error, probing connectivity");
                self.classify_network().await
            }
            TransportFailure::Http {
                status,
                body,
                message,
            } => ApiFailure::api(status, message, body),
            TransportFailure::Setup { message } => ApiFailure::setup(message),
        };

        self.hooks.dispatch(classified.status);
        classified
    }

    /// Split a generic network error into offline vs. backend-down.
    ///
    /// Probe success means the wider network works and only our backend is
    /// unreachable; probe failure or timeout means the device is offline.
    async fn classify_network(&self) -> ApiFailure {
        if !self.probe.online().await {
            return ApiFailure::no_internet();
        }
        if self.probe.reach().await {
            ApiFailure::server_unreachable()
        } else {
            ApiFailure::no_internet()
        }
    }
}
