// Error Classifier Tests
// "Five branches, one winner, every time"

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use rolodex::http::classify::ErrorClassifier;
use rolodex::http::connectivity::ConnectivityProbe;
use rolodex::http::failure::{FailureSignals, HttpRejection, TransportFailure};
use rolodex::http::hooks::StatusHooks;
use rolodex::ErrorKind;

/// Deterministic probe that also counts how often it was consulted.
struct FakeProbe {
    online: bool,
    reachable: bool,
    reach_calls: AtomicUsize,
}

impl FakeProbe {
    fn new(online: bool, reachable: bool) -> Arc<Self> {
        Arc::new(Self {
            online,
            reachable,
            reach_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ConnectivityProbe for FakeProbe {
    async fn online(&self) -> bool {
        self.online
    }

    async fn reach(&self) -> bool {
        self.reach_calls.fetch_add(1, Ordering::SeqCst);
        self.reachable
    }
}

fn classifier(probe: Arc<FakeProbe>) -> ErrorClassifier {
    ErrorClassifier::new(probe, StatusHooks::new())
}

#[tokio::test]
async fn canceled_marker_wins_over_timeout_ambiguity() {
    // Abort-driven transport errors often carry an ECONNABORTED-style code
    // that would otherwise read as a timeout.
    let probe = FakeProbe::new(true, true);
    let failure = TransportFailure::from(FailureSignals {
        canceled: true,
        timed_out: true,
        message: "ECONNABORTED: timeout of 30000ms exceeded".to_string(),
        ..FailureSignals::default()
    });

    let result = classifier(Arc::clone(&probe)).classify(failure).await;

    assert_eq!(result.kind, ErrorKind::RequestCanceled);
    assert_eq!(result.status, 0);
    assert!(result.payload.is_none());
    // Cancellation never consults the network.
    assert_eq!(probe.reach_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn timeout_classifies_without_probing() {
    let probe = FakeProbe::new(true, true);
    let failure = TransportFailure::Timeout {
        message: "operation timed out".to_string(),
    };

    let result = classifier(Arc::clone(&probe)).classify(failure).await;

    assert_eq!(result.kind, ErrorKind::RequestTimeout);
    assert_eq!(result.status, 0);
    assert_eq!(probe.reach_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn network_error_while_offline_is_no_internet() {
    let probe = FakeProbe::new(false, true);
    let failure = TransportFailure::Network {
        message: "connection refused".to_string(),
    };

    let result = classifier(Arc::clone(&probe)).classify(failure).await;

    assert_eq!(result.kind, ErrorKind::NoInternet);
    assert_eq!(result.status, 0);
    // Offline short-circuits before the reachability request.
    assert_eq!(probe.reach_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn network_error_with_reachable_internet_is_server_unreachable() {
    let probe = FakeProbe::new(true, true);
    let failure = TransportFailure::Network {
        message: "connection refused".to_string(),
    };

    let result = classifier(probe).classify(failure).await;

    assert_eq!(result.kind, ErrorKind::ServerUnreachable);
    assert_eq!(result.status, 0);
}

#[tokio::test]
async fn network_error_with_failed_probe_is_no_internet() {
    let probe = FakeProbe::new(true, false);
    let failure = TransportFailure::Network {
        message: "connection refused".to_string(),
    };

    let result = classifier(probe).classify(failure).await;

    assert_eq!(result.kind, ErrorKind::NoInternet);
}

#[tokio::test]
async fn http_response_passes_status_and_payload_through() {
    let probe = FakeProbe::new(true, true);
    let body = json!({"message": "not found"});
    let failure = TransportFailure::from(FailureSignals {
        response: Some(HttpRejection {
            status: 404,
            body: body.clone(),
        }),
        message: "Request failed with status 404".to_string(),
        ..FailureSignals::default()
    });

    let result = classifier(Arc::clone(&probe)).classify(failure).await;

    assert_eq!(result.kind, ErrorKind::ApiError);
    assert_eq!(result.status, 404);
    assert_eq!(result.payload, Some(body));
    assert_eq!(result.message, "Request failed with status 404");
    assert_eq!(probe.reach_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn server_errors_land_in_the_same_branch_as_client_errors() {
    let probe = FakeProbe::new(true, true);
    let failure = TransportFailure::http(500, json!({"trace": "x"}), "Request failed with status 500");

    let result = classifier(probe).classify(failure).await;

    assert_eq!(result.kind, ErrorKind::ApiError);
    assert_eq!(result.status, 500);
}

#[tokio::test]
async fn setup_fallback_uses_thrown_message() {
    let probe = FakeProbe::new(true, true);
    let failure = TransportFailure::Setup {
        message: Some("builder error: invalid header".to_string()),
    };

    let result = classifier(probe).classify(failure).await;

    assert_eq!(result.kind, ErrorKind::RequestSetupError);
    assert_eq!(result.status, 0);
    assert_eq!(result.message, "builder error: invalid header");
}

#[tokio::test]
async fn setup_fallback_without_message_uses_canned_default() {
    let probe = FakeProbe::new(true, true);
    let failure = TransportFailure::Setup { message: None };

    let result = classifier(probe).classify(failure).await;

    assert_eq!(result.kind, ErrorKind::RequestSetupError);
    assert_eq!(
        result.message,
        "Failed to prepare request. Please try again later."
    );
}

#[tokio::test]
async fn status_hooks_fire_for_their_statuses_only() {
    let fired = Arc::new(AtomicUsize::new(0));
    let hooks = {
        let unauthorized = Arc::clone(&fired);
        let unavailable = Arc::clone(&fired);
        StatusHooks::new()
            .on_unauthorized(move || {
                unauthorized.fetch_add(1, Ordering::SeqCst);
            })
            .on_service_unavailable(move || {
                unavailable.fetch_add(100, Ordering::SeqCst);
            })
    };
    let classifier = ErrorClassifier::new(FakeProbe::new(true, true), hooks);

    let result = classifier
        .classify(TransportFailure::http(401, json!(null), "Request failed with status 401"))
        .await;
    assert_eq!(result.kind, ErrorKind::ApiError);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    classifier
        .classify(TransportFailure::http(503, json!(null), "Request failed with status 503"))
        .await;
    assert_eq!(fired.load(Ordering::SeqCst), 101);

    // 404 has no hook; counter unchanged.
    classifier
        .classify(TransportFailure::http(404, json!(null), "Request failed with status 404"))
        .await;
    assert_eq!(fired.load(Ordering::SeqCst), 101);
}
