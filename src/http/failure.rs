// Transport Failure Model
// "Discriminate the untyped error union once, at the boundary"

use serde_json::Value;
use thiserror::Error;

use crate::http::messages::{default_message, retry_label};

/// Closed set of failure kinds produced by classification.
///
/// The `Display` form is the stable wire name consumed by UI layers and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RequestSetupError,
    ApiError,
    NoInternet,
    ServerUnreachable,
    RequestCanceled,
    RequestTimeout,
    InvalidResponse,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RequestSetupError => "REQUEST_SETUP_ERROR",
            Self::ApiError => "API_ERROR",
            Self::NoInternet => "NO_INTERNET",
            Self::ServerUnreachable => "SERVER_UNREACHABLE",
            Self::RequestCanceled => "REQUEST_CANCELED",
            Self::RequestTimeout => "REQUEST_TIMEOUT",
            Self::InvalidResponse => "INVALID_RESPONSE",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized request failure handed to callers.
///
/// `status` is the HTTP status for [`ErrorKind::ApiError`] and 0 for every
/// kind where no HTTP response exists. `payload` carries the raw server error
/// body and is only set for API errors. Never mutated after construction.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ApiFailure {
    pub status: u16,
    pub kind: ErrorKind,
    pub message: String,
    pub payload: Option<Value>,
}

impl ApiFailure {
    fn canned(kind: ErrorKind) -> Self {
        Self {
            status: 0,
            kind,
            message: default_message(kind).to_string(),
            payload: None,
        }
    }

    /// Request was canceled by the caller before it settled
    pub fn canceled() -> Self {
        Self::canned(ErrorKind::RequestCanceled)
    }

    /// Request exceeded its transport deadline
    pub fn timed_out() -> Self {
        Self::canned(ErrorKind::RequestTimeout)
    }

    /// Device appears to be offline
    pub fn no_internet() -> Self {
        Self::canned(ErrorKind::NoInternet)
    }

    /// Device is online but the backend did not answer
    pub fn server_unreachable() -> Self {
        Self::canned(ErrorKind::ServerUnreachable)
    }

    /// A 2xx body failed shape validation
    pub fn invalid_response() -> Self {
        Self::canned(ErrorKind::InvalidResponse)
    }

    /// Failure before the request was sent, or an arbitrary thrown value
    pub fn setup(message: Option<String>) -> Self {
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => default_message(ErrorKind::RequestSetupError).to_string(),
        };
        Self {
            status: 0,
            kind: ErrorKind::RequestSetupError,
            message,
            payload: None,
        }
    }

    /// Server answered with an error status; body is passed through untouched
    pub fn api<S: Into<String>>(status: u16, message: S, body: Value) -> Self {
        let payload = if body.is_null() { None } else { Some(body) };
        Self {
            status,
            kind: ErrorKind::ApiError,
            message: message.into(),
            payload,
        }
    }

    /// Whether retrying the original request can plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::RequestTimeout
            | ErrorKind::NoInternet
            | ErrorKind::ServerUnreachable
            | ErrorKind::ApiError => true,
            ErrorKind::RequestCanceled
            | ErrorKind::RequestSetupError
            | ErrorKind::InvalidResponse => false,
        }
    }

    /// Suggested label for a retry affordance, when one makes sense
    pub fn retry_label(&self) -> Option<&'static str> {
        retry_label(self.kind)
    }
}

/// HTTP response observed on a failed request: status plus raw error body.
#[derive(Debug, Clone)]
pub struct HttpRejection {
    pub status: u16,
    pub body: Value,
}

/// Raw signals observed where a failed request is first caught.
///
/// A single failure can carry several of these at once (an aborted request
/// also reports a timeout-flavored code, for example). Converting into
/// [`TransportFailure`] resolves the ambiguity with a fixed priority.
#[derive(Debug, Default)]
pub struct FailureSignals {
    /// Cancellation-token or abort-driven marker
    pub canceled: bool,
    /// Timeout-specific transport code
    pub timed_out: bool,
    /// Connect-level failure with no HTTP response
    pub network: bool,
    /// Present when the server produced an HTTP response
    pub response: Option<HttpRejection>,
    /// Transport error message, if any
    pub message: String,
}

/// Closed tagged union of transport failure shapes.
///
/// Exactly one variant per classification branch; the five-branch priority
/// order lives in `From<FailureSignals>` so classification itself is a total
/// match with no fallthrough gaps.
#[derive(Debug)]
pub enum TransportFailure {
    Canceled,
    Timeout { message: String },
    Network { message: String },
    Http { status: u16, body: Value, message: String },
    Setup { message: Option<String> },
}

impl From<FailureSignals> for TransportFailure {
    fn from(signals: FailureSignals) -> Self {
        // Fixed priority: canceled > timeout > network > http > setup.
        if signals.canceled {
            return Self::Canceled;
        }
        if signals.timed_out || signals.message.to_lowercase().contains("timeout") {
            return Self::Timeout {
                message: signals.message,
            };
        }
        if signals.network && signals.response.is_none() {
            return Self::Network {
                message: signals.message,
            };
        }
        if let Some(rejection) = signals.response {
            return Self::Http {
                status: rejection.status,
                body: rejection.body,
                message: signals.message,
            };
        }
        Self::Setup {
            message: if signals.message.is_empty() {
                None
            } else {
                Some(signals.message)
            },
        }
    }
}

impl TransportFailure {
    /// Capture a reqwest error that carried no usable response body.
    ///
    /// Error-status responses are read manually by the client so their body
    /// survives; this path handles everything reqwest itself rejects.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        Self::from(FailureSignals {
            canceled: false,
            timed_out: err.is_timeout(),
            network: err.is_connect(),
            response: err.status().map(|status| HttpRejection {
                status: status.as_u16(),
                body: Value::Null,
            }),
            message: err.to_string(),
        })
    }

    /// Capture an error-status response whose body was read by the client.
    pub fn http(status: u16, body: Value, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            body,
            message: message.into(),
        }
    }
}
