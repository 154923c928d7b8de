// User-facing Message Table
// "The classifier picks the kind; this table owns the copy"

use crate::http::failure::ErrorKind;

/// Canned, user-facing message for each failure kind.
pub const fn default_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::RequestSetupError => "Failed to prepare request. Please try again later.",
        ErrorKind::ApiError => "An unexpected error occurred. Please try again later.",
        ErrorKind::NoInternet => "No internet connection. Please check your network and try again.",
        ErrorKind::ServerUnreachable => "Server is not responding. Please try again later.",
        ErrorKind::RequestCanceled => "Request was canceled.",
        ErrorKind::RequestTimeout => "Request timed out. Please try again.",
        ErrorKind::InvalidResponse => "Invalid response from server. Please try again later.",
    }
}

/// Fallback message for statuses with no dedicated copy.
pub fn status_message(status: u16) -> String {
    format!("Request failed with status {status}")
}

/// Suggested retry affordance label per kind.
///
/// Canceled requests were the user's own doing, so no retry is offered.
pub const fn retry_label(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::RequestCanceled => None,
        ErrorKind::RequestTimeout
        | ErrorKind::NoInternet
        | ErrorKind::ServerUnreachable
        | ErrorKind::ApiError
        | ErrorKind::InvalidResponse
        | ErrorKind::RequestSetupError => Some("Try again"),
    }
}
