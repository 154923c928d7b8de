// HTTP Client Layer
// "Raw reqwest errors stop here"

pub mod classify;
pub mod connectivity;
pub mod failure;
pub mod hooks;
pub mod messages;


use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ApiSettings;
use crate::error::{RolodexError, RolodexResult};
use crate::http::classify::ErrorClassifier;
use crate::http::failure::{ApiFailure, TransportFailure};

/// Normalized shape for successful responses.
///
/// Keeps reqwest internals (headers, extensions) out of application state.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Replace the payload, keeping status and message.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            message: self.message,
            data: f(self.data),
        }
    }
}

/// Preconfigured HTTP client for the contact-directory backend.
///
/// Every failure leaving this type has been through the classifier; callers
/// never see a raw `reqwest::Error`.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
    classifier: ErrorClassifier,
}

impl HttpClient {
    pub fn new(settings: &ApiSettings, classifier: ErrorClassifier) -> RolodexResult<Self> {
        let base_url = reqwest::Url::parse(&settings.base_url)
            .map_err(|_| RolodexError::invalid_config_value("api.base_url", &settings.base_url))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| RolodexError::configuration(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            classifier,
        })
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    /// GET a JSON document.
    ///
    /// A fired `cancel` token wins over whatever the in-flight request would
    /// have reported, including timeout-ambiguous abort codes.
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(String, String)],
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse<Value>, ApiFailure> {
        let url = match self.base_url.join(path.trim_start_matches('/')) {
            Ok(url) => url,
            Err(err) => {
                let failure = TransportFailure::Setup {
                    message: Some(format!("invalid request path {path}: {err}")),
                };
                return Err(self.classifier.classify(failure).await);
            }
        };

        debug!(%url, "GET");
        let request = self.client.get(url.clone()).query(query).send();

        let sent = match cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => {
                        return Err(self.classifier.classify(TransportFailure::Canceled).await);
                    }
                    result = request => result,
                }
            }
            None => request.await,
        };

        let response = match sent {
            Ok(response) => response,
            Err(err) => {
                let failure = TransportFailure::from_reqwest(&err);
                return Err(self.classifier.classify(failure).await);
            }
        };

        let status = response.status();
        debug!(status = status.as_u16(), %url, "response");

        if !status.is_success() {
            // Read the error body ourselves so the payload survives.
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            let message = messages::status_message(status.as_u16());
            let failure = TransportFailure::http(status.as_u16(), body, message);
            return Err(self.classifier.classify(failure).await);
        }

        let message = status.canonical_reason().unwrap_or("OK").to_string();
        let data = response
            .json::<Value>()
            .await
            // 2xx with an undecodable body is a shape problem, not transport.
            .map_err(|_| ApiFailure::invalid_response())?;

        Ok(ApiResponse {
            status: status.as_u16(),
            message,
            data,
        })
    }
}
