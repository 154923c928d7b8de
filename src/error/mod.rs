// Crate-level Error Handling
// "Errors are data by the time anyone above us sees them"

use thiserror::Error;

use crate::http::failure::ApiFailure;

/// Top-level error type for configuration, wiring, and CLI failures.
///
/// Request-level failures never surface through this type directly; they are
/// classified into [`ApiFailure`] by the HTTP layer and wrapped here only when
/// a caller needs a single error channel.
#[derive(Error, Debug)]
pub enum RolodexError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidConfigValue { key: String, value: String },

    #[error("Logging setup failed: {message}")]
    Logging { message: String },

    #[error(transparent)]
    Api(#[from] ApiFailure),
}

impl RolodexError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config_value<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self::InvalidConfigValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a logging setup error
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type RolodexResult<T> = Result<T, RolodexError>;
