// Structured Logging Setup
// "One subscriber, configured once, at startup"

use std::str::FromStr;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;
use crate::error::{RolodexError, RolodexResult};

/// Logging output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = RolodexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(RolodexError::invalid_config_value("logging.format", s)),
        }
    }
}

/// Initialize the global tracing subscriber from settings.
///
/// Fails if a subscriber is already installed, so call it once from the
/// binary entry point; library code only ever emits through `tracing`.
pub fn init_logging(settings: &LoggingSettings) -> RolodexResult<()> {
    let filter = EnvFilter::try_new(&settings.level)
        .map_err(|_| RolodexError::invalid_config_value("logging.level", &settings.level))?;
    let format: LogFormat = settings.format.parse()?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };

    result.map_err(|e| RolodexError::logging(e.to_string()))
}
