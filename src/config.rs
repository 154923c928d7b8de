// Application Configuration
// "Defaults everywhere, overridable from file and environment"

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{RolodexError, RolodexResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the contact-directory backend
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Known-good endpoint used to separate offline from backend-down
    pub url: String,
    /// Internal probe deadline in seconds
    pub timeout_secs: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            url: "https://www.google.com/generate_204".to_string(),
            timeout_secs: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level or EnvFilter directive (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisitedSettings {
    /// Maximum number of remembered contact ids
    pub capacity: usize,
}

impl Default for VisitedSettings {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

/// Layered application settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub probe: ProbeSettings,
    pub logging: LoggingSettings,
    pub visited: VisitedSettings,
}

impl Settings {
    /// Load settings from an optional `rolodex.toml`, an explicit config
    /// file, and `ROLODEX`-prefixed environment variables, in that order.
    pub fn load(config_file: Option<&str>) -> RolodexResult<Self> {
        let mut builder =
            Config::builder().add_source(File::with_name("rolodex").required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::with_name(path));
        }

        // e.g. ROLODEX__API__BASE_URL=https://api.example.com
        builder = builder.add_source(Environment::with_prefix("rolodex").separator("__"));

        let settings: Settings = builder
            .build()
            .map_err(|e| RolodexError::configuration(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RolodexError::configuration(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> RolodexResult<()> {
        if reqwest::Url::parse(&self.api.base_url).is_err() {
            return Err(RolodexError::invalid_config_value(
                "api.base_url",
                &self.api.base_url,
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(RolodexError::invalid_config_value("api.timeout_secs", "0"));
        }
        if reqwest::Url::parse(&self.probe.url).is_err() {
            return Err(RolodexError::invalid_config_value("probe.url", &self.probe.url));
        }
        if self.probe.timeout_secs == 0 {
            return Err(RolodexError::invalid_config_value("probe.timeout_secs", "0"));
        }
        if self.visited.capacity == 0 {
            return Err(RolodexError::invalid_config_value("visited.capacity", "0"));
        }
        Ok(())
    }
}
