use crate::error::{FusionError, Result};
use crate::models::DEFAULT_CLOUD_COVER_MAX;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Default analysis service location
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default transport timeout for analysis calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "satfusion.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the panel and its HTTP adapter
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub api_url: ConfigValue<String>,
    pub cloud_cover_max: ConfigValue<u8>,
    pub request_timeout_secs: ConfigValue<u64>,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            api_url: ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default),
            cloud_cover_max: ConfigValue::new(DEFAULT_CLOUD_COVER_MAX, ConfigSource::Default),
            request_timeout_secs: ConfigValue::new(
                DEFAULT_REQUEST_TIMEOUT_SECS,
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| FusionError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| FusionError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(api_url) = file_config.api_url {
            self.api_url.update(parse_api_url(&api_url)?, ConfigSource::File);
        }

        if let Some(cloud_cover_max) = file_config.cloud_cover_max {
            self.cloud_cover_max
                .update(check_cloud_cover(cloud_cover_max)?, ConfigSource::File);
        }

        if let Some(timeout) = file_config.request_timeout_secs {
            self.request_timeout_secs.update(check_timeout(timeout)?, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load the file only if it exists
    pub fn load_from_file_if_present<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            self.load_from_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // SATFUSION_API_URL
        if let Ok(url) = env::var("SATFUSION_API_URL") {
            match parse_api_url(&url) {
                Ok(url) => self.api_url.update(url, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SATFUSION_API_URL value '{}': expected an http(s) URL",
                    url
                ),
            }
        }

        // SATFUSION_CLOUD_COVER_MAX
        if let Ok(value) = env::var("SATFUSION_CLOUD_COVER_MAX") {
            match parse_cloud_cover(&value) {
                Ok(max) => self.cloud_cover_max.update(max, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SATFUSION_CLOUD_COVER_MAX value '{}': expected integer 0-100",
                    value
                ),
            }
        }

        // SATFUSION_REQUEST_TIMEOUT_SECS
        if let Ok(value) = env::var("SATFUSION_REQUEST_TIMEOUT_SECS") {
            match parse_timeout(&value) {
                Ok(secs) => self.request_timeout_secs.update(secs, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SATFUSION_REQUEST_TIMEOUT_SECS value '{}': expected positive integer",
                    value
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(api_url) = overrides.api_url {
            self.api_url.update(api_url, ConfigSource::Cli);
        }

        if let Some(cloud_cover_max) = overrides.cloud_cover_max {
            self.cloud_cover_max.update(cloud_cover_max, ConfigSource::Cli);
        }

        if let Some(timeout) = overrides.request_timeout_secs {
            match check_timeout(timeout) {
                Ok(secs) => self.request_timeout_secs.update(secs, ConfigSource::Cli),
                Err(_) => tracing::warn!("Ignoring request timeout of 0s from the command line"),
            }
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("api_url".to_string(), (self.api_url.value.clone(), self.api_url.source));

        map.insert(
            "cloud_cover_max".to_string(),
            (format!("{}%", self.cloud_cover_max.value), self.cloud_cover_max.source),
        );

        map.insert(
            "request_timeout_secs".to_string(),
            (format!("{}s", self.request_timeout_secs.value), self.request_timeout_secs.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    api_url: Option<String>,
    cloud_cover_max: Option<u8>,
    request_timeout_secs: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub api_url: Option<String>,
    pub cloud_cover_max: Option<u8>,
    pub request_timeout_secs: Option<u64>,
}

/// Validate a service base URL, stripping any trailing slash
pub fn parse_api_url(s: &str) -> Result<String> {
    let trimmed = s.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());

    if has_host {
        Ok(trimmed.to_string())
    } else {
        Err(FusionError::ConfigInvalid {
            key: "api_url".to_string(),
            reason: format!("Invalid API URL: {}. Use http://host[:port] or https://host", s),
        })
    }
}

/// Parse a cloud cover percentage from string
pub fn parse_cloud_cover(s: &str) -> Result<u8> {
    let value = s.trim().parse::<u8>().map_err(|_| FusionError::ConfigInvalid {
        key: "cloud_cover_max".to_string(),
        reason: format!("Invalid cloud cover: {}. Use an integer between 0 and 100", s),
    })?;
    check_cloud_cover(value)
}

/// Parse a request timeout in whole seconds; zero is rejected
pub fn parse_timeout(s: &str) -> Result<u64> {
    let value = s.trim().parse::<u64>().map_err(|_| FusionError::ConfigInvalid {
        key: "request_timeout_secs".to_string(),
        reason: format!("Invalid timeout: {}. Use a positive number of seconds", s),
    })?;
    check_timeout(value)
}

fn check_timeout(secs: u64) -> Result<u64> {
    if secs == 0 {
        return Err(FusionError::ConfigInvalid {
            key: "request_timeout_secs".to_string(),
            reason: "Request timeout must be at least 1 second".to_string(),
        });
    }
    Ok(secs)
}

fn check_cloud_cover(value: u8) -> Result<u8> {
    if value > 100 {
        return Err(FusionError::ConfigInvalid {
            key: "cloud_cover_max".to_string(),
            reason: format!("Cloud cover {} exceeds 100%", value),
        });
    }
    Ok(value)
}
