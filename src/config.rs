//! Configuration management for bedrock-inventory
//!
//! Parses TOML configuration files and provides typed access to settings.
//! Every section is optional; the defaults reproduce the built-in constants
//! (us-east-1, 5s connect, 10s read, 3 attempts in standard mode).

use crate::client::{ClientConfig, DEFAULT_REGION, RetryMode, RetryPolicy};
use crate::connectivity::{PrivateRanges, service_hostname};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Target service settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// Explicit endpoint; defaults to `https://bedrock.<region>.amazonaws.com`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
        }
    }
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

/// Client timeouts in seconds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_connect_seconds")]
    pub connect_seconds: u64,
    #[serde(default = "default_read_seconds")]
    pub read_seconds: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            connect_seconds: default_connect_seconds(),
            read_seconds: default_read_seconds(),
        }
    }
}

fn default_connect_seconds() -> u64 {
    5
}

fn default_read_seconds() -> u64 {
    10
}

/// SDK retry policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default)]
    pub mode: RetryMode,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            mode: RetryMode::default(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

/// Private connectivity check settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectivityConfig {
    /// Hostname to resolve; defaults to the service hostname for the region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default = "default_resolve_timeout")]
    pub resolve_timeout_seconds: u64,
    /// Treat 192.168.0.0/16 instead of 192.0.0.0/16 as private
    #[serde(default)]
    pub strict_rfc1918: bool,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            hostname: None,
            resolve_timeout_seconds: default_resolve_timeout(),
            strict_rfc1918: false,
        }
    }
}

fn default_resolve_timeout() -> u64 {
    5
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Log level used when neither the file nor RUST_LOG sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        // Phase 1: Read file (preserves io::Error context)
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            })?;

        // Phase 2: Parse TOML (preserves toml::de::Error context)
        let config: Self = toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
            path: path_display.clone(),
            source,
        })?;

        // Phase 3: Validate parsed config (provides contextual reason)
        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Load from `explicit` if given, else from `default_path` if it exists,
    /// else fall back to built-in defaults
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn load(explicit: Option<&Path>, default_path: &Path) -> AppResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if default_path.exists() => Self::from_file(default_path),
            None => {
                tracing::debug!(
                    path = %default_path.display(),
                    "No configuration file found, using built-in defaults"
                );
                Ok(Self::default())
            }
        }
    }

    /// Replace the configured region
    ///
    /// An explicit endpoint URL is kept as configured. When its host does not
    /// name the new region a warning is logged.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        let region = region.into();
        if let Some(url) = &self.service.endpoint_url
            && !endpoint_names_region(url, &region)
        {
            tracing::warn!(
                endpoint_url = %url,
                region = %region,
                "Configured endpoint_url {} does not match region {}; keeping it as configured",
                url,
                region
            );
        }
        self.service.region = region;
        self
    }

    /// Apply a `--region` override, if any, and validate the result
    pub fn with_region_override(self, region: Option<String>) -> AppResult<Self> {
        let Some(region) = region else {
            return Ok(self);
        };

        let config = self.with_region(region);
        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: "--region".to_string(),
                reason: e.to_string(),
            })?;
        Ok(config)
    }

    /// Client configuration derived from the service, timeout and retry sections
    pub fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::new(self.service.region.clone())
            .with_timeouts(
                Duration::from_secs(self.timeouts.connect_seconds),
                Duration::from_secs(self.timeouts.read_seconds),
            )
            .with_retry(RetryPolicy {
                max_attempts: self.retry.max_attempts,
                mode: self.retry.mode,
            });
        if let Some(url) = &self.service.endpoint_url {
            client = client.with_endpoint_url(url.clone());
        }
        client
    }

    /// Hostname the connectivity check resolves
    pub fn connectivity_hostname(&self) -> String {
        self.connectivity
            .hostname
            .clone()
            .unwrap_or_else(|| service_hostname(&self.service.region))
    }

    /// Address blocks the connectivity check treats as private
    pub fn private_ranges(&self) -> PrivateRanges {
        if self.connectivity.strict_rfc1918 {
            PrivateRanges::Rfc1918
        } else {
            PrivateRanges::Literal
        }
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.connectivity.resolve_timeout_seconds)
    }

    /// Validate configuration after parsing
    ///
    /// This is called automatically by `from_file()` and `from_str()`, but can
    /// also be called explicitly after overrides such as `with_region()`.
    pub fn validate(&self) -> AppResult<()> {
        self.client_config().validate()?;

        if let Some(hostname) = &self.connectivity.hostname
            && hostname.trim().is_empty()
        {
            return Err(AppError::Config(
                "connectivity.hostname must not be empty when set".to_string(),
            ));
        }

        let resolve = self.connectivity.resolve_timeout_seconds;
        if resolve == 0 || resolve > 300 {
            return Err(AppError::Config(format!(
                "connectivity.resolve_timeout_seconds must be between 1 and 300, got {}",
                resolve
            )));
        }

        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(AppError::Config(format!(
                "observability.log_level '{}' is not one of: {}",
                self.observability.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

/// True when one of the host labels of `url` is exactly `region`
fn endpoint_names_region(url: &str, region: &str) -> bool {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = rest.split(['/', ':']).next().unwrap_or_default();
    host.split('.').any(|label| label == region)
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        // Validate config before returning
        config.validate()?;
        Ok(config)
    }
}
