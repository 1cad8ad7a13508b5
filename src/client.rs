//! Bedrock client factory
//!
//! Builds an `aws_sdk_bedrock::Client` with explicit region, endpoint,
//! timeouts and retry policy. Credentials come from the default AWS chain.

use crate::connectivity::ConnectivityCheck;
use crate::error::{AppError, AppResult};
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Region used when nothing else is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Upper bound accepted for any configured timeout
pub const MAX_TIMEOUT: Duration = Duration::from_secs(300);

/// Upper bound accepted for `max_attempts`
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// Public Bedrock control plane endpoint for `region`
pub fn default_endpoint_url(region: &str) -> String {
    format!("https://bedrock.{}.amazonaws.com", region)
}

/// Backoff mode handed to the SDK retry engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryMode {
    #[default]
    Standard,
    Adaptive,
}

impl RetryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Adaptive => "adaptive",
        }
    }
}

/// Retry policy: attempts include the initial request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub mode: RetryMode,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            mode: RetryMode::Standard,
        }
    }
}

/// Immutable client configuration
///
/// Fields are private; construct with `new()` and the `with_*` builders, then
/// `validate()` (the factory validates before building).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    region: String,
    endpoint_url: String,
    connect_timeout: Duration,
    read_timeout: Duration,
    retry: RetryPolicy,
}

impl ClientConfig {
    /// Defaults for `region`: templated endpoint, 5s connect, 10s read,
    /// 3 attempts in standard mode
    pub fn new(region: impl Into<String>) -> Self {
        let region = region.into();
        Self {
            endpoint_url: default_endpoint_url(&region),
            region,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = endpoint_url.into();
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Check the invariants the SDK relies on
    pub fn validate(&self) -> AppResult<()> {
        if self.region.trim().is_empty() {
            return Err(AppError::Config("region must not be empty".to_string()));
        }

        if !self.endpoint_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "endpoint_url '{}' must start with 'https://'",
                self.endpoint_url
            )));
        }

        for (name, timeout) in [
            ("connect timeout", self.connect_timeout),
            ("read timeout", self.read_timeout),
        ] {
            if timeout.is_zero() {
                return Err(AppError::Config(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
            if timeout > MAX_TIMEOUT {
                return Err(AppError::Config(format!(
                    "{} cannot exceed {} seconds, got {}",
                    name,
                    MAX_TIMEOUT.as_secs(),
                    timeout.as_secs()
                )));
            }
        }

        if self.retry.max_attempts == 0 || self.retry.max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(AppError::Config(format!(
                "max_attempts must be between 1 and {}, got {}",
                MAX_ATTEMPTS_LIMIT, self.retry.max_attempts
            )));
        }

        Ok(())
    }

    fn timeout_config(&self) -> TimeoutConfig {
        TimeoutConfig::builder()
            .connect_timeout(self.connect_timeout)
            .read_timeout(self.read_timeout)
            .build()
    }

    fn retry_config(&self) -> RetryConfig {
        let base = match self.retry.mode {
            RetryMode::Standard => RetryConfig::standard(),
            RetryMode::Adaptive => RetryConfig::adaptive(),
        };
        base.with_max_attempts(self.retry.max_attempts)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

/// Build a Bedrock client
///
/// Runs the connectivity check first. A public or unknown path is only a
/// warning; an invalid configuration is logged and returned.
pub async fn build_client(
    config: &ClientConfig,
    connectivity: &ConnectivityCheck<'_>,
) -> AppResult<aws_sdk_bedrock::Client> {
    if !connectivity.verify().await {
        tracing::warn!(
            hostname = %connectivity.hostname(),
            "Traffic might be flowing over public internet!"
        );
    }

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Error creating Bedrock client");
        return Err(e);
    }

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .endpoint_url(config.endpoint_url.clone())
        .timeout_config(config.timeout_config())
        .retry_config(config.retry_config())
        .load()
        .await;

    tracing::debug!(
        region = %config.region,
        endpoint_url = %config.endpoint_url,
        connect_timeout_ms = config.connect_timeout.as_millis() as u64,
        read_timeout_ms = config.read_timeout.as_millis() as u64,
        max_attempts = config.retry.max_attempts,
        retry_mode = config.retry.mode.as_str(),
        "Bedrock client configured"
    );

    Ok(aws_sdk_bedrock::Client::new(&sdk_config))
}
