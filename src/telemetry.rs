//! Telemetry and observability setup
//!
//! Configures structured logging with tracing and tracing-subscriber.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Filter used when RUST_LOG is not set
///
/// Our own crate logs at `default_level`; the AWS SDK stays at warn so retry
/// and credential chatter does not drown the report.
pub fn default_directives(default_level: &str) -> String {
    format!(
        "bedrock_inventory={},aws_config=warn,aws_smithy_runtime=warn",
        default_level
    )
}

/// Initialize tracing subscriber for structured logging
///
/// This can only be called once per process. Subsequent calls are silently ignored.
///
/// Reads log level from RUST_LOG environment variable, defaulting to the
/// level specified in config (or "info" if not set).
///
/// # Examples
///
/// ```no_run
/// bedrock_inventory::telemetry::init("info");
/// tracing::info!("Inventory started");
/// ```
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(default_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("bedrock_inventory=debug"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
