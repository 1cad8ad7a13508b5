//! Command-line interface for bedrock-inventory
//!
//! Provides argument parsing and subcommand handling. Running the binary with
//! no arguments performs the full check, list and report sequence.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Configuration file read when `--config` is not given, if it exists
pub const DEFAULT_CONFIG_PATH: &str = "bedrock-inventory.toml";

/// Private connectivity check and foundation model inventory for Amazon Bedrock
#[derive(Parser)]
#[command(name = "bedrock-inventory")]
#[command(version)]
#[command(about = "Private connectivity check and foundation model inventory for Amazon Bedrock")]
#[command(
    long_about = "bedrock-inventory checks whether the Bedrock endpoint resolves to a private \
    (VPC endpoint) address, then lists every ACTIVE foundation model visible to the caller's \
    account and region."
)]
pub struct Cli {
    /// Path to configuration file (defaults to ./bedrock-inventory.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured AWS region
    #[arg(short, long, global = true)]
    pub region: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# bedrock-inventory Configuration
# ===============================
#
# Every section is optional. Values shown are the built-in defaults.

# ─────────────────────────────────────────────────────────────────────────────
# SERVICE
# ─────────────────────────────────────────────────────────────────────────────

[service]
# AWS region of the Bedrock control plane
region = "us-east-1"

# Explicit endpoint URL (must use https://). Defaults to
# https://bedrock.<region>.amazonaws.com
# endpoint_url = "https://bedrock.us-east-1.amazonaws.com"

# ─────────────────────────────────────────────────────────────────────────────
# CLIENT TIMEOUTS (seconds, 1-300)
# ─────────────────────────────────────────────────────────────────────────────

[timeouts]
connect_seconds = 5
read_seconds = 10

# ─────────────────────────────────────────────────────────────────────────────
# RETRIES (handled entirely by the AWS SDK)
# ─────────────────────────────────────────────────────────────────────────────

[retry]
# Total attempts including the first request (1-10)
max_attempts = 3

# Backoff mode: "standard" or "adaptive"
mode = "standard"

# ─────────────────────────────────────────────────────────────────────────────
# PRIVATE CONNECTIVITY CHECK
# ─────────────────────────────────────────────────────────────────────────────

[connectivity]
# Hostname to resolve. Defaults to bedrock.<region>.amazonaws.com
# hostname = "bedrock.us-east-1.amazonaws.com"

# DNS lookup timeout in seconds (1-300)
resolve_timeout_seconds = 5

# Private blocks are 10.0.0.0/8, 172.16.0.0/12 and 192.0.0.0/16.
# Set to true to use 192.168.0.0/16 as the third block instead.
strict_rfc1918 = false

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
# RUST_LOG takes precedence when set.
log_level = "info"
"#
}
