//! bedrock-inventory - Private connectivity check and model inventory for Amazon Bedrock
//!
//! This library checks whether the Bedrock endpoint resolves to a private
//! (VPC endpoint) address, builds a configured SDK client, and lists the
//! foundation models whose lifecycle status is `ACTIVE`.

pub mod cli;
pub mod client;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod inventory;
pub mod report;
pub mod telemetry;
