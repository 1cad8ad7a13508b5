//! Error types for bedrock-inventory
//!
//! Every failure is classified into one `AppError` variant. The connectivity
//! check collapses these into a boolean; everything else returns them as-is.

use thiserror::Error;

/// Service error codes that indicate a credential or authorization problem
const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDeniedException",
    "UnrecognizedClientException",
    "InvalidSignatureException",
    "ExpiredTokenException",
    "IncompleteSignature",
    "InvalidClientTokenId",
    "MissingAuthenticationToken",
];

/// Service error codes the SDK's standard retry mode treats as transient
const TRANSIENT_ERROR_CODES: &[&str] = &[
    "ThrottlingException",
    "ServiceUnavailableException",
    "InternalServerException",
    "RequestTimeout",
];

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file '{path}': {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in '{path}': {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {code} - {message}")]
    Auth { code: String, message: String },

    #[error("AWS error: {code} - {message}")]
    Service { code: String, message: String },

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Classify a structured service error by its machine-readable code
    ///
    /// Credential and authorization codes become `Auth`, all others `Service`.
    pub fn from_service_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let message = message.into();
        if AUTH_ERROR_CODES.contains(&code.as_str()) {
            Self::Auth { code, message }
        } else {
            Self::Service { code, message }
        }
    }

    /// The service error code, if this error came back from the service
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Auth { code, .. } | Self::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The service error message, if this error came back from the service
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Auth { message, .. } | Self::Service { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether the failure class is transient
    ///
    /// Informational only: retries are owned by the SDK client, this crate
    /// never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Service { code, .. } => TRANSIENT_ERROR_CODES.contains(&code.as_str()),
            Self::Config(_)
            | Self::ConfigFileRead { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigValidationFailed { .. }
            | Self::Auth { .. }
            | Self::Unknown(_) => false,
        }
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
