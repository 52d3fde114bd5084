//! # Error Handler Configuration

use serde::{Deserialize, Serialize};

/// Error handler configuration
///
/// Supplied once at handler construction and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlerConfig {
    /// Message used when the handled error carries no message of its own
    /// (default: "Internal error")
    #[serde(default = "default_error_message")]
    pub default_error_message: String,

    /// Include the error's stack trace in the outbound body (default: false)
    #[serde(default)]
    pub log_stacktrace: bool,
}

fn default_error_message() -> String {
    "Internal error".to_string()
}

impl Default for ErrorHandlerConfig {
    fn default() -> Self {
        Self {
            default_error_message: default_error_message(),
            log_stacktrace: false,
        }
    }
}

impl ErrorHandlerConfig {
    pub fn new(default_error_message: impl Into<String>, log_stacktrace: bool) -> Self {
        Self {
            default_error_message: default_error_message.into(),
            log_stacktrace,
        }
    }
}
