//! # Application Error Type
//!
//! `CustomError` is the error shape shared across the service layer: a
//! numeric code, a human-readable message, and an optional stack trace.
//! Codes below 1000 are HTTP statuses; codes of 1000 and above are
//! application-specific and mapped to HTTP 400 on the wire.

use thiserror::Error;

/// Error code carried by every invalid-query failure
pub const INVALID_QUERY_ERROR_CODE: u32 = 9980;

/// Application error carrying a status code, message and optional stack
///
/// All fields are optional so that partially-shaped errors can still be
/// normalized by the error handler.
#[derive(Debug, Clone, Default, Error)]
#[error("{}", .message.as_deref().unwrap_or("Internal error"))]
pub struct CustomError {
    status_code: Option<u32>,
    message: Option<String>,
    stack: Option<String>,
}

impl CustomError {
    /// Creates an error with the given code and message
    pub fn new(status_code: u32, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: Some(message.into()),
            stack: None,
        }
    }

    /// Attaches a stack trace string
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Returns the status code, if set
    pub fn status_code(&self) -> Option<u32> {
        self.status_code
    }

    /// Returns the message, if set
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the stack trace, if set
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }
}

/// Read-only view over any error-shaped value
///
/// The error handler accepts anything implementing this, so foreign error
/// types can be routed through it without converting to [`CustomError`]
/// first. All accessors default to absent.
pub trait ErrorShape {
    fn status_code(&self) -> Option<u32> {
        None
    }

    fn message(&self) -> Option<&str> {
        None
    }

    fn stack(&self) -> Option<&str> {
        None
    }
}

impl ErrorShape for CustomError {
    fn status_code(&self) -> Option<u32> {
        self.status_code
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }
}
