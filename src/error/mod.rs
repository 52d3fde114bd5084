//! # Error Handling Module
//!
//! The shared application error type plus the translator that turns any
//! error-shaped value into a JSON HTTP response body and status code.

pub mod config;
pub mod custom;
pub mod handler;

pub use config::ErrorHandlerConfig;
pub use custom::{CustomError, ErrorShape, INVALID_QUERY_ERROR_CODE};
pub use handler::{BufferedResponse, ErrorHandler, OutboundError, ResponseSink};
