//! # Error Handler
//!
//! Translates an application error into a JSON HTTP response body and
//! status code, optionally including a stack trace, and logs the outcome.
//! This is the terminal error-to-response step: it never fails, and it
//! normalizes partially-shaped errors via the config defaults.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::config::ErrorHandlerConfig;
use super::custom::ErrorShape;
use crate::observability::{Logger, Severity};

/// Outbound error body
///
/// Wire format is frozen for compatibility:
/// `{ "errorCode": <number>, "message": <string>, "stacktrace": <string|null> }`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundError {
    pub error_code: u32,
    pub message: String,
    pub stacktrace: Option<String>,
}

/// Abstraction over an HTTP response being written
pub trait ResponseSink {
    /// Sets the HTTP status code
    fn set_status(&mut self, status: StatusCode);

    /// Writes the error body as JSON
    fn send_json(&mut self, body: &OutboundError);
}

/// A [`ResponseSink`] that records the outcome and converts into an axum
/// response; also used by tests to inspect what the handler produced
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    body: Option<OutboundError>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status code recorded so far
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Body recorded so far
    pub fn body(&self) -> Option<&OutboundError> {
        self.body.as_ref()
    }
}

impl ResponseSink for BufferedResponse {
    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn send_json(&mut self, body: &OutboundError) {
        self.body = Some(body.clone());
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        let status = self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self.body {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        }
    }
}

/// Error-to-response translator
///
/// Status code mapping:
/// - no code on the error: HTTP 500, errorCode 500
/// - code below 1000: treated as the HTTP status itself
/// - code 1000 and above: application code, HTTP 400, errorCode preserved
pub struct ErrorHandler {
    config: ErrorHandlerConfig,
}

impl ErrorHandler {
    pub fn new(config: ErrorHandlerConfig) -> Self {
        Self { config }
    }

    /// Normalizes `error` into an [`OutboundError`], logs it, and writes it
    /// to the sink. Never fails.
    pub fn handle<S: ResponseSink, E: ErrorShape>(&self, rsp: &mut S, error: &E) {
        let message = error
            .message()
            .map(str::to_string)
            .or_else(|| {
                if self.config.default_error_message.is_empty() {
                    None
                } else {
                    Some(self.config.default_error_message.clone())
                }
            })
            .unwrap_or_else(|| "Internal error".to_string());

        let stacktrace = if self.config.log_stacktrace {
            error.stack().map(str::to_string)
        } else {
            None
        };

        // A code of 0 counts as unset, matching the original truthiness check
        let (status_code, error_code) = match error.status_code().filter(|c| *c != 0) {
            None => (500, 500),
            Some(code) if code < 1000 => (code, code),
            Some(code) => (400, code),
        };

        let outbound = OutboundError {
            error_code,
            message,
            stacktrace,
        };

        let serialized = serde_json::to_string(&outbound).unwrap_or_default();
        Logger::log_stderr(Severity::Error, &format!("Error! {serialized}"));

        let status =
            StatusCode::from_u16(status_code as u16).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        rsp.set_status(status);
        rsp.send_json(&outbound);
    }

    /// Convenience for axum handlers: runs [`handle`](Self::handle) against a
    /// buffered sink and converts it into a response
    pub fn response<E: ErrorShape>(&self, error: &E) -> Response {
        let mut rsp = BufferedResponse::new();
        self.handle(&mut rsp, error);
        rsp.into_response()
    }
}
