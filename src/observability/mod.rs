//! Observability for webcommons
//!
//! One log line = one event, synchronous, no buffering, no background
//! threads. Logging has no side effects on evaluation or error handling.

mod logger;

pub use logger::{Logger, Severity};
