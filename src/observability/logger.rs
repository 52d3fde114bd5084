//! Synchronous line logger
//!
//! - Explicit severity levels
//! - One log line = one event
//! - Synchronous, no buffering

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info = 0,
    /// Recoverable issues
    Warn = 1,
    /// Operation failures
    Error = 2,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A logger that writes severity-tagged lines
pub struct Logger;

impl Logger {
    /// Log a line to stdout
    pub fn log(severity: Severity, line: &str) {
        Self::log_to_writer(severity, line, &mut io::stdout());
    }

    /// Log a line to stderr (for errors)
    pub fn log_stderr(severity: Severity, line: &str) {
        Self::log_to_writer(severity, line, &mut io::stderr());
    }

    fn log_to_writer<W: Write>(severity: Severity, line: &str, writer: &mut W) {
        // One write, flushed: lines from concurrent requests stay whole
        let _ = writeln!(writer, "[{severity}] {line}");
        let _ = writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_severity_strings() {
        assert_eq!(Severity::Info.as_str(), "INFO");
        assert_eq!(Severity::Warn.as_str(), "WARN");
        assert_eq!(Severity::Error.as_str(), "ERROR");
    }

    #[test]
    fn test_log_line_format() {
        let mut buf = Vec::new();
        Logger::log_to_writer(Severity::Error, "Error! {\"errorCode\":500}", &mut buf);
        let line = String::from_utf8(buf).unwrap();
        assert_eq!(line, "[ERROR] Error! {\"errorCode\":500}\n");
    }
}
