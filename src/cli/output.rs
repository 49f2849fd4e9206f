//! Output helpers for user-facing messages
//!
//! Results go to stdout; warnings, errors and forwarded subprocess output go
//! to stderr. Diagnostics use `tracing` instead.

use std::fmt::Display;
use std::io::Write;

/// Output helper for consistent formatting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Output
    }

    /// Prints a success or status line
    pub fn success(&self, message: &str) {
        println!("{}", message);
    }

    /// Prints a warning line
    pub fn warn(&self, message: &str) {
        eprintln!("{}", message);
    }

    /// Prints an error line
    pub fn error(&self, message: &str) {
        eprintln!("{}", message);
    }

    /// Prints rendered help text
    pub fn help(&self, help: impl Display) {
        println!("{}", help);
    }

    /// Forwards captured stderr from a subprocess unchanged
    pub fn raw_err(&self, text: &str) {
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(text.as_bytes());
        let _ = stderr.flush();
    }
}
