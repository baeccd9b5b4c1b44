//! Core Error Types
//!
//! Errors raised by the shared types in this crate. The application crate
//! wraps them next to its own variants (Config, Io, Transport).

use thiserror::Error;

/// Core error type for the AskData workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A textual value (such as a proxy URL) could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
