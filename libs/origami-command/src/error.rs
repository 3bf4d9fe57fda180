//! # Command Errors
//!
//! Error types for the command stream. All of these are recoverable by
//! design: the interpreter logs the diagnostic and drops the remainder of
//! the queued batch, never panics and never aborts the session.

use thiserror::Error;

/// Errors raised while parsing or executing the command stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Token is not a known command keyword.
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// A numeric argument failed to parse.
    #[error("Expected a number for {context}, got '{token}'")]
    BadNumber { context: &'static str, token: String },

    /// The command ended before a required argument.
    #[error("Missing {0} argument")]
    MissingArgument(&'static str),

    /// An index argument does not reference an existing point, segment or
    /// face. Defined here as a recoverable error rather than inherited
    /// undefined behavior.
    #[error("No {kind} {index} (model has {len})")]
    InvalidReference {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

impl CommandError {
    /// Creates a bad number error.
    pub fn bad_number(context: &'static str, token: impl Into<String>) -> Self {
        Self::BadNumber {
            context,
            token: token.into(),
        }
    }

    /// Creates an invalid reference error.
    pub fn invalid_reference(kind: &'static str, index: usize, len: usize) -> Self {
        Self::InvalidReference { kind, index, len }
    }
}
