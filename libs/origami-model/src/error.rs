//! # Model Errors
//!
//! Error types for the mesh model. Geometric degeneracy is deliberately not
//! an error anywhere in this crate (degenerate splits are silent no-ops);
//! errors are reserved for snapshot decoding.

use thiserror::Error;

/// Errors that can occur in the mesh model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Snapshot string failed to decode as JSON.
    #[error("Snapshot decode failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Snapshot referenced a point handle outside the decoded arena.
    #[error("Snapshot {kind} references point {index}, but only {len} points exist")]
    InvalidHandle {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

impl ModelError {
    /// Creates an invalid handle error.
    pub fn invalid_handle(kind: &'static str, index: usize, len: usize) -> Self {
        Self::InvalidHandle { kind, index, len }
    }
}
