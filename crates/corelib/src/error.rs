//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A token string could not be parsed for the given partitioner.
    #[error("Invalid token '{value}' for {partitioner}: {reason}")]
    InvalidToken {
        partitioner: &'static str,
        value: String,
        reason: String,
    },
    /// Two different nodes claimed the same token in one ring snapshot.
    #[error("Token {token} is owned by both node {existing} and node {conflicting}")]
    DuplicateToken {
        token: String,
        existing: String,
        conflicting: String,
    },
    /// One node id was registered with two different name or topology labels.
    #[error("Node {id} registered as both {existing} and {conflicting}")]
    ConflictingNode {
        id: String,
        existing: String,
        conflicting: String,
    },
}

impl Error {
    pub(crate) fn invalid_token(
        partitioner: &'static str,
        value: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Error::InvalidToken {
            partitioner,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
