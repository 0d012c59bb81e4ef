//! Errors reported by the wrap entry points.

use crate::config::MIN_LIMIT;

/// Errors from wrap operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapError {
    /// The column limit was below [`MIN_LIMIT`].
    InvalidLimit {
        /// The rejected limit.
        limit: usize,
    },
}

impl std::fmt::Display for WrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLimit { limit } => {
                write!(f, "limit must be at least {MIN_LIMIT}, got {limit}")
            }
        }
    }
}

impl std::error::Error for WrapError {}
