#![forbid(unsafe_code)]

//! History error types.

use std::fmt;

use thiserror::Error;

/// Which way through history an operation was stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Stepping back through the undo sequence.
    Undo,
    /// Stepping forward through the redo sequence.
    Redo,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
        }
    }
}

/// Errors returned by history operations.
///
/// The only failure is asking for a step that does not exist. It is always
/// recoverable: the history is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The sequence for `direction` holds no snapshots.
    #[error("nothing to {direction}")]
    EmptyHistory { direction: Direction },
}

impl HistoryError {
    #[must_use]
    pub fn empty(direction: Direction) -> Self {
        Self::EmptyHistory { direction }
    }

    /// The direction of the refused step.
    #[must_use]
    pub fn direction(&self) -> Direction {
        match self {
            Self::EmptyHistory { direction } => *direction,
        }
    }
}
