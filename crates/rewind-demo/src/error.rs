use rewind::{HistoryConfigError, HistoryError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] HistoryConfigError),

    #[error("history error: {0}")]
    History(#[from] HistoryError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("invalid script op `{op}` (expected set:<text>, record, undo, redo or revert)")]
    InvalidOp { op: String },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } | Self::InvalidOp { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
