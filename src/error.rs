//! Error types for cardbox.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in the deck engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied data has the wrong shape, length, range or order.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required value was not supplied.
    #[error("missing value: {0}")]
    NullInput(&'static str),

    #[error("invalid review date {value:?}: expected e.g. \"October 4, 2024\"")]
    DateFormat { value: String },

    #[error("invalid review interval {value:?}: {reason}")]
    IntervalFormat { value: String, reason: String },

    #[error("malformed database: {0}")]
    DatabaseFormat(String),

    #[error("cannot read {path:?}")]
    DatabaseRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write to {path:?}")]
    DatabaseWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse classification of an [`Error`], useful for matching in callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NullInput,
    DateFormat,
    IntervalFormat,
    DatabaseFormat,
    DatabaseRead,
    DatabaseWrite,
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NullInput(_) => ErrorKind::NullInput,
            Self::DateFormat { .. } => ErrorKind::DateFormat,
            Self::IntervalFormat { .. } => ErrorKind::IntervalFormat,
            Self::DatabaseFormat(_) => ErrorKind::DatabaseFormat,
            Self::DatabaseRead { .. } => ErrorKind::DatabaseRead,
            Self::DatabaseWrite { .. } => ErrorKind::DatabaseWrite,
        }
    }

    /// Format errors in a single card are recoverable: the enclosing edit is
    /// dropped and the rest of the deck stays intact.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::DateFormat | ErrorKind::IntervalFormat)
    }
}
