//! Error types for the on-disk store

use jdex_format::ReadError;
use jdex_index::IndexError;
use std::io;
use std::path::PathBuf;

/// Errors raised by [`Store`](crate::Store) and configuration loading
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store root is missing or not a directory
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Store already has an index file
    #[error("a store already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Identifier missing from the index
    #[error("entry was not found in index: {0}")]
    EntryNotFound(#[from] IndexError),

    /// Index rejected a change
    #[error("index rejected change: {0}")]
    Rejected(#[source] IndexError),

    /// Index file could not be parsed
    #[error("failed to read index file {}: {source}", path.display())]
    Read {
        /// Index file
        path: PathBuf,
        /// Parse or stream failure
        #[source]
        source: ReadError,
    },

    /// Index file could not be written
    #[error("failed to write index file {}: {source}", path.display())]
    Write {
        /// Index file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },

    /// Filesystem operation failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being operated on
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },

    /// Configuration file is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// User declined to create a store
    #[error("cancelled by user")]
    Cancelled,
}

impl StoreError {
    /// Create I/O error tagged with its path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if error is a missing identifier
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntryNotFound(err) if err.is_not_found())
    }
}

/// Result alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
