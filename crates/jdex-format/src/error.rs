//! Error types for the index file format
//!
//! - [`LineError`]: why a single line was rejected
//! - [`ReadError`]: a [`LineError`] or stream failure, tagged with its line number
//!
//! Writing surfaces plain [`std::io::Error`]s.

use jdex_acid::AcidError;
use jdex_index::IndexError;

/// Errors raised while interpreting one line
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    /// Area range whose two area characters differ, e.g. `10-29`
    #[error("area range {0:?} must start and end in the same area")]
    AreaRangeMismatch(String),

    /// Category declared outside of its area
    #[error("category {category:?} is orphaned in {context:?}")]
    OrphanedCategory {
        /// Category code as written
        category: String,
        /// Area range in effect, or `nothing`
        context: String,
    },

    /// Entry declared outside of its category
    #[error("entry {entry:?} is orphaned in {context:?}")]
    OrphanedEntry {
        /// Entry ID as written
        entry: String,
        /// Category code in effect, or `nothing`
        context: String,
    },

    /// Metadata line not directly under an entry
    #[error("metadata can only be added to entries")]
    MetadataWithoutEntry,

    /// Line matching none of the known shapes
    #[error("unrecognized line: {0:?}")]
    UnrecognizedLine(String),

    /// Malformed identifier
    #[error("invalid ID: {0}")]
    Id(#[from] AcidError),

    /// Index rejected the declaration
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl LineError {
    /// Create orphaned category error
    pub fn orphaned_category(category: impl Into<String>, context: impl Into<String>) -> Self {
        Self::OrphanedCategory {
            category: category.into(),
            context: context.into(),
        }
    }

    /// Create orphaned entry error
    pub fn orphaned_entry(entry: impl Into<String>, context: impl Into<String>) -> Self {
        Self::OrphanedEntry {
            entry: entry.into(),
            context: context.into(),
        }
    }
}

/// Errors while reading an index file
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// A line could not be interpreted
    #[error("line {line}: {source}")]
    Line {
        /// 1-based line number
        line: usize,
        /// Why the line was rejected
        #[source]
        source: LineError,
    },

    /// The underlying stream failed, or a line is not valid UTF-8
    #[error("line {line}: failed to read index: {source}")]
    Io {
        /// 1-based number of the line being read
        line: usize,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    /// 1-based number of the offending line
    #[inline]
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::Line { line, .. } | Self::Io { line, .. } => Some(*line),
        }
    }

    /// The per-line cause, if any
    #[inline]
    #[must_use]
    pub fn line_error(&self) -> Option<&LineError> {
        match self {
            Self::Line { source, .. } => Some(source),
            Self::Io { .. } => None,
        }
    }
}
