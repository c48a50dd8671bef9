//! Johnny.Decimal index file format
//!
//! The boundary between the human-editable index file and [`Index`].
//!
//! # Format
//!
//! ```text
//! 10-19 Life Admin                  // area
//!   11 Me & Other Living Things     // category
//!     11.10 Personal Records        // entry
//!       - Location: Proton Drive    // metadata
//! /* block comments may
//!    span several lines */
//! ```
//!
//! Indentation is cosmetic. A line's meaning comes from its shape, and the
//! order of declarations: an area before its categories, a category before
//! its entries, an entry before its metadata.
//!
//! # Example
//!
//! ```rust
//! use jdex_format::{read_str, write_string};
//!
//! let index = read_str("10-19 Life Admin\n  11 Me\n    11.10 Records\n").unwrap();
//! let text = write_string(&index);
//! assert!(text.contains("    11.10 Records\n"));
//! ```
//!
//! [`Index`]: jdex_index::Index

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod error;
mod lines;
mod read;
mod write;

pub use error::{LineError, ReadError};
pub use read::{read, read_str};
pub use write::{write, write_string};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
