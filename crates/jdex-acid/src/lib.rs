//! Johnny.Decimal identifiers
//!
//! Parsing, validation and canonical rendering of AC.IDs.
//!
//! # Example
//!
//! ```rust
//! use jdex_acid::Acid;
//!
//! let id: Acid = "W01.15.14".parse().unwrap();
//! assert_eq!(id.system(), Some("W01"));
//! assert_eq!(id.category_code(), "15");
//! assert_eq!(id.area_range(), "10-19");
//! assert!(id.validate_local().is_err());
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod acid;

pub use acid::{is_acid_char, Acid, AcidError, ACID_CHARSET, SYSTEM_INDEX_ID};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
