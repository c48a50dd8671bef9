//! Johnny.Decimal Index
//!
//! In-memory record of every area, category and entry of a system, with
//! referential integrity between the levels.
//!
//! # Example
//!
//! ```rust
//! use jdex_acid::Acid;
//! use jdex_index::{Entry, Index};
//!
//! let mut index = Index::new();
//! let id: Acid = "11.10".parse().unwrap();
//!
//! index.put_area(&id, "Life Admin").unwrap();
//! index.put_category(&id, "Me & Other Living Things").unwrap();
//! index.put_entry(Entry::new(id.clone(), "Personal Records")).unwrap();
//!
//! assert_eq!(index.area_name(&id).unwrap(), "Life Admin");
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod index;

pub use index::{Entry, Index, IndexError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
