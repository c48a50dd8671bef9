//! On-disk Johnny.Decimal store
//!
//! Maps an [`Index`](jdex_index::Index) onto a directory tree and owns the
//! index file at `00-09 System/00 Index/00.00 System Index/Index.txt`.
//!
//! # Example
//!
//! ```rust,no_run
//! use jdex_store::{Store, StoreConfig};
//!
//! let config = StoreConfig::new("/home/me/Documents/jdex");
//! let store = Store::open_or_create(&config, |_| true)?;
//! println!("{}", store.index_path().display());
//! # Ok::<(), jdex_store::StoreError>(())
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod config;
mod error;
mod naming;
mod store;

pub use config::{ConfigLayer, StoreConfig, EDITOR_ENV, STORE_ENV};
pub use error::{Result, StoreError};
pub use naming::{entry_dir_name, sanitize_file_name, ENTRY_INDEX_FILE_NAME};
pub use store::Store;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
