//! Store configuration
//!
//! Settings come in layers: command-line flags, environment variables and
//! an optional TOML file. Each layer is a [`ConfigLayer`]; layers are
//! merged with the higher-priority one winning per key, and the result is
//! completed with defaults into a [`StoreConfig`].

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the store root
pub const STORE_ENV: &str = "JDEX_STORE";

/// Environment variable naming the editor
pub const EDITOR_ENV: &str = "JDEX_EDITOR";

/// Directory created under the documents folder by default
const DEFAULT_STORE_DIR: &str = "jdex";

/// Resolved store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root directory of the store
    pub root: PathBuf,
    /// Editor override; `None` leaves the choice to the caller
    pub editor: Option<String>,
}

impl StoreConfig {
    /// Create configuration for the store at `root`
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            editor: None,
        }
    }

    /// With editor override
    #[inline]
    #[must_use]
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }

    /// Default store root: `<Documents>/jdex`, or `<Home>/jdex`
    #[must_use]
    pub fn default_root() -> PathBuf {
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_default()
            .join(DEFAULT_STORE_DIR)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::default_root())
    }
}

/// One source of settings; unset keys defer to lower layers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    /// Store root
    pub store: Option<PathBuf>,
    /// Editor command
    pub editor: Option<String>,
}

impl ConfigLayer {
    /// Read the `JDEX_STORE` and `JDEX_EDITOR` variables through `lookup`
    pub fn from_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            store: lookup(STORE_ENV).map(PathBuf::from),
            editor: lookup(EDITOR_ENV),
        }
    }

    /// Parse a TOML configuration document
    ///
    /// # Errors
    /// [`StoreError::Config`] for malformed documents or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| StoreError::Config(err.to_string()))
    }

    /// Load a TOML configuration file
    ///
    /// A missing file is an empty layer.
    ///
    /// # Errors
    /// [`StoreError::Io`] if the file exists but cannot be read,
    /// [`StoreError::Config`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!("Loading configuration from {}", path.display());
                toml::from_str(&text)
                    .map_err(|err| StoreError::Config(format!("{}: {err}", path.display())))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(StoreError::io(path, err)),
        }
    }

    /// Default configuration file, `<config dir>/jdex/config.toml`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jdex").join("config.toml"))
    }

    /// Combine with a lower-priority layer
    #[must_use]
    pub fn or(self, lower: Self) -> Self {
        Self {
            store: self.store.or(lower.store),
            editor: self.editor.or(lower.editor),
        }
    }

    /// Fill unset keys with defaults
    #[must_use]
    pub fn resolve(self) -> StoreConfig {
        StoreConfig {
            root: self.store.unwrap_or_else(StoreConfig::default_root),
            editor: self.editor,
        }
    }
}
