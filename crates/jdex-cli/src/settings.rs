//! Command-line settings
//!
//! Flags override `JDEX_*` environment variables, which override the
//! configuration file.

use anyhow::Context;
use clap::ArgMatches;
use jdex_store::{ConfigLayer, StoreConfig};
use std::path::PathBuf;

/// Settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Resolved store configuration
    pub store: StoreConfig,
    /// Fail instead of prompting
    pub non_interactive: bool,
}

impl Settings {
    /// Resolve settings from parsed arguments and the process environment
    ///
    /// # Errors
    /// If an explicitly given configuration file is missing or any
    /// configuration file is invalid.
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let flags = ConfigLayer {
            store: matches.get_one::<PathBuf>("store").cloned(),
            editor: matches.get_one::<String>("editor").cloned(),
        };
        let env = ConfigLayer::from_env(|key| std::env::var(key).ok());
        let file = load_config_file(matches.get_one::<PathBuf>("config"))?;

        Ok(Self {
            store: flags.or(env).or(file).resolve(),
            non_interactive: matches.get_flag("non-interactive"),
        })
    }
}

fn load_config_file(explicit: Option<&PathBuf>) -> anyhow::Result<ConfigLayer> {
    if let Some(path) = explicit {
        anyhow::ensure!(
            path.is_file(),
            "configuration file {} does not exist",
            path.display()
        );
        return Ok(ConfigLayer::load(path)?);
    }

    match ConfigLayer::default_path() {
        Some(path) => ConfigLayer::load(&path)
            .with_context(|| format!("failed to load {}", path.display())),
        None => Ok(ConfigLayer::default()),
    }
}
