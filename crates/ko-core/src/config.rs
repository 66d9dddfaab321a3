//! Configuration loading and management
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: ~/.config/ko/config.toml
//! 3. Environment variables: `KO_*`
//!
//! # Example Config
//!
//! ```toml
//! catch_all = "ko.kts"
//! script_extensions = [".kts", ".kt"]
//! scope_depth = 100
//! process_timeout_secs = 3600
//! ```

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Settings governing script discovery and external tool execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Filename of the fallback script consulted when no command matches.
    /// Excluded from per-directory command discovery.
    pub catch_all: String,
    /// Extension recognized when indexing commands in a directory.
    pub command_extension: String,
    /// Extensions recognized when collecting scripts for upgrades.
    pub script_extensions: Vec<String>,
    /// Maximum traversal depth for scoped script searches.
    pub scope_depth: usize,
    /// Timeout for external tool invocations, in seconds.
    pub process_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catch_all: "ko.kts".to_string(),
            command_extension: ".kts".to_string(),
            script_extensions: vec![".kts".to_string(), ".kt".to_string()],
            scope_depth: 100,
            process_timeout_secs: 3600,
        }
    }
}

impl Config {
    /// Load configuration from defaults, the global config file, and
    /// environment variable overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::global_path() {
            if path.is_file() {
                let contents = std::fs::read_to_string(&path)?;
                let file_config: Self = toml::from_str(&contents)?;
                config.merge(file_config);
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    /// Path of the global config file, if a home directory can be determined.
    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "ko")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// The external tool timeout as a [`Duration`].
    #[must_use]
    pub const fn process_timeout(&self) -> Duration {
        Duration::from_secs(self.process_timeout_secs)
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// Fields still holding their built-in default are left alone so a
    /// partial config file only overrides what it names.
    fn merge(&mut self, other: Self) {
        let defaults = Self::default();
        if other.catch_all != defaults.catch_all {
            self.catch_all = other.catch_all;
        }
        if other.command_extension != defaults.command_extension {
            self.command_extension = other.command_extension;
        }
        if other.script_extensions != defaults.script_extensions {
            self.script_extensions = other.script_extensions;
        }
        if other.scope_depth != defaults.scope_depth {
            self.scope_depth = other.scope_depth;
        }
        if other.process_timeout_secs != defaults.process_timeout_secs {
            self.process_timeout_secs = other.process_timeout_secs;
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("KO_CATCH_ALL") {
            if !value.is_empty() {
                self.catch_all = value;
            }
        }

        if let Ok(value) = std::env::var("KO_SCOPE_DEPTH") {
            if let Ok(depth) = value.parse() {
                self.scope_depth = depth;
            }
        }

        if let Ok(value) = std::env::var("KO_PROCESS_TIMEOUT_SECS") {
            if let Ok(secs) = value.parse() {
                self.process_timeout_secs = secs;
            }
        }
    }
}
