//! Configuration module for tagedit
//!
//! Settings are read from `config.toml` in the user's config directory
//! (`~/.config/tagedit/config.toml` on Linux), or from a file given with
//! `--config`. A missing file means defaults; the file is never written.
//!
//! ```toml
//! editor = "nvim"
//! depth = 1
//! database = "/home/me/.local/share/tagedit/db"
//!
//! [aliases]
//! p = "project, urgent"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::aliases::AliasMap;

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TagEditConfig {
    /// Editor command, preferred over `$VISUAL` and `$EDITOR`
    #[serde(default)]
    pub editor: Option<String>,

    /// Location of the tag database
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Default enumeration depth below the root's children
    #[serde(default)]
    pub depth: usize,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Alias name -> comma-separated expansion
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

impl TagEditConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("tagedit").join("config.toml"))
    }

    /// Load from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, falling back to defaults when it does not exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Database location: the configured one, else `<data dir>/tagedit/db`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no database is configured and the system data
    /// directory cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("tagedit").join("db"))
    }

    /// The `[aliases]` table as an [`AliasMap`]
    #[must_use]
    pub fn alias_map(&self) -> AliasMap {
        AliasMap::from_config(&self.aliases)
    }
}
