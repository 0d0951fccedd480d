//! brainscan configuration.
//!
//! Loaded from `~/.brainscan/config.toml`. Every key is optional; a missing
//! file means defaults.
//!
//! The data directory is resolved through a chain:
//!
//! 1. `--data-dir <dir>`: explicit per-command override
//! 2. `BRAINSCAN_DATA_DIR` env var
//! 3. `data-dir` in the config file
//! 4. `~/.brainscan/data`

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use serde::Deserialize;

use crate::storage;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "BRAINSCAN_DATA_DIR";

/// brainscan configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Where the state is persisted.
    pub data_dir: Option<PathBuf>,

    /// Which storage backend holds the state.
    #[serde(default)]
    pub backend: Backend,

    /// Fixed seed for the mock classifier, for reproducible runs.
    pub model_seed: Option<u64>,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// A JSON file, replaced atomically on every save.
    #[default]
    Json,

    /// A single-row key/value table in SQLite.
    Sqlite,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    /// Load config from `~/.brainscan/config.toml`.
    /// Returns defaults when there is no home directory or no file.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The config file path: `~/.brainscan/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".brainscan").join("config.toml"))
    }

    /// Resolve the data directory from the chain described in the module docs.
    pub fn data_dir(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        resolve_data_dir(
            explicit,
            env::var(DATA_DIR_ENV).ok(),
            self.data_dir.as_deref(),
            storage::default_root,
        )
    }
}

fn resolve_data_dir(
    explicit: Option<&Path>,
    from_env: Option<String>,
    configured: Option<&Path>,
    fallback: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    // 1. Explicit --data-dir flag.
    if let Some(dir) = explicit {
        return Some(dir.to_path_buf());
    }

    // 2. BRAINSCAN_DATA_DIR environment variable.
    if let Some(dir) = from_env
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }

    // 3. data-dir in config.toml.
    if let Some(dir) = configured {
        return Some(dir.to_path_buf());
    }

    // 4. ~/.brainscan/data.
    fallback()
}
