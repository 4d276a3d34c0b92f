//! Persisted plugin configuration.
//!
//! One JSON file per installation at
//! `<config_dir>/plugin.fpp-AirPlayMatrix.json`, holding exactly the
//! [`Config`] keys. Defaults are applied at load time only and are never
//! written into the file proactively.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, ConfigError};
use crate::paths::PlatformPaths;
use crate::types::{Config, ConfigPatch};

/// Reads and writes the singleton [`Config`] on demand; holds no long-lived
/// copy of it.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(paths: &PlatformPaths) -> Self {
        Self {
            path: paths.config_file(),
        }
    }

    /// Store backed by an explicit file path. Used in tests with `TempDir`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `defaults ⊕ persisted`. Any read or parse failure is absorbed and
    /// defaults are returned; this call never fails.
    pub fn load(&self) -> Config {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %err,
                        "config file unreadable, using defaults",
                    );
                }
                return Config::default();
            }
        };

        match serde_json::from_str::<ConfigPatch>(&contents) {
            Ok(patch) => Config::merged(patch),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "config file malformed, using defaults",
                );
                Config::default()
            }
        }
    }

    /// Persist the full config, overwriting any prior content.
    ///
    /// Write flow: serialize → `.tmp` sibling → `rename`, so a failed write
    /// never leaves a truncated config behind. Does not signal the daemon;
    /// the caller owns restart signaling.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&tmp_path, json).map_err(|e| io_err(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| io_err(&self.path, e))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
