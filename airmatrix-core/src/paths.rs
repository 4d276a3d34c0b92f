//! Host platform filesystem layout.
//!
//! All host-provided directories are carried in [`PlatformPaths`] and passed
//! in at construction; nothing in this workspace reads ambient global state
//! to find them.

use std::path::{Path, PathBuf};

pub const PLUGIN_NAME: &str = "fpp-AirPlayMatrix";
pub const CONFIG_FILE_NAME: &str = "plugin.fpp-AirPlayMatrix.json";
pub const MANAGER_SCRIPT_NAME: &str = "airplay_matrix_manager.sh";

/// Host directories the supervisor operates against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformPaths {
    /// Host media directory, when the host declares one.
    media_dir: Option<PathBuf>,
    /// Directory holding persisted plugin config files.
    config_dir: PathBuf,
    /// This plugin's install directory.
    plugin_dir: PathBuf,
}

impl PlatformPaths {
    pub fn new(media_dir: Option<PathBuf>, config_dir: PathBuf, plugin_dir: PathBuf) -> Self {
        Self {
            media_dir,
            config_dir,
            plugin_dir,
        }
    }

    /// Standard FPP layout rooted at a single media directory:
    /// `<media>/config` and `<media>/plugins/fpp-AirPlayMatrix`.
    pub fn from_media_dir(media_dir: impl Into<PathBuf>) -> Self {
        let media_dir = media_dir.into();
        let config_dir = media_dir.join("config");
        let plugin_dir = media_dir.join("plugins").join(PLUGIN_NAME);
        Self {
            media_dir: Some(media_dir),
            config_dir,
            plugin_dir,
        }
    }

    pub fn media_dir(&self) -> Option<&Path> {
        self.media_dir.as_deref()
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn plugin_dir(&self) -> &Path {
        &self.plugin_dir
    }

    /// `<config_dir>/plugin.fpp-AirPlayMatrix.json`
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Candidate locations for the manager script, most specific first:
    /// the media-directory install (when a media directory is declared),
    /// then the plugin-local copy.
    pub fn manager_script_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(media_dir) = &self.media_dir {
            candidates.push(
                media_dir
                    .join("plugins")
                    .join(PLUGIN_NAME)
                    .join("scripts")
                    .join(MANAGER_SCRIPT_NAME),
            );
        }
        candidates.push(self.plugin_dir.join("scripts").join(MANAGER_SCRIPT_NAME));
        candidates
    }
}
