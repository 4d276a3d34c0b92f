//! AirMatrix core library — config model, persistence, host paths, errors.
//!
//! Public API surface:
//! - [`types`] — config/status/action records and partial-update patches
//! - [`paths`] — [`PlatformPaths`] host directory layout
//! - [`config_store`] — load / save with defaults merge
//! - [`error`] — [`ConfigError`]

pub mod config_store;
pub mod error;
pub mod paths;
pub mod types;

pub use config_store::ConfigStore;
pub use error::ConfigError;
pub use paths::PlatformPaths;
pub use types::{
    ActionResult, Config, ConfigPatch, DaemonState, LifecycleAction, Status, StatusPatch,
};
