//! Domain types for the AirMatrix supervisor.
//!
//! Records that cross the control API (`Config`, `Status`, `ActionResult`)
//! are always fully populated before serialization; partial data from the
//! outside world arrives through the `*Patch` types and is merged onto
//! defaults, never exposed directly.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_AIRPLAY_NAME: &str = "FPP AirPlay Matrix";
pub const DEFAULT_MODEL_NAME: &str = "Matrix";
pub const DEFAULT_FPS: u32 = 20;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Persisted plugin configuration. One instance per installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub enabled: bool,
    pub airplay_name: String,
    pub model_name: String,
    /// Output frames per second; the bridge daemon clamps to [5,60] itself.
    pub fps: u32,
    pub flip_x: bool,
    pub flip_y: bool,
    pub uxplay_extra_args: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            airplay_name: DEFAULT_AIRPLAY_NAME.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            fps: DEFAULT_FPS,
            flip_x: false,
            flip_y: false,
            uxplay_extra_args: String::new(),
        }
    }
}

impl Config {
    /// Defaults with `patch` fields layered on top. Fields absent from the
    /// patch keep their default value.
    pub fn merged(patch: ConfigPatch) -> Self {
        let mut config = Self::default();
        config.apply(patch);
        config
    }

    /// Layer a partial update onto this config. Only present fields transfer.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(airplay_name) = patch.airplay_name {
            self.airplay_name = airplay_name;
        }
        if let Some(model_name) = patch.model_name {
            self.model_name = model_name;
        }
        if let Some(fps) = patch.fps {
            self.fps = fps;
        }
        if let Some(flip_x) = patch.flip_x {
            self.flip_x = flip_x;
        }
        if let Some(flip_y) = patch.flip_y {
            self.flip_y = flip_y;
        }
        if let Some(uxplay_extra_args) = patch.uxplay_extra_args {
            self.uxplay_extra_args = uxplay_extra_args;
        }
    }

    /// Trim string fields and restore defaults for empty required names.
    pub fn normalized(mut self) -> Self {
        self.airplay_name = self.airplay_name.trim().to_string();
        if self.airplay_name.is_empty() {
            self.airplay_name = DEFAULT_AIRPLAY_NAME.to_string();
        }
        self.model_name = self.model_name.trim().to_string();
        if self.model_name.is_empty() {
            self.model_name = DEFAULT_MODEL_NAME.to_string();
        }
        self.uxplay_extra_args = self.uxplay_extra_args.trim().to_string();
        self
    }
}

/// Typed partial update over the fixed [`Config`] shape.
///
/// Unrecognized keys in the source document are dropped on deserialization;
/// a present-but-wrong-typed field fails the whole document, in which case
/// callers fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigPatch {
    pub enabled: Option<bool>,
    pub airplay_name: Option<String>,
    pub model_name: Option<String>,
    pub fps: Option<u32>,
    pub flip_x: Option<bool>,
    pub flip_y: Option<bool>,
    pub uxplay_extra_args: Option<String>,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Live daemon status, computed per request and never persisted.
///
/// `pid` serializes as JSON `null` when unknown, so the record is always
/// complete on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub running: bool,
    pub pid: Option<u32>,
    pub airplay_name: String,
    pub model_name: String,
    pub message: String,
}

impl Status {
    /// Baseline record before any manager output is consulted: not running,
    /// no pid, names taken from the current config.
    pub fn seeded(config: &Config) -> Self {
        Self {
            running: false,
            pid: None,
            airplay_name: config.airplay_name.clone(),
            model_name: config.model_name.clone(),
            message: String::new(),
        }
    }

    /// Shallow-merge manager-reported fields; reported fields win.
    pub fn apply(&mut self, patch: StatusPatch) {
        if let Some(running) = patch.running {
            self.running = running;
        }
        if let Some(pid) = patch.pid {
            self.pid = Some(pid);
        }
        if let Some(airplay_name) = patch.airplay_name {
            self.airplay_name = airplay_name;
        }
        if let Some(model_name) = patch.model_name {
            self.model_name = model_name;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
    }
}

/// Subset of [`Status`] a manager `status-json` reply may carry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusPatch {
    pub running: Option<bool>,
    pub pid: Option<u32>,
    pub airplay_name: Option<String>,
    pub model_name: Option<String>,
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Lifecycle actions
// ---------------------------------------------------------------------------

/// The three daemon lifecycle actions. Fixed 1:1 mapping of manager
/// argument to human verb; no other actions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleAction {
    Start,
    Stop,
    Restart,
}

impl LifecycleAction {
    /// Positional argument passed to the manager script.
    pub fn arg(self) -> &'static str {
        match self {
            LifecycleAction::Start => "start",
            LifecycleAction::Stop => "stop",
            LifecycleAction::Restart => "restart",
        }
    }

    /// Human label used in `ActionResult` and synthesized messages.
    pub fn verb(self) -> &'static str {
        match self {
            LifecycleAction::Start => "Start",
            LifecycleAction::Stop => "Stop",
            LifecycleAction::Restart => "Restart",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.arg())
    }
}

/// Outcome of one lifecycle action dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub ok: bool,
    pub action: String,
    pub message: String,
    pub rc: i32,
}

// ---------------------------------------------------------------------------
// Observed daemon state
// ---------------------------------------------------------------------------

/// Daemon state as observed through polls. `Unknown` covers the window
/// between issuing an action and the next confirming poll, and the time
/// before the first poll completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaemonState {
    Stopped,
    Running,
    #[default]
    Unknown,
}

impl DaemonState {
    /// Transition driven purely by a poll result, never by assuming an
    /// action succeeded.
    pub fn from_poll(status: &Status) -> Self {
        if status.running {
            DaemonState::Running
        } else {
            DaemonState::Stopped
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DaemonState::Stopped => "Stopped",
            DaemonState::Running => "Running",
            DaemonState::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DaemonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
