//! Daemon lifecycle supervisor: manager script resolution + invocation,
//! status translation, action dispatch.
//!
//! Every public operation returns a fully-formed value; failures travel in
//! `message`/`ok`/exit-code fields, never as errors. The one exception is
//! [`Supervisor::save_config`], where a failed write has no in-memory
//! default to substitute.

pub mod actions;
pub mod runner;
pub mod status;

use airmatrix_core::{
    ActionResult, Config, ConfigError, ConfigStore, LifecycleAction, PlatformPaths, Status,
};

pub use runner::{
    CommandOutcome, CommandRunner, ExecOutput, ProcessExecutor, SystemExecutor, DEFAULT_TIMEOUT,
    SPAWN_FAILURE_EXIT_CODE, STATUS_COMMAND, TIMEOUT_EXIT_CODE,
};
pub use status::NONZERO_STATUS_MESSAGE;

/// Facade bundling the config store and command runner for one installation.
pub struct Supervisor {
    store: ConfigStore,
    runner: CommandRunner,
}

impl Supervisor {
    pub fn new(paths: PlatformPaths) -> Self {
        Self {
            store: ConfigStore::new(&paths),
            runner: CommandRunner::new(paths),
        }
    }

    /// Assemble from parts; tests inject a scripted runner here.
    pub fn from_parts(store: ConfigStore, runner: CommandRunner) -> Self {
        Self { store, runner }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn runner(&self) -> &CommandRunner {
        &self.runner
    }

    /// Effective config: defaults merged with whatever is persisted.
    pub fn config(&self) -> Config {
        self.store.load()
    }

    /// Persist a full config record, normalized.
    pub fn save_config(&self, config: &Config) -> Result<Config, ConfigError> {
        let normalized = config.clone().normalized();
        self.store.save(&normalized)?;
        Ok(normalized)
    }

    /// Current daemon status; safe to call at any time, including while an
    /// action is in flight.
    pub fn status(&self) -> Status {
        status::current_status(&self.runner, &self.store.load())
    }

    /// Dispatch one lifecycle action. Callers serialize overlapping actions;
    /// this type does not queue them.
    pub fn dispatch(&self, action: LifecycleAction) -> ActionResult {
        actions::dispatch(&self.runner, action)
    }
}
