//! Manager script invocation.
//!
//! The manager script is an opaque collaborator: it is handed exactly one
//! positional argument and reports through its exit code and output. This
//! module resolves where the script lives, builds the ordered invocation
//! plan (privileged first, direct second), and executes it through a
//! replaceable [`ProcessExecutor`]. Nothing here returns an error; every
//! failure state is encoded in the returned [`CommandOutcome`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use airmatrix_core::PlatformPaths;

/// Manager argument that requests a JSON status report.
pub const STATUS_COMMAND: &str = "status-json";

/// Upper bound on a single manager spawn. A wedged script is killed and
/// reported as a failed command, never allowed to hang the caller.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Synthetic exit code reported when a spawn exceeds its timeout.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Synthetic exit code reported when the program cannot be spawned at all.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

const SUDO_CANDIDATES: [&str; 2] = ["/usr/bin/sudo", "/bin/sudo"];

// ---------------------------------------------------------------------------
// Executor seam
// ---------------------------------------------------------------------------

/// Raw result of one process spawn, before merging and trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Process execution, injected so tests can simulate escalation-available
/// and escalation-unavailable environments without spawning anything.
pub trait ProcessExecutor: Send + Sync {
    /// Run `program args…` capturing stdout and stderr, bounded by `timeout`.
    /// Must not panic; spawn failures are encoded in the returned output.
    fn run(&self, program: &Path, args: &[OsString], timeout: Duration) -> ExecOutput;
}

/// Real executor backed by `std::process::Command`.
///
/// The child is reaped with a polled `try_wait` so the timeout can fire
/// without a helper thread; on expiry the child is killed and a synthetic
/// outcome returned. Manager output is small, so captured pipes are only
/// drained after exit.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl ProcessExecutor for SystemExecutor {
    fn run(&self, program: &Path, args: &[OsString], timeout: Duration) -> ExecOutput {
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                return ExecOutput {
                    code: SPAWN_FAILURE_EXIT_CODE,
                    stdout: String::new(),
                    stderr: format!("{}: {}", program.display(), err),
                }
            }
        };

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return ExecOutput {
                            code: TIMEOUT_EXIT_CODE,
                            stdout: String::new(),
                            stderr: format!(
                                "{} timed out after {}s",
                                program.display(),
                                timeout.as_secs()
                            ),
                        };
                    }
                    std::thread::sleep(WAIT_POLL_INTERVAL);
                }
                Err(err) => {
                    let _ = child.kill();
                    return ExecOutput {
                        code: -1,
                        stdout: String::new(),
                        stderr: format!("failed waiting on {}: {}", program.display(), err),
                    };
                }
            }
        }

        match child.wait_with_output() {
            Ok(output) => ExecOutput {
                code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(err) => ExecOutput {
                code: -1,
                stdout: String::new(),
                stderr: format!("failed collecting output of {}: {}", program.display(), err),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Exit code plus merged, trailing-trimmed output of one manager run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub code: i32,
    pub text: String,
}

impl CommandOutcome {
    pub fn ok(&self) -> bool {
        self.code == 0
    }
}

impl From<ExecOutput> for CommandOutcome {
    fn from(output: ExecOutput) -> Self {
        let mut text = output.stdout;
        if !output.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&output.stderr);
        }
        Self {
            code: output.code,
            text: text.trim_end().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Invocation plan
// ---------------------------------------------------------------------------

/// One step of the ordered invocation plan.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Invocation {
    /// `sudo -n <script> <command>`; non-interactive so an escalation that
    /// would prompt fails fast instead of hanging the caller.
    fn escalated(sudo: &Path, script: &Path, command: &str) -> Self {
        Self {
            program: sudo.to_path_buf(),
            args: vec![
                OsString::from("-n"),
                script.as_os_str().to_owned(),
                OsString::from(command),
            ],
        }
    }

    /// `<script> <command>` without escalation.
    fn direct(script: &Path, command: &str) -> Self {
        Self {
            program: script.to_path_buf(),
            args: vec![OsString::from(command)],
        }
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Resolves and runs the manager script. Never raises; callers always get a
/// deterministic [`CommandOutcome`].
pub struct CommandRunner {
    paths: PlatformPaths,
    executor: Arc<dyn ProcessExecutor>,
    sudo_candidates: Vec<PathBuf>,
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(paths: PlatformPaths) -> Self {
        Self::with_executor(paths, Arc::new(SystemExecutor))
    }

    pub fn with_executor(paths: PlatformPaths, executor: Arc<dyn ProcessExecutor>) -> Self {
        Self {
            paths,
            executor,
            sudo_candidates: SUDO_CANDIDATES.iter().map(PathBuf::from).collect(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replace the escalation binary candidates. Used in tests to pin the
    /// environment to escalation-available or escalation-unavailable.
    pub fn sudo_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.sudo_candidates = candidates;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// First existing manager script candidate; if none exist, the last
    /// candidate is returned anyway so the miss surfaces downstream as a
    /// nonzero exit instead of an error here.
    pub fn script_path(&self) -> PathBuf {
        let candidates = self.paths.manager_script_candidates();
        for candidate in &candidates {
            if candidate.exists() {
                return candidate.clone();
            }
        }
        candidates
            .last()
            .cloned()
            .unwrap_or_else(|| PathBuf::from(airmatrix_core::paths::MANAGER_SCRIPT_NAME))
    }

    fn sudo_path(&self) -> Option<PathBuf> {
        self.sudo_candidates
            .iter()
            .find(|candidate| is_executable(candidate))
            .cloned()
    }

    fn invocation_plan(&self, command: &str) -> Vec<Invocation> {
        let script = self.script_path();
        let mut plan = Vec::new();
        if let Some(sudo) = self.sudo_path() {
            plan.push(Invocation::escalated(&sudo, &script, command));
        }
        plan.push(Invocation::direct(&script, command));
        plan
    }

    /// Run the manager with one positional `command` argument.
    ///
    /// Steps are attempted in plan order; the first zero-exit outcome wins,
    /// otherwise the last attempted outcome is returned.
    pub fn run(&self, command: &str) -> CommandOutcome {
        let mut last: Option<CommandOutcome> = None;

        for invocation in self.invocation_plan(command) {
            let output = self
                .executor
                .run(&invocation.program, &invocation.args, self.timeout);
            let outcome = CommandOutcome::from(output);

            if outcome.ok() {
                return outcome;
            }

            tracing::debug!(
                program = %invocation.program.display(),
                command,
                code = outcome.code,
                "manager invocation step failed",
            );
            last = Some(outcome);
        }

        // The plan always contains the direct step.
        last.unwrap_or(CommandOutcome {
            code: -1,
            text: "no invocation strategy available".to_string(),
        })
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
