//! Lifecycle action dispatch.

use airmatrix_core::{ActionResult, LifecycleAction};

use crate::runner::{CommandOutcome, CommandRunner};

/// Run one lifecycle action through the manager and shape the outcome.
pub fn dispatch(runner: &CommandRunner, action: LifecycleAction) -> ActionResult {
    let outcome = runner.run(action.arg());
    from_outcome(action, &outcome)
}

/// Build the uniform result shape: captured text when the manager said
/// something, a synthesized `"<verb> complete"`/`"<verb> failed"` otherwise.
pub fn from_outcome(action: LifecycleAction, outcome: &CommandOutcome) -> ActionResult {
    let ok = outcome.ok();
    let message = if !outcome.text.is_empty() {
        outcome.text.clone()
    } else if ok {
        format!("{} complete", action.verb())
    } else {
        format!("{} failed", action.verb())
    };

    ActionResult {
        ok,
        action: action.verb().to_string(),
        message,
        rc: outcome.code,
    }
}
