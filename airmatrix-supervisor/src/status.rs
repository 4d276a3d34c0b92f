//! Status translation.
//!
//! Turns a `status-json` manager run into a fully-populated [`Status`].
//! The manager may emit a JSON object, free text, or nothing at all; every
//! shape degrades to a complete record, never to an error.

use airmatrix_core::types::StatusPatch;
use airmatrix_core::{Config, Status};

use crate::runner::{CommandOutcome, CommandRunner, STATUS_COMMAND};

/// Diagnostic used when the status command fails without saying why.
pub const NONZERO_STATUS_MESSAGE: &str = "Manager status command returned non-zero";

/// Query the manager and translate its reply against the current config.
pub fn current_status(runner: &CommandRunner, config: &Config) -> Status {
    let outcome = runner.run(STATUS_COMMAND);
    translate(config, &outcome)
}

/// Pure translation step, split out for tests.
///
/// - Output parsing as a JSON object: shallow-merge the known keys onto the
///   seeded record; parsed keys win.
/// - Non-empty output that does not parse: carried verbatim in `message`;
///   `running` stays false rather than being guessed.
/// - Nonzero exit with nothing else to say: generic diagnostic.
pub fn translate(config: &Config, outcome: &CommandOutcome) -> Status {
    let mut status = Status::seeded(config);

    if !outcome.text.is_empty() {
        match serde_json::from_str::<StatusPatch>(&outcome.text) {
            Ok(patch) => status.apply(patch),
            Err(err) => {
                tracing::debug!(error = %err, "manager status output is not JSON");
                status.message = outcome.text.clone();
            }
        }
    }

    if outcome.code != 0 && status.message.is_empty() {
        status.message = NONZERO_STATUS_MESSAGE.to_string();
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_config() -> Config {
        Config {
            airplay_name: "Porch".to_string(),
            model_name: "Roofline".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn json_reply_merges_onto_seeded_record() {
        let outcome = CommandOutcome {
            code: 0,
            text: r#"{"running": true, "pid": 1234}"#.to_string(),
        };
        let status = translate(&named_config(), &outcome);
        assert!(status.running);
        assert_eq!(status.pid, Some(1234));
        assert_eq!(status.airplay_name, "Porch");
        assert_eq!(status.model_name, "Roofline");
        assert_eq!(status.message, "");
    }

    #[test]
    fn free_text_reply_lands_in_message_verbatim() {
        let outcome = CommandOutcome {
            code: 0,
            text: "manager: waiting for avahi".to_string(),
        };
        let status = translate(&named_config(), &outcome);
        assert!(!status.running, "running is never guessed from free text");
        assert_eq!(status.message, "manager: waiting for avahi");
    }

    #[test]
    fn non_object_json_is_treated_as_free_text() {
        let outcome = CommandOutcome {
            code: 0,
            text: "[1,2,3]".to_string(),
        };
        let status = translate(&named_config(), &outcome);
        assert_eq!(status.message, "[1,2,3]");
        assert!(!status.running);
    }

    #[test]
    fn nonzero_exit_with_empty_output_gets_generic_diagnostic() {
        let outcome = CommandOutcome {
            code: 127,
            text: String::new(),
        };
        let status = translate(&named_config(), &outcome);
        assert!(!status.running);
        assert_eq!(status.pid, None);
        assert_eq!(status.message, "Manager status command returned non-zero");
        assert_eq!(status.airplay_name, "Porch");
    }

    #[test]
    fn nonzero_exit_keeps_captured_diagnostic_over_generic_one() {
        let outcome = CommandOutcome {
            code: 1,
            text: "unit airplay-matrix.service not found".to_string(),
        };
        let status = translate(&named_config(), &outcome);
        assert_eq!(status.message, "unit airplay-matrix.service not found");
    }

    #[test]
    fn reply_may_override_names() {
        let outcome = CommandOutcome {
            code: 0,
            text: r#"{"running": true, "airplay_name": "Live Name"}"#.to_string(),
        };
        let status = translate(&named_config(), &outcome);
        assert_eq!(status.airplay_name, "Live Name");
        assert_eq!(status.model_name, "Roofline");
    }
}
