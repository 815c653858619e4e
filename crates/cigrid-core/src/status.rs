//! Classification of a raw run record into one discrete status.

use serde::Serialize;

use crate::model::TestResult;

/// The closed set of semantic states a run can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    KnownFlake,
    StepMissing,
    StepSuccess,
    StepFailed,
    ParsingError,
}

/// Resolve a run into its status. The branch order is load-bearing: the raw
/// fields are not mutually exclusive, so the first match wins.
pub fn resolve(result: &TestResult) -> Status {
    if result.passed {
        Status::Success
    } else if result.is_known_flake() {
        Status::KnownFlake
    } else if !result.step_executed {
        Status::StepMissing
    } else if result.step_passed {
        Status::StepSuccess
    } else if !result.step_passed {
        Status::StepFailed
    } else {
        // Unreachable with a two-valued step flag. Kept so a broken record
        // surfaces in the report instead of taking the generator down.
        Status::ParsingError
    }
}

impl Status {
    /// Snake-case label, also used as the CSS class in the rendered page.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::KnownFlake => "known_flake",
            Self::StepMissing => "step_missing",
            Self::StepSuccess => "step_success",
            Self::StepFailed => "step_failed",
            Self::ParsingError => "parsing_error",
        }
    }

    /// Human-readable description of the status. For [`Status::KnownFlake`]
    /// every flake message is enumerated, newline-joined.
    pub fn describe(&self, result: &TestResult) -> String {
        match self {
            Self::Success => "Test passed".to_string(),
            Self::KnownFlake => {
                let mut msg = String::from("Test failed because of a known flake: ");
                for flake in result.flake_messages() {
                    msg.push_str("\n- ");
                    msg.push_str(flake);
                }
                msg
            }
            Self::StepSuccess => "Test failed but the component step passed".to_string(),
            Self::StepFailed => "Test failed because the component step failed".to_string(),
            Self::StepMissing => "Test failed but the component step was not executed".to_string(),
            Self::ParsingError => format!(
                "Test: {}, Step: {} (status: {})",
                result.passed,
                result.step_passed,
                self.as_str()
            ),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageKind;
    use std::collections::BTreeMap;

    fn result(passed: bool, step_executed: bool, step_passed: bool) -> TestResult {
        TestResult {
            passed,
            step_executed,
            step_passed,
            ..TestResult::default()
        }
    }

    fn with_flake(mut r: TestResult, text: &str) -> TestResult {
        r.messages.insert(
            MessageKind::Flake,
            BTreeMap::from([("f".to_string(), text.to_string())]),
        );
        r
    }

    #[test]
    fn passed_wins_regardless_of_step_fields() {
        for step_executed in [false, true] {
            for step_passed in [false, true] {
                let r = result(true, step_executed, step_passed);
                assert_eq!(resolve(&r), Status::Success);
                let r = with_flake(result(true, step_executed, step_passed), "flaky infra");
                assert_eq!(resolve(&r), Status::Success);
            }
        }
    }

    #[test]
    fn flake_messages_take_precedence_over_step_outcome() {
        let r = with_flake(result(false, true, true), "image registry timed out");
        assert_eq!(resolve(&r), Status::KnownFlake);
    }

    #[test]
    fn unexecuted_step_resolves_to_step_missing() {
        assert_eq!(resolve(&result(false, false, false)), Status::StepMissing);
        // step_passed carries no information when the step never ran
        assert_eq!(resolve(&result(false, false, true)), Status::StepMissing);
    }

    #[test]
    fn executed_step_splits_on_step_outcome() {
        assert_eq!(resolve(&result(false, true, true)), Status::StepSuccess);
        assert_eq!(resolve(&result(false, true, false)), Status::StepFailed);
    }

    #[test]
    fn resolution_is_total_over_all_flag_combinations() {
        for passed in [false, true] {
            for flaky in [false, true] {
                for step_executed in [false, true] {
                    for step_passed in [false, true] {
                        let mut r = result(passed, step_executed, step_passed);
                        if flaky {
                            r = with_flake(r, "known flake");
                        }
                        let status = resolve(&r);
                        assert_ne!(status, Status::ParsingError);
                        assert!(!status.as_str().is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn known_flake_description_enumerates_every_message() {
        let mut r = with_flake(result(false, true, false), "image registry timed out");
        r.messages
            .get_mut(&MessageKind::Flake)
            .unwrap()
            .insert("b".to_string(), "node never became ready".to_string());

        let descr = Status::KnownFlake.describe(&r);
        assert!(descr.starts_with("Test failed because of a known flake: "));
        assert!(descr.contains("\n- image registry timed out"));
        assert!(descr.contains("\n- node never became ready"));
    }

    #[test]
    fn parsing_error_description_reports_the_raw_flags() {
        let r = result(false, true, true);
        let descr = Status::ParsingError.describe(&r);
        assert_eq!(descr, "Test: false, Step: true (status: parsing_error)");
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(Status::Success.as_str(), "success");
        assert_eq!(Status::KnownFlake.as_str(), "known_flake");
        assert_eq!(Status::StepMissing.as_str(), "step_missing");
        assert_eq!(Status::StepSuccess.as_str(), "step_success");
        assert_eq!(Status::StepFailed.as_str(), "step_failed");
        assert_eq!(Status::ParsingError.as_str(), "parsing_error");
        assert_eq!(Status::KnownFlake.to_string(), "known_flake");
    }
}
