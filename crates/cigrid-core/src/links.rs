//! Derivation of artifact-browser, log-viewer and source-commit URLs.
//!
//! Pure string assembly. Missing optional fields interpolate as empty
//! segments rather than failing; the one hard error is a run with no test
//! spec attached, which callers render as [`INVALID`].

use thiserror::Error;

use crate::model::{MatrixSpec, TestResult, TestSpec, TriggerKind};

/// Marker rendered in place of a link that could not be derived.
pub const INVALID: &str = "INVALID";

/// Substituted when a matrix does not name a source repository.
pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/cigrid/ci-artifacts";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("test result has no test spec attached")]
    MissingTestSpec,
}

/// Test-level trigger override wins over the matrix-level trigger.
pub fn effective_trigger(matrix: &MatrixSpec, test: &TestSpec) -> TriggerKind {
    test.trigger.unwrap_or(matrix.trigger)
}

/// URL of the run's artifact tree in the CI artifact browser.
///
/// Presubmit runs live under `pull/{pr}/{job}/{build}`; periodic runs under
/// `{job}/{build}/artifacts/{test}/{step}`. Jobs running under the
/// CI-operator wrapper nest one more `/artifacts` segment.
pub fn artifacts_url(matrix: &MatrixSpec, result: &TestResult) -> Result<String, LinkError> {
    let test = result.test.as_ref().ok_or(LinkError::MissingTestSpec)?;

    let step = if test.step.is_empty() {
        matrix.step.as_str()
    } else {
        test.step.as_str()
    };

    let base = match effective_trigger(matrix, test) {
        TriggerKind::Presubmit => format!(
            "{}/pull/{}/{}/{}",
            matrix.artifacts_url, result.pull_number, test.job_name, result.build_id
        ),
        TriggerKind::Periodic => format!(
            "{}/{}/{}/artifacts/{}/{}",
            matrix.artifacts_url, test.job_name, result.build_id, test.test_name, step
        ),
    };

    if test.ci_operator() {
        Ok(base + "/artifacts")
    } else {
        Ok(base)
    }
}

/// URL of the run in the CI log viewer. Trigger-independent.
pub fn viewer_url(matrix: &MatrixSpec, job_name: &str, result: &TestResult) -> String {
    format!("{}/{}/{}", matrix.viewer_url, job_name, result.build_id)
}

/// URL of the source commit the run was built from.
pub fn repository_url(matrix: &MatrixSpec, result: &TestResult) -> String {
    let base = if matrix.repository_url.is_empty() {
        DEFAULT_REPOSITORY_URL
    } else {
        matrix.repository_url.as_str()
    };
    format!("{}/commit/{}", base, result.source_version)
}
