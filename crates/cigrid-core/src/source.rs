//! File-backed results source: a pre-fetched snapshot of CI run data.
//!
//! Fetching from the CI backend happens out of process; by the time this
//! module is involved the data is complete and immutable. The snapshot maps
//! job name to that job's run history, most recent first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::ConfigError;
use crate::model::{TestResult, TestSpec};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsArchive {
    #[serde(default)]
    pub runs: BTreeMap<String, Vec<TestResult>>,
}

impl ResultsArchive {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConfigError(format!(
                "failed to read results snapshot {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| ConfigError(format!("failed to parse results snapshot: {}", e)))
    }

    /// History for one test: looked up by job name, truncated to `depth`
    /// runs when bounded, each run carrying its owning test spec. A job with
    /// no snapshot entry yields an empty history, not an error.
    pub fn history_for(&self, spec: &TestSpec, depth: i32) -> Vec<TestResult> {
        let mut runs = self.runs.get(&spec.job_name).cloned().unwrap_or_default();
        if depth >= 0 {
            runs.truncate(depth as usize);
        }
        for run in &mut runs {
            run.test = Some(spec.clone());
        }
        runs
    }
}
