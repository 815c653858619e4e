//! Value types for the matrices spec tree and the raw CI run data.
//!
//! Everything here is immutable after construction: the config loader and the
//! results source build these once per report pass, the resolvers only read.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::messages::MessageKind;

/// How a CI job is triggered. Unknown or absent input falls back to
/// [`TriggerKind::Periodic`], so the resolvers never see a third state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    #[default]
    Periodic,
    Presubmit,
}

impl TriggerKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "presubmit" => Self::Presubmit,
            _ => Self::Periodic,
        }
    }
}

fn trigger_or_default<'de, D>(d: D) -> Result<TriggerKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().map(TriggerKind::parse).unwrap_or_default())
}

fn trigger_override<'de, D>(d: D) -> Result<Option<TriggerKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().map(TriggerKind::parse))
}

/// Root of the matrices spec: everything the dashboard renders for one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatricesSpec {
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Number of past runs to show per test. Negative means no fixed window.
    #[serde(default = "default_test_history")]
    pub test_history: i32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub matrices: BTreeMap<String, MatrixSpec>,
}

fn default_test_history() -> i32 {
    -1
}

/// A named group of tests sharing CI trigger conventions and base URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatrixSpec {
    /// Filled from the map key by the config loader when absent.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub viewer_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub artifacts_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub artifacts_cache: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ci_config: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub step: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub component: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repository_url: String,
    #[serde(default, deserialize_with = "trigger_or_default")]
    pub trigger: TriggerKind,
    /// Logical test group name -> ordered tests in that group.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tests: BTreeMap<String, Vec<TestSpec>>,
}

/// One named test within a matrix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub test_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub branch: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub component_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub variant: String,
    /// Overrides the matrix-level step when set.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub step: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job_display_name: String,
    /// Overrides the matrix-level trigger when set.
    #[serde(
        default,
        deserialize_with = "trigger_override",
        skip_serializing_if = "Option::is_none"
    )]
    pub trigger: Option<TriggerKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ci_operator: Option<bool>,
}

impl TestSpec {
    /// Absent means the job runs under the CI-operator wrapper.
    pub fn ci_operator(&self) -> bool {
        self.is_ci_operator.unwrap_or(true)
    }

    pub fn display_name(&self) -> &str {
        if self.job_display_name.is_empty() {
            &self.test_name
        } else {
            &self.job_display_name
        }
    }
}

/// One concrete CI run outcome, as fetched from the results source.
///
/// `step_executed == false` means `step_passed` carries no information and
/// must not drive a success decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(default)]
    pub build_id: String,
    #[serde(default)]
    pub passed: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub result: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub finish_date: String,
    #[serde(default)]
    pub step_executed: bool,
    #[serde(default)]
    pub step_passed: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub step_result: String,
    /// Empty unless the run was triggered by a pull request.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pull_number: String,
    /// Commit of the source repository the run was built from.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub component_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub platform_version: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<MessageKind, BTreeMap<String, String>>,
    #[serde(default)]
    pub ok: u32,
    #[serde(default)]
    pub failures: u32,
    #[serde(default)]
    pub ignored: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<StageResult>,
    #[serde(default)]
    pub flake_failure: bool,
    /// Attached by the results source; link resolution fails without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<TestSpec>,
}

/// Per-stage counters extracted from the run's step logs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageResult {
    pub name: String,
    #[serde(default)]
    pub ok: u32,
    #[serde(default)]
    pub failures: u32,
    #[serde(default)]
    pub ignored: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub expected_failure: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flake_failure: String,
}
