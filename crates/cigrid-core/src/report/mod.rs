//! Assembly of resolved statuses and links into a renderable dashboard.
//!
//! This is the one layer of the core that logs: link and status resolution
//! stay pure, and anything they surface (configuration inconsistencies,
//! unclassifiable runs) is both recorded on the dashboard and warned about
//! here. No single malformed record stops the walk.

pub mod console;
pub mod html;
pub mod json;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::history::{self, HistorySlot};
use crate::links::{self, INVALID};
use crate::messages::MessageKind;
use crate::model::{MatricesSpec, MatrixSpec, StageResult, TestResult, TestSpec, TriggerKind};
use crate::source::ResultsArchive;
use crate::status::{self, Status};

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRun {
    pub build_id: String,
    pub finish_date: String,
    /// Raw result label as reported by the CI backend.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub result: String,
    pub status: Status,
    pub description: String,
    pub artifacts_url: String,
    pub viewer_url: String,
    pub repository_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub component_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub platform_version: String,
    pub ok: u32,
    pub failures: u32,
    pub ignored: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<StageResult>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<MessageKind, BTreeMap<String, String>>,
}

/// One position in a test's rendered history column: a resolved run, or a
/// placeholder where the snapshot had no data.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum ResolvedSlot {
    Run(ResolvedRun),
    NoData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTest {
    pub test_name: String,
    pub display_name: String,
    pub job_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub branch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub variant: String,
    /// Fixed-width history column, padded to the configured depth: real runs
    /// first (most recent leading), then placeholders.
    pub history: Vec<ResolvedSlot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedGroup {
    pub name: String,
    pub display_name: String,
    pub tests: Vec<ResolvedTest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedMatrix {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub component: String,
    pub groups: Vec<ResolvedGroup>,
}

/// The fully resolved report. The rendering layer only does layout on top of
/// this; it never re-derives a status or a link.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub generated_at: String,
    pub test_history: i32,
    pub matrices: Vec<ResolvedMatrix>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

/// Group keys may carry an ordering prefix (`"01|Install"`); everything up
/// to the first `|` is dropped for display.
pub fn group_display_name(group: &str) -> &str {
    match group.split_once('|') {
        Some((_, rest)) => rest,
        None => group,
    }
}

pub fn assemble(spec: &MatricesSpec, archive: &ResultsArchive, generated_at: &str) -> Dashboard {
    let mut diagnostics = Vec::new();
    let mut matrices = Vec::new();

    for matrix in spec.matrices.values() {
        let mut groups = Vec::new();
        for (group, tests) in &matrix.tests {
            let mut resolved = Vec::new();
            for test in tests {
                resolved.push(resolve_test(
                    matrix,
                    test,
                    archive,
                    spec.test_history,
                    &mut diagnostics,
                ));
            }
            groups.push(ResolvedGroup {
                name: group.clone(),
                display_name: group_display_name(group).to_string(),
                tests: resolved,
            });
        }
        matrices.push(ResolvedMatrix {
            name: matrix.name.clone(),
            description: matrix.description.clone(),
            component: matrix.component.clone(),
            groups,
        });
    }

    Dashboard {
        description: spec.description.clone(),
        generated_at: generated_at.to_string(),
        test_history: spec.test_history,
        matrices,
        diagnostics,
    }
}

fn resolve_test(
    matrix: &MatrixSpec,
    test: &TestSpec,
    archive: &ResultsArchive,
    depth: i32,
    diagnostics: &mut Vec<String>,
) -> ResolvedTest {
    let runs = archive.history_for(test, depth);
    let history = history::window(&runs, depth)
        .into_iter()
        .map(|slot| match slot {
            HistorySlot::Run(run) => {
                ResolvedSlot::Run(resolve_run(matrix, test, run, diagnostics))
            }
            HistorySlot::NoData => ResolvedSlot::NoData,
        })
        .collect();

    ResolvedTest {
        test_name: test.test_name.clone(),
        display_name: test.display_name().to_string(),
        job_name: test.job_name.clone(),
        branch: test.branch.clone(),
        variant: test.variant.clone(),
        history,
    }
}

fn resolve_run(
    matrix: &MatrixSpec,
    test: &TestSpec,
    run: &TestResult,
    diagnostics: &mut Vec<String>,
) -> ResolvedRun {
    let status = status::resolve(run);
    if status == Status::ParsingError {
        let note = format!(
            "{}/{}: run {} could not be classified (passed={}, step_executed={}, step_passed={})",
            matrix.name, test.test_name, run.build_id, run.passed, run.step_executed, run.step_passed
        );
        tracing::warn!(matrix = %matrix.name, test = %test.test_name, build = %run.build_id,
            "run could not be classified");
        diagnostics.push(note);
    }

    if links::effective_trigger(matrix, test) == TriggerKind::Presubmit
        && run.pull_number.is_empty()
    {
        let note = format!(
            "{}/{}: presubmit run {} has no pull number",
            matrix.name, test.test_name, run.build_id
        );
        tracing::warn!(matrix = %matrix.name, test = %test.test_name, build = %run.build_id,
            "presubmit run has no pull number");
        diagnostics.push(note);
    }

    ResolvedRun {
        build_id: run.build_id.clone(),
        finish_date: run.finish_date.clone(),
        result: run.result.clone(),
        status,
        description: status.describe(run),
        artifacts_url: links::artifacts_url(matrix, run).unwrap_or_else(|_| INVALID.to_string()),
        viewer_url: links::viewer_url(matrix, &test.job_name, run),
        repository_url: links::repository_url(matrix, run),
        component_version: run.component_version.clone(),
        platform_version: run.platform_version.clone(),
        ok: run.ok,
        failures: run.failures,
        ignored: run.ignored,
        stages: run.stages.clone(),
        messages: run.messages.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn spec_with(matrix: MatrixSpec) -> MatricesSpec {
        MatricesSpec {
            version: "v1".into(),
            description: "Component health".into(),
            test_history: 3,
            matrices: BTreeMap::from([(matrix.name.clone(), matrix)]),
        }
    }

    fn nightly_matrix() -> MatrixSpec {
        MatrixSpec {
            name: "nightly".into(),
            viewer_url: "https://viewer".into(),
            artifacts_url: "https://art".into(),
            step: "install".into(),
            tests: BTreeMap::from([(
                "01|Install".to_string(),
                vec![TestSpec {
                    test_name: "deploy".into(),
                    job_name: "job1".into(),
                    ..TestSpec::default()
                }],
            )]),
            ..MatrixSpec::default()
        }
    }

    fn archive(builds: &[(&str, bool)]) -> ResultsArchive {
        let runs = builds
            .iter()
            .map(|(build, passed)| TestResult {
                build_id: (*build).to_string(),
                passed: *passed,
                ..TestResult::default()
            })
            .collect();
        ResultsArchive {
            runs: BTreeMap::from([("job1".to_string(), runs)]),
        }
    }

    #[test]
    fn assembles_statuses_links_and_padding() {
        let spec = spec_with(nightly_matrix());
        let dashboard = assemble(&spec, &archive(&[("42", true)]), "2026-08-04 09h00");

        assert_eq!(dashboard.generated_at, "2026-08-04 09h00");
        let group = &dashboard.matrices[0].groups[0];
        assert_eq!(group.display_name, "Install");

        let test = &group.tests[0];
        assert_eq!(test.history.len(), 3);
        assert!(matches!(test.history[1], ResolvedSlot::NoData));
        assert!(matches!(test.history[2], ResolvedSlot::NoData));

        let ResolvedSlot::Run(run) = &test.history[0] else {
            panic!("expected a run in the leading slot");
        };
        assert_eq!(run.status, Status::Success);
        assert_eq!(run.description, "Test passed");
        assert_eq!(
            run.artifacts_url,
            "https://art/job1/42/artifacts/deploy/install/artifacts"
        );
        assert_eq!(run.viewer_url, "https://viewer/job1/42");
        assert!(dashboard.diagnostics.is_empty());
    }

    #[test]
    fn presubmit_run_without_pull_number_is_diagnosed_not_fatal() {
        let mut matrix = nightly_matrix();
        matrix.trigger = TriggerKind::Presubmit;
        let spec = spec_with(matrix);

        let dashboard = assemble(&spec, &archive(&[("42", false)]), "now");

        assert_eq!(dashboard.diagnostics.len(), 1);
        assert!(dashboard.diagnostics[0].contains("no pull number"));
        // the malformed link is still produced
        let ResolvedSlot::Run(run) = &dashboard.matrices[0].groups[0].tests[0].history[0] else {
            panic!("expected a run in the leading slot");
        };
        assert_eq!(run.artifacts_url, "https://art/pull//job1/42/artifacts");
    }

    #[test]
    fn a_test_with_no_snapshot_data_renders_as_all_placeholders() {
        let mut matrix = nightly_matrix();
        matrix
            .tests
            .get_mut("01|Install")
            .unwrap()
            .push(TestSpec {
                test_name: "upgrade".into(),
                job_name: "job-without-data".into(),
                ..TestSpec::default()
            });
        let spec = spec_with(matrix);

        let dashboard = assemble(&spec, &archive(&[("42", true)]), "now");
        let upgrade = &dashboard.matrices[0].groups[0].tests[1];
        assert_eq!(upgrade.history.len(), 3);
        assert!(upgrade
            .history
            .iter()
            .all(|slot| matches!(slot, ResolvedSlot::NoData)));
    }

    #[test]
    fn a_run_without_a_spec_renders_the_invalid_marker() {
        let matrix = nightly_matrix();
        let test = TestSpec {
            test_name: "deploy".into(),
            job_name: "job1".into(),
            ..TestSpec::default()
        };
        // no spec attached: the link degrades to the marker, nothing aborts
        let run = TestResult {
            build_id: "42".into(),
            ..TestResult::default()
        };
        let mut diagnostics = Vec::new();

        let resolved = resolve_run(&matrix, &test, &run, &mut diagnostics);
        assert_eq!(resolved.artifacts_url, INVALID);
        assert_eq!(resolved.viewer_url, "https://viewer/job1/42");
    }

    #[test]
    fn group_names_keep_text_after_the_ordering_prefix() {
        assert_eq!(group_display_name("01|Install"), "Install");
        assert_eq!(group_display_name("Install"), "Install");
        assert_eq!(group_display_name("a|b|c"), "b|c");
    }

    #[test]
    fn dashboard_serializes_with_tagged_slots_and_snake_case_statuses() {
        let spec = spec_with(nightly_matrix());
        let dashboard = assemble(&spec, &archive(&[("42", true)]), "now");
        let v = serde_json::to_value(&dashboard).unwrap();
        let history = &v["matrices"][0]["groups"][0]["tests"][0]["history"];
        assert_eq!(history[0]["slot"], "run");
        assert_eq!(history[0]["status"], "success");
        assert_eq!(history[1]["slot"], "no_data");
    }
}
