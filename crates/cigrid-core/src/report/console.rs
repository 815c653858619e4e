use super::{Dashboard, ResolvedSlot};
use crate::status::Status;

pub fn print_summary(dashboard: &Dashboard) {
    let mut success = 0;
    let mut known_flake = 0;
    let mut step_missing = 0;
    let mut step_success = 0;
    let mut step_failed = 0;
    let mut parsing_error = 0;
    let mut no_data = 0;

    for matrix in &dashboard.matrices {
        for group in &matrix.groups {
            for test in &group.tests {
                for slot in &test.history {
                    match slot {
                        ResolvedSlot::Run(run) => match run.status {
                            Status::Success => success += 1,
                            Status::KnownFlake => known_flake += 1,
                            Status::StepMissing => step_missing += 1,
                            Status::StepSuccess => step_success += 1,
                            Status::StepFailed => step_failed += 1,
                            Status::ParsingError => parsing_error += 1,
                        },
                        ResolvedSlot::NoData => no_data += 1,
                    }
                }
            }
        }
    }

    eprintln!(
        "Results: success={} known_flake={} step_missing={} step_success={} step_failed={} parsing_error={} no_data={}",
        success, known_flake, step_missing, step_success, step_failed, parsing_error, no_data
    );
}
