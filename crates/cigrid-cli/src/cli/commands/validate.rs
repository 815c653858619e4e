use crate::cli::args::ValidateArgs;
use crate::exit_codes::{CONFIG_ERROR, SUCCESS};
use cigrid_core::config;

pub(crate) fn run(args: ValidateArgs) -> anyhow::Result<i32> {
    match config::load_config(&args.config) {
        Ok(spec) => {
            let tests: usize = spec
                .matrices
                .values()
                .map(|m| m.tests.values().map(Vec::len).sum::<usize>())
                .sum();
            eprintln!(
                "config ok: {} matrices, {} tests, history depth {}",
                spec.matrices.len(),
                tests,
                spec.test_history
            );
            Ok(SUCCESS)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(CONFIG_ERROR)
        }
    }
}
