use std::path::Path;

use anyhow::Context;
use chrono::Local;

use crate::cli::args::RenderArgs;
use crate::exit_codes::{CONFIG_ERROR, GENERATION_FAILED, SUCCESS};
use cigrid_core::config;
use cigrid_core::report::{self, console, html, json};
use cigrid_core::source::ResultsArchive;

pub(crate) fn run(args: RenderArgs) -> anyhow::Result<i32> {
    tracing::info!(config = %args.config.display(), "loading matrices config");
    let mut spec = match config::load_config(&args.config) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("{e}");
            return Ok(CONFIG_ERROR);
        }
    };
    if let Some(depth) = args.test_history {
        spec.test_history = depth;
    }

    tracing::info!(results = %args.results.display(), "loading results snapshot");
    let archive = match ResultsArchive::from_path(&args.results) {
        Ok(archive) => archive,
        Err(e) => {
            eprintln!("{e}");
            return Ok(CONFIG_ERROR);
        }
    };

    let generated_at = Local::now().format("%Y-%m-%d %Hh%M").to_string();
    let dashboard = report::assemble(&spec, &archive, &generated_at);

    if let Err(e) = write_outputs(&dashboard, &args) {
        eprintln!("failed to write dashboard: {e:?}");
        return Ok(GENERATION_FAILED);
    }

    console::print_summary(&dashboard);
    tracing::info!(output = %args.output.display(), "dashboard saved");
    Ok(SUCCESS)
}

fn write_outputs(dashboard: &report::Dashboard, args: &RenderArgs) -> anyhow::Result<()> {
    ensure_parent_dir(&args.output)?;
    html::write_html(dashboard, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    if let Some(json_out) = &args.json_output {
        ensure_parent_dir(json_out)?;
        json::write_json(dashboard, json_out)
            .with_context(|| format!("writing {}", json_out.display()))?;
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    Ok(())
}
