//! Static HTML rendering of an assembled dashboard. Layout only: statuses,
//! descriptions and links arrive pre-resolved.

use std::path::Path;

use super::{Dashboard, ResolvedMatrix, ResolvedRun, ResolvedSlot, ResolvedTest};
use crate::messages::MessageKind;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }
h2 { margin-bottom: 0.2em; }
p.generated { color: #666; font-size: 0.85em; }
table { border-collapse: collapse; margin-bottom: 2em; }
th, td { border: 1px solid #ccc; padding: 0.4em 0.6em; vertical-align: top; }
td.run { text-align: center; min-width: 5em; }
td.run a { text-decoration: none; font-weight: bold; }
td.success { background: #d8f5d0; }
td.known_flake { background: #ffe6b3; }
td.step_missing { background: #e0e0e0; }
td.step_success { background: #fff3b0; }
td.step_failed { background: #f5c6c6; }
td.parsing_error { background: #e6ccff; }
td.nodata { background: #f7f7f7; color: #aaa; }
div.cell-links { font-size: 0.75em; margin-top: 0.3em; }
div.cell-links a { margin: 0 0.2em; font-weight: normal; }
ul.messages { text-align: left; font-size: 0.75em; margin: 0.3em 0 0; padding-left: 1.2em; }
li.msg-flake { color: #b36b00; }
li.msg-error { color: #a40000; }
li.msg-warning { color: #806600; }
li.msg-info { color: #444; }
div.diagnostics { border: 1px solid #e0a0a0; background: #fdf0f0; padding: 0.6em 1em; }
";

pub fn render(dashboard: &Dashboard) -> String {
    let title = if dashboard.description.is_empty() {
        "CI test matrix"
    } else {
        dashboard.description.as_str()
    };

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{}</title>\n", escape(title)));
    page.push_str("<style>\n");
    page.push_str(STYLE);
    page.push_str("</style>\n</head>\n<body>\n");

    page.push_str(&format!("<h1>{}</h1>\n", escape(title)));
    page.push_str(&format!(
        "<p class=\"generated\">Generated {}</p>\n",
        escape(&dashboard.generated_at)
    ));

    for matrix in &dashboard.matrices {
        render_matrix(&mut page, matrix);
    }

    if !dashboard.diagnostics.is_empty() {
        page.push_str("<div class=\"diagnostics\">\n<h3>Diagnostics</h3>\n<ul>\n");
        for note in &dashboard.diagnostics {
            page.push_str(&format!("<li>{}</li>\n", escape(note)));
        }
        page.push_str("</ul>\n</div>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}

pub fn write_html(dashboard: &Dashboard, out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, render(dashboard))?;
    Ok(())
}

fn render_matrix(page: &mut String, matrix: &ResolvedMatrix) {
    page.push_str(&format!("<h2>{}</h2>\n", escape(&matrix.name)));
    if !matrix.description.is_empty() {
        page.push_str(&format!("<p>{}</p>\n", escape(&matrix.description)));
    }
    if !matrix.component.is_empty() {
        page.push_str(&format!(
            "<p>Component: <b>{}</b></p>\n",
            escape(&matrix.component)
        ));
    }

    for group in &matrix.groups {
        page.push_str(&format!("<h3>{}</h3>\n", escape(&group.display_name)));
        page.push_str("<table>\n<tr><th>Test</th><th colspan=\"99\">History (most recent first)</th></tr>\n");
        for test in &group.tests {
            render_test_row(page, test);
        }
        page.push_str("</table>\n");
    }
}

fn render_test_row(page: &mut String, test: &ResolvedTest) {
    page.push_str("<tr>\n<td class=\"test\">");
    page.push_str(&format!("<b>{}</b>", escape(&test.display_name)));
    if !test.branch.is_empty() || !test.variant.is_empty() {
        page.push_str(&format!(
            "<br><small>{} {}</small>",
            escape(&test.branch),
            escape(&test.variant)
        ));
    }
    page.push_str(&format!("<br><small>{}</small>", escape(&test.job_name)));
    page.push_str("</td>\n");

    for slot in &test.history {
        match slot {
            ResolvedSlot::Run(run) => render_run_cell(page, run),
            ResolvedSlot::NoData => page.push_str("<td class=\"run nodata\">no data</td>\n"),
        }
    }
    page.push_str("</tr>\n");
}

fn render_run_cell(page: &mut String, run: &ResolvedRun) {
    page.push_str(&format!(
        "<td class=\"run {}\">\n<a href=\"{}\" title=\"{}\">{}</a>\n",
        run.status.as_str(),
        escape(&run.viewer_url),
        escape(&run.description),
        escape(&run.build_id)
    ));

    let mut meta: Vec<&str> = Vec::new();
    if !run.finish_date.is_empty() {
        meta.push(&run.finish_date);
    }
    if !run.result.is_empty() {
        meta.push(&run.result);
    }
    if !meta.is_empty() {
        page.push_str(&format!("<br><small>{}</small>\n", escape(&meta.join(" · "))));
    }
    if run.ok + run.failures + run.ignored > 0 {
        page.push_str(&format!(
            "<br><small>{} ok / {} failed / {} ignored</small>\n",
            run.ok, run.failures, run.ignored
        ));
    }

    page.push_str(&format!(
        "<div class=\"cell-links\"><a href=\"{}\">artifacts</a><a href=\"{}\">commit</a></div>\n",
        escape(&run.artifacts_url),
        escape(&run.repository_url)
    ));

    let mut items: Vec<(&str, String)> = Vec::new();
    for kind in MessageKind::ALL {
        for text in run.messages.get(&kind).into_iter().flat_map(|m| m.values()) {
            items.push((kind.as_str(), text.clone()));
        }
    }
    for stage in &run.stages {
        if stage.failures > 0 {
            items.push(("error", format!("stage {}: {} failed", stage.name, stage.failures)));
        }
    }
    if !items.is_empty() {
        page.push_str("<ul class=\"messages\">\n");
        for (class, text) in items {
            page.push_str(&format!(
                "<li class=\"msg-{}\">{}</li>\n",
                class,
                escape(&text)
            ));
        }
        page.push_str("</ul>\n");
    }
    page.push_str("</td>\n");
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
