use super::Dashboard;
use std::path::Path;

pub fn write_json(dashboard: &Dashboard, out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, serde_json::to_string_pretty(dashboard)?)?;
    Ok(())
}
