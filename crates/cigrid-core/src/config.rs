use crate::errors::ConfigError;
use crate::model::MatricesSpec;
use std::path::Path;

pub const SUPPORTED_SPEC_VERSION: &str = "v1";

pub fn load_config(path: &Path) -> Result<MatricesSpec, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    parse_config(&raw)
}

/// Parse and normalize a matrices spec. On success every matrix carries a
/// non-empty name and a resolved trigger, which the resolvers rely on.
pub fn parse_config(raw: &str) -> Result<MatricesSpec, ConfigError> {
    let mut spec: MatricesSpec = serde_yaml::from_str(raw)
        .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;

    if spec.version != SUPPORTED_SPEC_VERSION {
        return Err(ConfigError(format!(
            "unsupported spec version {} (supported: {})",
            spec.version, SUPPORTED_SPEC_VERSION
        )));
    }
    if spec.matrices.is_empty() {
        return Err(ConfigError("config has no matrices".into()));
    }

    for (key, matrix) in spec.matrices.iter_mut() {
        if matrix.name.is_empty() {
            matrix.name = key.clone();
        }
    }

    Ok(spec)
}
