//! Reading evaluation configs from disk

use std::fs;
use std::path::Path;

use super::schema::EvalSpec;
use crate::error::{Error, Result};

/// Read and parse a YAML evaluation config
///
/// The result is not validated, see [`validate_config`](super::validate_config).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EvalSpec> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
    let spec = parse_config(&content).map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })?;
    tracing::debug!(path = %path.display(), model = %spec.model_name, "loaded config");
    Ok(spec)
}

/// Parse a YAML evaluation config from a string
pub fn parse_config(yaml: &str) -> std::result::Result<EvalSpec, String> {
    serde_yaml::from_str(yaml).map_err(|e| format!("failed to parse YAML: {e}"))
}
