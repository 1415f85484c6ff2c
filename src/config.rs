use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::resolver::ToleranceConfig;

/// Runtime settings, read from a JSON file.
///
/// ```json
/// {
///   "table": "freq_labels.csv",
///   "tolerance": { "tolerance_hz": 5000, "quantize_raster_hz": 8333.333333 }
/// }
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Label table path.
    pub table: Option<PathBuf>,
    pub tolerance: ToleranceConfig,
}

impl Config {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text).context("parsing config JSON")?;
        config.tolerance.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in config {}", path.display()))
    }
}
