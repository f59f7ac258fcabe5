use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Startup settings, read from an optional JSON file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Indicator table loaded at startup.
    pub data_path: PathBuf,
    /// Countries preselected on the plots page (when present in the data).
    pub default_countries: Vec<String>,
    /// Initial text of the minimum-percentage field.
    pub min_percent: String,
    pub show_legend: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: PathBuf::from("WDIData.csv"),
            default_countries: vec!["India".into(), "United States".into()],
            min_percent: "98".into(),
            show_legend: false,
        }
    }
}

impl Config {
    /// Read `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
