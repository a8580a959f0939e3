use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::report::ReportFormat;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}

fn default_parallel() -> bool { true }

/// Explicit path, then ./dbhist.toml, then the per-user config locations.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from("dbhist.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("dbhist").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("dbhist").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}
