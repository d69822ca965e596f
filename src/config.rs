use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PrepError, Result};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// Fallback log filter when RUST_LOG is unset (e.g. "info", "aoitiles=debug")
    pub log_level: Option<String>,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Pretty-print GeoJSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            pretty: false,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PrepError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|reason| PrepError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}
