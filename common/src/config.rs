//! Configuration loading and fallback defaults.
//!
//! The file is optional. A missing file, unreadable TOML or missing key is
//! never fatal; every key falls back to its built-in default.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

/// Looked up relative to the working directory unless overridden.
pub const DEFAULT_CONFIG_PATH: &str = "whoshere.toml";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    scan: ScanConfig,
}

/// One immutable configuration value, built once at startup and passed by
/// reference to everything that needs it.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Persist each cycle's results as CSV.
    #[serde(default, alias = "saveScan")]
    pub save_scan: bool,
    /// Repeat the scan until interrupted.
    #[serde(default, alias = "liveScan")]
    pub live_scan: bool,
    /// Whole seconds between live-scan cycles.
    #[serde(default = "default_delay", alias = "liveScanDelay")]
    pub live_scan_delay: u64,
    /// Explicit interface name, bypassing the platform heuristic.
    #[serde(default, alias = "setInterface")]
    pub interface: Option<String>,
    /// Directory that receives persisted scans.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            save_scan: false,
            live_scan: false,
            live_scan_delay: default_delay(),
            interface: None,
            log_dir: default_log_dir(),
        }
    }
}

fn default_delay() -> u64 {
    30
}

fn default_log_dir() -> String {
    "logs".to_string()
}

/// Loads the `[scan]` table from `path`, falling back to the defaults if
/// the file cannot be read or parsed.
pub fn load(path: &Path) -> ScanConfig {
    match read(path) {
        Ok(cfg) => {
            info!(path = %path.display(), "loaded configuration");
            cfg
        }
        Err(e) => {
            warn!(path = %path.display(), "configuration unusable ({e}), using defaults");
            ScanConfig::default()
        }
    }
}

fn read(path: &Path) -> anyhow::Result<ScanConfig> {
    let content = std::fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&content)?;
    Ok(file.scan)
}
