use std::path::PathBuf;

use clap::Parser;
use whoshere_common::config::{self, DEFAULT_CONFIG_PATH, ScanConfig};

/// Command line surface. Every flag overrides its configuration-file
/// counterpart.
#[derive(Parser)]
#[command(name = "whoshere")]
#[command(about = "Discovers the devices on your local network.")]
pub struct CommandLine {
    /// Path to the configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Scan through this interface instead of the configured one
    #[arg(short, long)]
    pub interface: Option<String>,

    /// Repeat the scan until interrupted
    #[arg(short, long)]
    pub live: bool,

    /// Save each cycle's results as CSV
    #[arg(short, long)]
    pub save: bool,

    /// Seconds to wait between live-scan cycles
    #[arg(short, long)]
    pub delay: Option<u64>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// File configuration with the command line applied on top.
    pub fn resolve_config(&self) -> ScanConfig {
        let mut cfg = config::load(&self.config);
        if self.interface.is_some() {
            cfg.interface = self.interface.clone();
        }
        if self.live {
            cfg.live_scan = true;
        }
        if self.save {
            cfg.save_scan = true;
        }
        if let Some(delay) = self.delay {
            cfg.live_scan_delay = delay;
        }
        cfg
    }
}
