//! Outbound port for the console and persistence collaborators.
//!
//! The scan loop only ever talks to this trait; the concrete rendering and
//! CSV writing live with the binary.

use std::path::PathBuf;

use crate::net::device::ScanResult;

pub trait ScanReporter: Send + Sync {
    /// Called as the broadcast-and-collect step begins.
    fn scan_started(&self) {}

    /// Renders one completed cycle.
    fn report(&self, result: &ScanResult);

    /// Persists one completed cycle, returning the written path.
    fn persist(&self, result: &ScanResult) -> anyhow::Result<PathBuf>;

    /// Announces one remaining second of the inter-cycle delay.
    fn countdown_tick(&self, remaining: u64);
}
