//! The scan control loop.
//!
//! One iterative state machine drives every cycle: select the interface,
//! resolve its subnet, sweep, report, then either count down and go again
//! or end the run. Selection and resolution failures are fatal; reporting
//! failures are not.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{error, info};
use whoshere_common::config::ScanConfig;
use whoshere_common::error::Error;
use whoshere_common::net::device::{Device, ScanResult, UNKNOWN};
use whoshere_common::net::interface::{self, SelectedInterface};
use whoshere_common::net::subnet::Subnet;
use whoshere_common::report::ScanReporter;

use crate::platform::Platform;
use crate::resolver;
use crate::scanner::DiscoveryScanner;
use crate::scanner::transport::EthernetTransport;

pub struct Orchestrator<R: ScanReporter> {
    cfg: ScanConfig,
    platform: Platform,
    reporter: R,
    stop: Arc<AtomicBool>,
}

impl<R: ScanReporter> Orchestrator<R> {
    pub fn new(cfg: ScanConfig, platform: Platform, reporter: R, stop: Arc<AtomicBool>) -> Self {
        Self {
            cfg,
            platform,
            reporter,
            stop,
        }
    }

    /// Runs cycles until live-scan ends or a fatal condition occurs. The
    /// loop is deliberately iterative; an unbounded live scan must not
    /// grow the stack.
    pub async fn run(&mut self) -> Result<(), Error> {
        loop {
            let result = self.run_cycle().await?;
            self.report(&result);

            if !self.cfg.live_scan {
                return Ok(());
            }
            self.delay().await?;
        }
    }

    async fn run_cycle(&self) -> Result<ScanResult, Error> {
        let interfaces = interface::available();
        let intf = interface::select(
            &interfaces,
            self.cfg.interface.as_deref(),
            self.platform.default_interface(),
            self.platform.wireless_prefix(),
        )?;
        info!(interface = %intf.name, addr = %intf.addr, "interface selected");

        let subnet = Subnet::resolve(intf.addr, &intf.netmask)?;
        info!("scanning {}/{}", subnet.addr, subnet.prefix);

        self.reporter.scan_started();
        let mut devices = self.sweep(&intf, &subnet).await?;
        resolver::resolve_hostnames(&mut devices, &self.stop).await;

        if self.stop.load(Ordering::Relaxed) {
            return Err(Error::Interrupted);
        }

        let network_name = self
            .platform
            .network_name()
            .unwrap_or_else(|| UNKNOWN.to_string());

        Ok(ScanResult {
            subnet,
            devices,
            network_name,
            interface: intf.name,
        })
    }

    /// The raw channel lives only for the duration of this step.
    async fn sweep(
        &self,
        intf: &SelectedInterface,
        subnet: &Subnet,
    ) -> Result<Vec<Device>, Error> {
        let transport = EthernetTransport::open(intf)?;
        let mut scanner = DiscoveryScanner::new(transport, self.stop.clone());

        let intf = intf.clone();
        let subnet = subnet.clone();
        tokio::task::spawn_blocking(move || scanner.sweep(&intf, &subnet))
            .await
            .map_err(|e| Error::InterfaceUnusable(e.to_string()))?
    }

    fn report(&self, result: &ScanResult) {
        self.reporter.report(result);

        if self.cfg.save_scan {
            match self.reporter.persist(result) {
                Ok(path) => info!(path = %path.display(), "scan results saved"),
                Err(e) => error!("failed to persist scan results: {e:#}"),
            }
        }
    }

    /// One tick per remaining second. An interrupt lands between ticks and
    /// ends the run before the next cycle starts.
    async fn delay(&self) -> Result<(), Error> {
        for remaining in (1..=self.cfg.live_scan_delay).rev() {
            if self.stop.load(Ordering::Relaxed) {
                return Err(Error::Interrupted);
            }
            self.reporter.countdown_tick(remaining);
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        if self.stop.load(Ordering::Relaxed) {
            return Err(Error::Interrupted);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingReporter {
        ticks: Arc<Mutex<Vec<u64>>>,
        stop_on_tick: Option<Arc<AtomicBool>>,
    }

    impl ScanReporter for RecordingReporter {
        fn report(&self, _result: &ScanResult) {}

        fn persist(&self, _result: &ScanResult) -> anyhow::Result<PathBuf> {
            Ok(PathBuf::new())
        }

        fn countdown_tick(&self, remaining: u64) {
            self.ticks.lock().unwrap().push(remaining);
            if let Some(stop) = &self.stop_on_tick {
                stop.store(true, Ordering::Relaxed);
            }
        }
    }

    fn orchestrator(
        delay: u64,
        reporter: RecordingReporter,
        stop: Arc<AtomicBool>,
    ) -> Orchestrator<RecordingReporter> {
        let cfg = ScanConfig {
            live_scan: true,
            live_scan_delay: delay,
            ..ScanConfig::default()
        };
        Orchestrator::new(cfg, Platform, reporter, stop)
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_runs_once_per_configured_second() {
        let reporter = RecordingReporter::default();
        let ticks = reporter.ticks.clone();
        let stop = Arc::new(AtomicBool::new(false));

        orchestrator(3, reporter, stop).delay().await.unwrap();
        assert_eq!(*ticks.lock().unwrap(), vec![3, 2, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn interrupt_during_countdown_ends_the_run() {
        let stop = Arc::new(AtomicBool::new(false));
        let reporter = RecordingReporter {
            ticks: Arc::new(Mutex::new(Vec::new())),
            stop_on_tick: Some(stop.clone()),
        };
        let ticks = reporter.ticks.clone();

        let result = orchestrator(3, reporter, stop).delay().await;
        assert!(matches!(result, Err(Error::Interrupted)));
        assert_eq!(*ticks.lock().unwrap(), vec![3], "no tick after the interrupt");
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_finishes_immediately() {
        let reporter = RecordingReporter::default();
        let ticks = reporter.ticks.clone();
        let stop = Arc::new(AtomicBool::new(false));

        orchestrator(0, reporter, stop).delay().await.unwrap();
        assert!(ticks.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn pre_set_interrupt_skips_the_countdown() {
        let reporter = RecordingReporter::default();
        let ticks = reporter.ticks.clone();
        let stop = Arc::new(AtomicBool::new(true));

        let result = orchestrator(5, reporter, stop).delay().await;
        assert!(matches!(result, Err(Error::Interrupted)));
        assert!(ticks.lock().unwrap().is_empty());
    }
}
