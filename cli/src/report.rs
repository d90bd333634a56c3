//! Console and CSV collaborators behind the reporting port.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use whoshere_common::net::device::ScanResult;
use whoshere_common::report::ScanReporter;

use crate::export;
use crate::terminal::print;

pub struct ConsoleReporter {
    log_dir: PathBuf,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            spinner: Mutex::new(None),
        }
    }
}

impl ScanReporter for ConsoleReporter {
    fn scan_started(&self) {
        let mut guard = self.spinner.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        let spinner = new_spinner();
        spinner.set_message("listening for replies...");
        *guard = Some(spinner);
    }

    fn report(&self, result: &ScanResult) {
        if let Some(spinner) = self.spinner.lock().unwrap().take() {
            spinner.finish_and_clear();
        }
        print::summary_table(result);
        print::device_table(&result.devices);
    }

    fn persist(&self, result: &ScanResult) -> anyhow::Result<PathBuf> {
        export::write_cycle(&self.log_dir, result)
    }

    fn countdown_tick(&self, remaining: u64) {
        let mut guard = self.spinner.lock().unwrap();
        let spinner = guard.get_or_insert_with(new_spinner);
        spinner.set_message(format!("re-scanning in {remaining} seconds"));
    }
}

fn new_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap()
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
