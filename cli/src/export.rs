//! CSV persistence for completed cycles.
//!
//! One file per cycle: `<log_dir>/<dd-mm-yy>/<HH-MM-SS>.csv`, one row per
//! device with address, MAC and hostname, no header row.

use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use pnet::datalink::MacAddr;
use whoshere_common::net::device::{Device, ScanResult};

pub fn write_cycle(log_dir: &Path, result: &ScanResult) -> anyhow::Result<PathBuf> {
    let now = Local::now();
    let dir = log_dir.join(now.format("%d-%m-%y").to_string());
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let path = dir.join(format!("{}.csv", now.format("%H-%M-%S")));
    write_devices(&path, &result.devices)?;
    Ok(path)
}

pub fn write_devices(path: &Path, devices: &[Device]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for device in devices {
        writer.write_record([
            device.addr.to_string(),
            device.mac.to_string(),
            device.hostname.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a cycle file back into device triples; the inverse of
/// [`write_devices`].
pub fn read_devices(path: &Path) -> anyhow::Result<Vec<Device>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_path(path)?;
    let mut devices = Vec::new();

    for record in reader.records() {
        let record = record?;
        let addr: Ipv4Addr = record
            .get(0)
            .context("missing address field")?
            .parse()?;
        let mac: MacAddr = record
            .get(1)
            .context("missing MAC field")?
            .parse()
            .map_err(|e| anyhow::anyhow!("unparsable MAC address: {e:?}"))?;
        let hostname = record.get(2).context("missing hostname field")?.to_string();
        devices.push(Device {
            addr,
            mac,
            hostname,
        });
    }
    Ok(devices)
}
