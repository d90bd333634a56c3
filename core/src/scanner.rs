//! Broadcast fire-and-collect discovery.
//!
//! One request burst covers the whole derived range up front; the scanner
//! then listens passively for replies until the window closes. There is no
//! per-host request/response exchange.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::debug;
use whoshere_common::error::Error;
use whoshere_common::net::device::Device;
use whoshere_common::net::interface::SelectedInterface;
use whoshere_common::net::subnet::Subnet;

pub mod arp;
pub mod transport;

/// Listening window after the request burst has been written.
pub const REPLY_WINDOW: Duration = Duration::from_secs(2);

/// Seam between the sweep logic and the raw channel, so the collect loop
/// can be driven without a privileged socket.
pub trait LinkTransport {
    /// Pushes one frame onto the wire.
    fn transmit(&mut self, frame: &[u8]) -> anyhow::Result<()>;

    /// Next captured frame, or `None` once `deadline` has passed.
    fn next_frame(&mut self, deadline: Instant) -> Option<Vec<u8>>;
}

pub struct DiscoveryScanner<T: LinkTransport> {
    transport: T,
    reply_window: Duration,
    stop: Arc<AtomicBool>,
}

impl<T: LinkTransport> DiscoveryScanner<T> {
    pub fn new(transport: T, stop: Arc<AtomicBool>) -> Self {
        Self {
            transport,
            reply_window: REPLY_WINDOW,
            stop,
        }
    }

    /// Writes one who-has request per candidate address in a single burst,
    /// then collects replies until the listening window closes. Zero
    /// replies yield an empty set, not an error.
    pub fn sweep(
        &mut self,
        intf: &SelectedInterface,
        subnet: &Subnet,
    ) -> Result<Vec<Device>, Error> {
        let hosts = subnet.hosts();
        debug!(interface = %intf.name, hosts = hosts.len(), "sending discovery burst");

        for target in &hosts {
            let frame = arp::request_frame(intf.mac, intf.addr, *target)
                .map_err(|e| Error::InterfaceUnusable(e.to_string()))?;
            self.transport
                .transmit(&frame)
                .map_err(|e| Error::InterfaceUnusable(format!("{}: {e}", intf.name)))?;
        }

        Ok(self.collect(intf, subnet))
    }

    /// Replies are deduplicated by sender address and kept in arrival order.
    fn collect(&mut self, intf: &SelectedInterface, subnet: &Subnet) -> Vec<Device> {
        let deadline = Instant::now() + self.reply_window;
        let mut devices: Vec<Device> = Vec::new();
        let mut seen: HashSet<Ipv4Addr> = HashSet::new();

        while !self.stop.load(Ordering::Relaxed) {
            let Some(frame) = self.transport.next_frame(deadline) else {
                break;
            };
            let Some((addr, mac)) = arp::parse_reply(&frame) else {
                continue;
            };
            if mac == intf.mac || !subnet.contains(addr) {
                continue;
            }
            if seen.insert(addr) {
                devices.push(Device::new(addr, mac));
            }
        }

        debug!(devices = devices.len(), "collection window closed");
        devices
    }
}
