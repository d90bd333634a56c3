use std::net::Ipv4Addr;

use pnet::datalink::MacAddr;

use crate::net::subnet::Subnet;

/// Placeholder for any name lookup that could not be completed.
pub const UNKNOWN: &str = "Unknown";

/// One host that answered the discovery broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub addr: Ipv4Addr,
    pub mac: MacAddr,
    /// Reverse-resolved name, or [`UNKNOWN`].
    pub hostname: String,
}

impl Device {
    pub fn new(addr: Ipv4Addr, mac: MacAddr) -> Self {
        Self {
            addr,
            mac,
            hostname: UNKNOWN.to_string(),
        }
    }
}

/// One completed discovery cycle.
///
/// Built fresh every cycle, handed to the reporting collaborators and then
/// dropped; no history is kept across cycles.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub subnet: Subnet,
    /// Devices in reply-arrival order.
    pub devices: Vec<Device>,
    /// Advertised network name (SSID), or [`UNKNOWN`].
    pub network_name: String,
    /// Name of the interface the cycle ran on.
    pub interface: String,
}
