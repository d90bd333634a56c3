//! Reverse hostname resolution for discovered devices.

use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use dns_lookup::lookup_addr;
use tracing::debug;
use whoshere_common::net::device::Device;

/// Upper bound on a single reverse lookup.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Fills in hostnames sequentially, in reply-arrival order. A failed
/// lookup leaves the sentinel in place and never affects the other
/// devices.
pub async fn resolve_hostnames(devices: &mut [Device], stop: &Arc<AtomicBool>) {
    for device in devices.iter_mut() {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        match reverse_lookup(IpAddr::V4(device.addr)).await {
            Some(hostname) => device.hostname = hostname,
            None => debug!(addr = %device.addr, "no hostname, keeping the sentinel"),
        }
    }
}

async fn reverse_lookup(addr: IpAddr) -> Option<String> {
    let lookup = tokio::task::spawn_blocking(move || {
        // Some resolvers echo the address back instead of failing; treat
        // that as no result.
        lookup_addr(&addr)
            .ok()
            .filter(|hostname| *hostname != addr.to_string())
    });
    tokio::time::timeout(LOOKUP_TIMEOUT, lookup).await.ok()?.ok()?
}
