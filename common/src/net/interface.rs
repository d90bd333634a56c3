use std::net::Ipv4Addr;

use pnet::datalink::{self, MacAddr, NetworkInterface};
use pnet::ipnetwork::IpNetwork;

use crate::error::Error;

/// The interface chosen for one scan cycle, with the pieces the scanner
/// needs pulled out of the system view. Never mutated after selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedInterface {
    pub name: String,
    pub addr: Ipv4Addr,
    /// Dotted-decimal netmask, as reported by the system.
    pub netmask: String,
    pub mac: MacAddr,
}

/// Read-only system query for the available interfaces.
pub fn available() -> Vec<NetworkInterface> {
    datalink::interfaces()
}

/// Picks exactly one interface to scan on: an explicitly configured name
/// first, then the platform's conventional default, then the first name
/// matching the platform's wireless prefix.
pub fn select(
    interfaces: &[NetworkInterface],
    configured: Option<&str>,
    default_name: Option<&str>,
    wireless_prefix: Option<&str>,
) -> Result<SelectedInterface, Error> {
    let by_name = |name: &str| interfaces.iter().find(|intf| intf.name == name);

    let candidate = configured
        .and_then(by_name)
        .or_else(|| default_name.and_then(by_name))
        .or_else(|| {
            wireless_prefix
                .and_then(|prefix| interfaces.iter().find(|intf| intf.name.starts_with(prefix)))
        });

    let Some(intf) = candidate else {
        return Err(Error::InterfaceUnusable(
            "no interface matched the configured name or the platform heuristic".into(),
        ));
    };

    extract(intf)
}

/// Requires a non-loopback IPv4 network and a hardware address.
fn extract(intf: &NetworkInterface) -> Result<SelectedInterface, Error> {
    let ipv4_net = intf.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) if !v4.ip().is_loopback() => Some(*v4),
        _ => None,
    });
    let Some(ipv4_net) = ipv4_net else {
        return Err(Error::InterfaceUnusable(format!(
            "{} has no usable IPv4 address",
            intf.name
        )));
    };
    let Some(mac) = intf.mac else {
        return Err(Error::InterfaceUnusable(format!(
            "{} has no hardware address",
            intf.name
        )));
    };

    Ok(SelectedInterface {
        name: intf.name.clone(),
        addr: ipv4_net.ip(),
        netmask: ipv4_net.mask().to_string(),
        mac,
    })
}
