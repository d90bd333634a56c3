use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;
use tracing::warn;

use crate::error::Error;

/// The address range reachable on one interface's link, with the CIDR
/// prefix derived from the dotted-decimal mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    pub addr: Ipv4Addr,
    pub mask: String,
    /// Total set-bit count across the mask octets, 0-32.
    pub prefix: u8,
}

impl Subnet {
    /// Derives the prefix length from `mask` by summing the set bits of
    /// each octet.
    pub fn resolve(addr: Ipv4Addr, mask: &str) -> Result<Self, Error> {
        let prefix = prefix_from_mask(mask)?;
        Ok(Self {
            addr,
            mask: mask.to_string(),
            prefix,
        })
    }

    /// Candidate host addresses, excluding the network and broadcast
    /// addresses. Networks too small to strip both scan the full range.
    pub fn hosts(&self) -> Vec<Ipv4Addr> {
        let Ok(network) = Ipv4Network::new(self.addr, self.prefix) else {
            return Vec::new();
        };

        let start = u32::from(network.network()).saturating_add(1);
        let end = u32::from(network.broadcast()).saturating_sub(1);

        if start > end {
            warn!("network too small to strip broadcast, scanning full range");
            let lo = u32::from(network.network());
            let hi = u32::from(network.broadcast());
            return (lo..=hi).map(Ipv4Addr::from).collect();
        }

        (start..=end).map(Ipv4Addr::from).collect()
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        Ipv4Network::new(self.addr, self.prefix)
            .map(|network| network.contains(addr))
            .unwrap_or(false)
    }
}

fn prefix_from_mask(mask: &str) -> Result<u8, Error> {
    let octets: Vec<&str> = mask.split('.').collect();
    if octets.len() != 4 {
        return Err(Error::MalformedMask(mask.to_string()));
    }

    let mut prefix: u8 = 0;
    for octet in octets {
        let value: u8 = octet
            .parse()
            .map_err(|_| Error::MalformedMask(mask.to_string()))?;
        prefix += value.count_ones() as u8;
    }
    Ok(prefix)
}
