//! The pnet-backed ethernet channel.

use std::time::{Duration, Instant};

use anyhow::Context;
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use whoshere_common::error::Error;
use whoshere_common::net::interface::SelectedInterface;

use super::LinkTransport;

/// Receive poll interval; keeps the collect loop responsive to the
/// deadline and the stop flag.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

pub struct EthernetTransport {
    tx: Box<dyn DataLinkSender>,
    rx: Box<dyn DataLinkReceiver>,
}

impl EthernetTransport {
    /// Binds the raw channel for one scan cycle. The channel is released
    /// when the transport is dropped at the end of the cycle.
    pub fn open(intf: &SelectedInterface) -> Result<Self, Error> {
        let interfaces = datalink::interfaces();
        let network_intf = interfaces
            .iter()
            .find(|candidate| candidate.name == intf.name)
            .ok_or_else(|| {
                Error::InterfaceUnusable(format!("{} disappeared before the scan", intf.name))
            })?;

        open_ethernet_channel(network_intf)
            .map_err(|e| Error::InterfaceUnusable(format!("{}: {e:#}", intf.name)))
    }
}

fn open_ethernet_channel(intf: &NetworkInterface) -> anyhow::Result<EthernetTransport> {
    let cfg = Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Config::default()
    };
    let channel = datalink::channel(intf, cfg)
        .with_context(|| format!("opening channel on {}", intf.name))?;
    match channel {
        Channel::Ethernet(tx, rx) => Ok(EthernetTransport { tx, rx }),
        _ => anyhow::bail!("non-ethernet channel for {}", intf.name),
    }
}

impl LinkTransport for EthernetTransport {
    fn transmit(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        match self.tx.send_to(frame, None) {
            Some(Ok(())) => Ok(()),
            Some(Err(e)) => Err(e.into()),
            None => anyhow::bail!("datalink sender refused the frame"),
        }
    }

    fn next_frame(&mut self, deadline: Instant) -> Option<Vec<u8>> {
        while Instant::now() < deadline {
            // Err here is the read timeout elapsing; re-check the deadline.
            match self.rx.next() {
                Ok(frame) => return Some(frame.to_vec()),
                Err(_) => continue,
            }
        }
        None
    }
}
