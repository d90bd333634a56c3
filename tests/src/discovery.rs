//! Discovery through the public scanner API, driven by a scripted
//! transport instead of a privileged socket.

use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use pnet::datalink::MacAddr;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, MutableEthernetPacket};
use whoshere_common::net::device::UNKNOWN;
use whoshere_common::net::interface::SelectedInterface;
use whoshere_common::net::subnet::Subnet;
use whoshere_core::resolver;
use whoshere_core::scanner::arp::{ARP_LEN, ETH_HDR_LEN, MIN_FRAME_LEN};
use whoshere_core::scanner::{DiscoveryScanner, LinkTransport};

struct ScriptedTransport {
    replies: VecDeque<Vec<u8>>,
}

impl LinkTransport for ScriptedTransport {
    fn transmit(&mut self, _frame: &[u8]) -> anyhow::Result<()> {
        Ok(())
    }

    fn next_frame(&mut self, _deadline: Instant) -> Option<Vec<u8>> {
        self.replies.pop_front()
    }
}

fn scan_interface() -> SelectedInterface {
    SelectedInterface {
        name: "test0".to_string(),
        addr: Ipv4Addr::new(10, 0, 0, 100),
        netmask: "255.255.255.0".to_string(),
        mac: MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff),
    }
}

fn reply_frame(sender_addr: Ipv4Addr, sender_mac: MacAddr) -> Vec<u8> {
    let local = scan_interface();
    let mut buffer = vec![0u8; MIN_FRAME_LEN];
    {
        let mut eth = MutableEthernetPacket::new(&mut buffer).unwrap();
        eth.set_source(sender_mac);
        eth.set_destination(local.mac);
        eth.set_ethertype(EtherTypes::Arp);
    }
    let mut arp = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN]).unwrap();
    arp.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp.set_protocol_type(EtherTypes::Ipv4);
    arp.set_hw_addr_len(6);
    arp.set_proto_addr_len(4);
    arp.set_operation(ArpOperations::Reply);
    arp.set_sender_hw_addr(sender_mac);
    arp.set_sender_proto_addr(sender_addr);
    arp.set_target_hw_addr(local.mac);
    arp.set_target_proto_addr(local.addr);
    buffer
}

#[test]
fn silent_segment_yields_an_empty_device_set() {
    let intf = scan_interface();
    let subnet = Subnet::resolve(intf.addr, &intf.netmask).unwrap();
    let transport = ScriptedTransport {
        replies: VecDeque::new(),
    };

    let stop = Arc::new(AtomicBool::new(false));
    let mut scanner = DiscoveryScanner::new(transport, stop);
    let devices = scanner.sweep(&intf, &subnet).unwrap();
    assert!(devices.is_empty());
}

#[tokio::test]
async fn replies_flow_through_to_resolved_devices_in_order() {
    let intf = scan_interface();
    let subnet = Subnet::resolve(intf.addr, &intf.netmask).unwrap();
    let replies: VecDeque<Vec<u8>> = vec![
        reply_frame(Ipv4Addr::new(10, 0, 0, 9), MacAddr::new(1, 1, 1, 1, 1, 1)),
        reply_frame(Ipv4Addr::new(10, 0, 0, 2), MacAddr::new(2, 2, 2, 2, 2, 2)),
    ]
    .into();

    let stop = Arc::new(AtomicBool::new(false));
    let mut scanner = DiscoveryScanner::new(ScriptedTransport { replies }, stop.clone());
    let mut devices = scanner.sweep(&intf, &subnet).unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].addr, Ipv4Addr::new(10, 0, 0, 9));
    assert_eq!(devices[1].addr, Ipv4Addr::new(10, 0, 0, 2));

    // Private test addresses have no PTR records, so resolution leaves
    // every sentinel in place without disturbing the order.
    resolver::resolve_hostnames(&mut devices, &stop).await;
    assert_eq!(devices[0].addr, Ipv4Addr::new(10, 0, 0, 9));
    assert_eq!(devices[1].addr, Ipv4Addr::new(10, 0, 0, 2));
    assert!(devices.iter().all(|device| !device.hostname.is_empty()));
}

#[tokio::test]
async fn stopped_resolution_keeps_the_sentinel() {
    let stop = Arc::new(AtomicBool::new(true));
    let mut devices = vec![whoshere_common::net::device::Device::new(
        Ipv4Addr::new(10, 0, 0, 9),
        MacAddr::new(1, 1, 1, 1, 1, 1),
    )];

    resolver::resolve_hostnames(&mut devices, &stop).await;
    assert_eq!(devices[0].hostname, UNKNOWN);
}
