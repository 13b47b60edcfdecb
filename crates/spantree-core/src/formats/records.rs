//! # Edge Records
//!
//! The external representation of a topology link, as consumed by the
//! reporting surface: `{sourceSwitch, sourcePort, destinationSwitch,
//! destinationPort, cost}`, with switches rendered as colon-separated hex
//! octets.
//!
//! The hex rendering is bit-for-bit significant — existing consumers parse
//! it — so it is pinned by test vectors and must not change shape.

use crate::types::{Dpid, Link};
use serde::{Deserialize, Serialize};

// =============================================================================
// DPID RENDERING
// =============================================================================

/// Render a datapath id as 8 colon-separated hex octets, zero-padded.
///
/// `Dpid(1)` → `"00:00:00:00:00:00:00:01"`.
#[must_use]
pub fn dpid_hex(dpid: Dpid) -> String {
    let octets: Vec<String> = dpid
        .0
        .to_be_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();
    octets.join(":")
}

// =============================================================================
// LINK RECORD
// =============================================================================

/// One topology link in the external edge-record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Source switch as a hex-octet string.
    pub source_switch: String,
    /// Port on the source switch.
    pub source_port: u32,
    /// Destination switch as a hex-octet string.
    pub destination_switch: String,
    /// Port on the destination switch.
    pub destination_port: u32,
    /// Insertion-time cost of the link.
    pub cost: i64,
}

impl From<&Link> for LinkRecord {
    fn from(link: &Link) -> Self {
        Self {
            source_switch: dpid_hex(link.src),
            source_port: link.src_port.0,
            destination_switch: dpid_hex(link.dst),
            destination_port: link.dst_port.0,
            cost: link.cost.value(),
        }
    }
}

impl LinkRecord {
    /// Render a slice of links in order.
    #[must_use]
    pub fn from_links(links: &[Link]) -> Vec<Self> {
        links.iter().map(Self::from).collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
