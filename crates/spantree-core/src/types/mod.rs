//! # Core Type Definitions
//!
//! This module contains all core types for the spantree deterministic
//! topology engine:
//! - Switch and port identifiers (`Dpid`, `PortNo`, `LinkCost`)
//! - The link model (`Link`, `LinkEvent`)
//! - Error types (`SpantreeError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where needed for deterministic ordering in
//!   `BTreeMap`/`BTreeSet`
//!
//! ## Link Equivalence
//!
//! `Link` equality is defined ONLY over the four endpoint fields
//! (`src`, `dst`, `src_port`, `dst_port`) — cost is excluded. The same
//! physical link reported from either endpoint must collapse to a single
//! topology entry even if cost lookup differed transiently between the two
//! observations. The swapped orientation is reached through
//! [`Link::inverse`]; containment checks test both.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// SWITCH & PORT IDENTIFIERS
// =============================================================================

/// Datapath identifier of a switch in the topology.
///
/// Rendered externally as 8 colon-separated hex octets (see
/// [`crate::formats::dpid_hex`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dpid(pub u64);

/// Physical port number on a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortNo(pub u32);

/// Cost of a topology link.
///
/// Costs come from the cost registry, never from the wire; any pair of
/// switches without a configured cost gets the default cost.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct LinkCost(pub i64);

impl LinkCost {
    /// Create a new link cost with the given value.
    #[must_use]
    pub const fn new(cost: i64) -> Self {
        Self(cost)
    }

    /// Get the raw cost value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

// =============================================================================
// LINK
// =============================================================================

/// A discovered physical link between two switch ports.
///
/// A `Link` is created when the discovery collaborator reports the link and
/// destroyed when the matching removal arrives; it is never mutated in
/// place. The cost is resolved through the [`crate::costs::CostRegistry`]
/// at insertion time, so later registry changes do not retroactively alter
/// a stored link without an explicit recomputation trigger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Link {
    /// Source switch.
    pub src: Dpid,
    /// Destination switch.
    pub dst: Dpid,
    /// Port on the source switch.
    pub src_port: PortNo,
    /// Port on the destination switch.
    pub dst_port: PortNo,
    /// Cost resolved at insertion time. Excluded from equality.
    pub cost: LinkCost,
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.src == other.src
            && self.dst == other.dst
            && self.src_port == other.src_port
            && self.dst_port == other.dst_port
    }
}

impl Eq for Link {}

impl Link {
    /// Create a new link.
    #[must_use]
    pub const fn new(
        src: Dpid,
        dst: Dpid,
        src_port: PortNo,
        dst_port: PortNo,
        cost: LinkCost,
    ) -> Self {
        Self {
            src,
            dst,
            src_port,
            dst_port,
            cost,
        }
    }

    /// Build a link from a discovery event with an already-resolved cost.
    #[must_use]
    pub const fn from_event(event: &LinkEvent, cost: LinkCost) -> Self {
        Self::new(event.src, event.dst, event.src_port, event.dst_port, cost)
    }

    /// The same physical link observed from the other endpoint.
    #[must_use]
    pub const fn inverse(self) -> Self {
        Self {
            src: self.dst,
            dst: self.src,
            src_port: self.dst_port,
            dst_port: self.src_port,
            cost: self.cost,
        }
    }
}

// =============================================================================
// LINK EVENT
// =============================================================================

/// A link add/remove notification from the topology-discovery collaborator.
///
/// Carries no cost: cost is a controller-side configuration concern and is
/// resolved through the cost registry when the link enters the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEvent {
    /// Source switch.
    pub src: Dpid,
    /// Port on the source switch.
    pub src_port: PortNo,
    /// Destination switch.
    pub dst: Dpid,
    /// Port on the destination switch.
    pub dst_port: PortNo,
}

impl LinkEvent {
    /// Create a new link event.
    #[must_use]
    pub const fn new(src: Dpid, src_port: PortNo, dst: Dpid, dst_port: PortNo) -> Self {
        Self {
            src,
            src_port,
            dst,
            dst_port,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the spantree system.
///
/// - No silent failures
/// - Use `Result<T, SpantreeError>` for fallible operations
/// - The engine should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum SpantreeError {
    /// A cost-table key did not match the `<src>,<dst>` pattern.
    #[error("Invalid cost key '{0}': expected '<src>,<dst>' with decimal switch ids")]
    InvalidCostKey(String),

    /// A cost-table value was not an integer or floating-point number.
    #[error("Invalid cost value for key '{0}': expected a number")]
    InvalidCostValue(String),

    /// A link notification failed boundary validation.
    #[error("Invalid link event: {0}")]
    InvalidLinkEvent(String),

    /// A port command referenced a switch with no known mapping.
    #[error("Unknown switch: {0:?}")]
    UnknownSwitch(Dpid),

    /// A port command referenced a port with no known mapping.
    #[error("Unknown port {1:?} on switch {0:?}")]
    UnknownPort(Dpid, PortNo),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
