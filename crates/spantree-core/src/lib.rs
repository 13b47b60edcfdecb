//! # spantree-core
//!
//! The deterministic topology/MST engine for spantree - THE ENGINE.
//!
//! This crate implements the control-plane analogue of a distributed
//! spanning-tree protocol, computed centrally from a complete topology
//! view: it models discovered links, resolves per-pair costs, computes a
//! minimum spanning forest with Kruskal's algorithm, and reconciles the
//! redundant-link set into the minimal batch of port open/close commands.
//!
//! ## Architectural Constraints
//!
//! - Single logical thread of control: every notification is processed to
//!   completion before the next one is handled
//! - Deterministic: same link multiset in, same forest out, every time —
//!   `BTreeMap` ordering, integer costs, a strict total edge order
//! - The wire layer stays behind the [`ports::PortControl`] trait; this
//!   crate has NO async and NO network dependencies

// =============================================================================
// MODULES
// =============================================================================

pub mod controller;
pub mod costs;
pub mod formats;
pub mod mst;
pub mod ports;
pub mod primitives;
pub mod topology;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Dpid, Link, LinkCost, LinkEvent, PortNo, SpantreeError};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use controller::{Controller, LinkObserver, find_redundant, reconcile};
pub use costs::{CostRegistry, parse_cost_key, render_cost_key};
pub use mst::{DisjointSet, minimum_spanning_forest};
pub use ports::{PortCommand, PortControl, RecordingPortControl};
pub use topology::TopologySet;

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{LinkRecord, dpid_hex};
