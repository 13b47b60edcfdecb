//! # Engine Constants
//!
//! Hardcoded runtime constants for the spantree engine.
//!
//! The engine starts with zero topology but fixed policy. These values are
//! compiled into the binary and are immutable at runtime.

/// Cost assumed for any switch pair with no configured cost.
///
/// Every link is usable by default; configuration only ever *biases* the
/// tree, it never disconnects it.
pub const DEFAULT_LINK_COST: i64 = 1;

/// Maximum number of entries accepted in a single bulk cost update.
///
/// Bounds the work done while validating a configuration batch; a batch
/// larger than this is rejected before any parsing of individual entries.
pub const MAX_COST_ENTRIES: usize = 10_000;

/// Number of octets in the external rendering of a datapath id.
///
/// Datapath ids are 64-bit and render as 8 colon-separated hex octets,
/// zero-padded (dpid 1 → `00:00:00:00:00:00:00:01`).
pub const DPID_OCTETS: usize = 8;
