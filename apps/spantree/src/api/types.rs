//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Validation happens here, at the boundary, before anything reaches the
//! engine: a bulk cost update is parsed and checked in its entirety and
//! either applied whole or rejected whole.

use serde::{Deserialize, Serialize};
use spantree_core::{
    Dpid, LinkCost, LinkEvent, PortNo, SpantreeError, parse_cost_key,
    primitives::MAX_COST_ENTRIES,
};
use std::collections::BTreeMap;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Controller status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub switch_count: usize,
    pub link_count: usize,
    pub mst_size: usize,
    pub redundant_count: usize,
}

// =============================================================================
// COST UPDATE REQUEST/RESPONSE
// =============================================================================

/// Status string answered on a successful bulk cost update.
pub const COSTS_SET_STATUS: &str = "new topology costs set";

/// Status string answered when a bulk cost update fails validation.
pub const COSTS_REJECTED_STATUS: &str =
    "Error! Could not parse new topology costs, see log for details.";

/// Bulk cost update: a list of `{"<src>,<dst>": cost}` mappings.
///
/// The whole list validates before anything applies; one malformed entry
/// rejects the batch with no state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCostsRequest(pub Vec<BTreeMap<String, serde_json::Value>>);

impl SetCostsRequest {
    /// Validate every entry and build the replacement cost table.
    ///
    /// Keys must match `\d+,\d+`; values must be integers or
    /// floating-point numbers (floats truncate toward zero). Entry count is
    /// bounded by `MAX_COST_ENTRIES`.
    pub fn into_table(self) -> Result<BTreeMap<(Dpid, Dpid), LinkCost>, SpantreeError> {
        let entry_count: usize = self.0.iter().map(BTreeMap::len).sum();
        if entry_count > MAX_COST_ENTRIES {
            return Err(SpantreeError::SerializationError(format!(
                "Cost update has {} entries, maximum is {}",
                entry_count, MAX_COST_ENTRIES
            )));
        }

        let mut table = BTreeMap::new();
        for mapping in self.0 {
            for (key, value) in mapping {
                let pair = parse_cost_key(&key)?;
                let cost = cost_from_value(&key, &value)?;
                table.insert(pair, cost);
            }
        }
        Ok(table)
    }
}

/// Interpret a JSON value as an integer cost.
fn cost_from_value(key: &str, value: &serde_json::Value) -> Result<LinkCost, SpantreeError> {
    if let Some(int) = value.as_i64() {
        return Ok(LinkCost::new(int));
    }
    if let Some(float) = value.as_f64() {
        // Same truncation the original surface applied to float costs.
        return Ok(LinkCost::new(float as i64));
    }
    Err(SpantreeError::InvalidCostValue(key.to_string()))
}

/// Response for a bulk cost update, success or rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostUpdateResponse {
    pub status: String,
}

impl CostUpdateResponse {
    /// The success response.
    #[must_use]
    pub fn applied() -> Self {
        Self {
            status: COSTS_SET_STATUS.to_string(),
        }
    }

    /// The rejection response.
    #[must_use]
    pub fn rejected() -> Self {
        Self {
            status: COSTS_REJECTED_STATUS.to_string(),
        }
    }
}

// =============================================================================
// LINK EVENT REQUEST/RESPONSE
// =============================================================================

/// A link add/remove notification from the discovery collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkEventRequest {
    pub src: u64,
    pub src_port: u32,
    pub dst: u64,
    pub dst_port: u32,
}

impl LinkEventRequest {
    /// Convert to a core event, rejecting degenerate self-links.
    pub fn to_event(&self) -> Result<LinkEvent, SpantreeError> {
        if self.src == self.dst {
            return Err(SpantreeError::InvalidLinkEvent(format!(
                "switch {} linked to itself",
                self.src
            )));
        }
        Ok(LinkEvent::new(
            Dpid(self.src),
            PortNo(self.src_port),
            Dpid(self.dst),
            PortNo(self.dst_port),
        ))
    }
}

/// Response for a link add/remove notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkEventResponse {
    pub success: bool,
    /// Whether the topology actually changed (duplicate adds and unknown
    /// removals are no-ops, not errors).
    pub changed: bool,
    pub error: Option<String>,
}

impl LinkEventResponse {
    /// A processed event; `changed` reports whether the topology moved.
    #[must_use]
    pub fn processed(changed: bool) -> Self {
        Self {
            success: true,
            changed,
            error: None,
        }
    }

    /// A rejected event.
    #[must_use]
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            changed: false,
            error: Some(msg.into()),
        }
    }
}
