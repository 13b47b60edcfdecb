//! # Cost Registry
//!
//! Process-wide table mapping an unordered switch pair to a link cost.
//!
//! One registry instance lives inside the controller and is passed to
//! whoever needs cost resolution — there is no global singleton. Storage is
//! `BTreeMap` for deterministic iteration.
//!
//! Keys keep the orientation they were written with: `set_cost(a, b, c)`
//! stores under `(a, b)` only, and lookup checks `(a, b)` then `(b, a)`.
//! Whether an unset lookup also writes the default back into the table is an
//! explicit construction-time choice (`persisting_defaults`); both
//! behaviors exist in deployed configurations, so neither is hardcoded.

use crate::primitives::DEFAULT_LINK_COST;
use crate::types::{Dpid, LinkCost, SpantreeError};
use std::collections::BTreeMap;

// =============================================================================
// KEY PARSING
// =============================================================================

/// Parse a `"<src>,<dst>"` cost key into a switch pair.
///
/// The key must be exactly two decimal unsigned integers joined by a single
/// comma — no sign, no spaces, no hex. Anything else is rejected, and a
/// bulk update containing one rejected key must be discarded in its
/// entirety by the caller.
pub fn parse_cost_key(key: &str) -> Result<(Dpid, Dpid), SpantreeError> {
    let Some((src, dst)) = key.split_once(',') else {
        return Err(SpantreeError::InvalidCostKey(key.to_string()));
    };

    let parse_dpid = |part: &str| -> Result<Dpid, SpantreeError> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SpantreeError::InvalidCostKey(key.to_string()));
        }
        part.parse::<u64>()
            .map(Dpid)
            .map_err(|_| SpantreeError::InvalidCostKey(key.to_string()))
    };

    Ok((parse_dpid(src)?, parse_dpid(dst)?))
}

/// Render a switch pair as the external `"<src>,<dst>"` key form.
#[must_use]
pub fn render_cost_key(src: Dpid, dst: Dpid) -> String {
    format!("{},{}", src.0, dst.0)
}

// =============================================================================
// COST REGISTRY
// =============================================================================

/// Keyed store of configured link costs.
///
/// A lookup for `(a, b)` and `(b, a)` always returns the same value; a pair
/// never configured resolves to [`DEFAULT_LINK_COST`].
#[derive(Debug, Clone, Default)]
pub struct CostRegistry {
    /// Cost table keyed in the orientation each entry was written with.
    table: BTreeMap<(Dpid, Dpid), LinkCost>,

    /// Whether an unset lookup writes the default back under the reversed
    /// key. Off by default: lookups on a non-persisting registry are pure.
    persist_default: bool,
}

impl CostRegistry {
    /// Create an empty, non-persisting registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that persists defaults on first lookup.
    ///
    /// Under this variant, `get_cost(a, b)` on an unset pair stores
    /// `DEFAULT_LINK_COST` under `(b, a)` before returning it, so the pair
    /// shows up in the configuration listing afterwards.
    #[must_use]
    pub fn persisting_defaults() -> Self {
        Self {
            table: BTreeMap::new(),
            persist_default: true,
        }
    }

    /// Look up the cost for an unordered switch pair.
    ///
    /// Checks the `(src, dst)` orientation first, then `(dst, src)`, then
    /// falls back to the default cost.
    pub fn get_cost(&mut self, src: Dpid, dst: Dpid) -> LinkCost {
        if let Some(&cost) = self.table.get(&(src, dst)) {
            return cost;
        }
        if let Some(&cost) = self.table.get(&(dst, src)) {
            return cost;
        }

        let cost = LinkCost::new(DEFAULT_LINK_COST);
        if self.persist_default {
            self.table.insert((dst, src), cost);
        }
        cost
    }

    /// Store a cost keyed by `(src, dst)` in the orientation given.
    ///
    /// Does not also write `(dst, src)`; symmetry comes from the two-step
    /// lookup in [`CostRegistry::get_cost`].
    pub fn set_cost(&mut self, src: Dpid, dst: Dpid, cost: LinkCost) {
        self.table.insert((src, dst), cost);
    }

    /// Replace the entire cost table.
    ///
    /// The owning controller must follow this with a full cost refresh and
    /// MST recomputation: a configuration change can change which links are
    /// redundant even though the physical topology did not change.
    pub fn set_all(&mut self, table: BTreeMap<(Dpid, Dpid), LinkCost>) {
        self.table = table;
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no stored entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// All stored entries in deterministic key order.
    pub fn entries(&self) -> impl Iterator<Item = ((Dpid, Dpid), LinkCost)> + '_ {
        self.table.iter().map(|(&pair, &cost)| (pair, cost))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_pair_returns_default() {
        let mut costs = CostRegistry::new();
        assert_eq!(
            costs.get_cost(Dpid(10), Dpid(20)),
            LinkCost::new(DEFAULT_LINK_COST)
        );
    }

    #[test]
    fn lookup_is_symmetric() {
        let mut costs = CostRegistry::new();
        costs.set_cost(Dpid(1), Dpid(2), LinkCost::new(10));

        assert_eq!(costs.get_cost(Dpid(1), Dpid(2)), LinkCost::new(10));
        assert_eq!(costs.get_cost(Dpid(2), Dpid(1)), LinkCost::new(10));
    }

    #[test]
    fn set_cost_stores_single_orientation() {
        let mut costs = CostRegistry::new();
        costs.set_cost(Dpid(1), Dpid(2), LinkCost::new(10));

        assert_eq!(costs.len(), 1);
        let keys: Vec<_> = costs.entries().map(|(pair, _)| pair).collect();
        assert_eq!(keys, vec![(Dpid(1), Dpid(2))]);
    }

    #[test]
    fn stored_orientation_wins_over_reverse() {
        let mut costs = CostRegistry::new();
        costs.set_cost(Dpid(1), Dpid(2), LinkCost::new(10));
        costs.set_cost(Dpid(2), Dpid(1), LinkCost::new(20));

        // (src, dst) orientation is checked first.
        assert_eq!(costs.get_cost(Dpid(1), Dpid(2)), LinkCost::new(10));
        assert_eq!(costs.get_cost(Dpid(2), Dpid(1)), LinkCost::new(20));
    }

    #[test]
    fn non_persisting_lookup_leaves_table_untouched() {
        let mut costs = CostRegistry::new();
        let _ = costs.get_cost(Dpid(5), Dpid(6));
        assert!(costs.is_empty());
    }

    #[test]
    fn persisting_lookup_writes_reversed_key() {
        let mut costs = CostRegistry::persisting_defaults();
        let _ = costs.get_cost(Dpid(5), Dpid(6));

        assert_eq!(costs.len(), 1);
        let keys: Vec<_> = costs.entries().map(|(pair, _)| pair).collect();
        assert_eq!(keys, vec![(Dpid(6), Dpid(5))]);

        // Second lookup sees the persisted entry, same value.
        assert_eq!(
            costs.get_cost(Dpid(5), Dpid(6)),
            LinkCost::new(DEFAULT_LINK_COST)
        );
        assert_eq!(costs.len(), 1);
    }

    #[test]
    fn set_all_replaces_table() {
        let mut costs = CostRegistry::new();
        costs.set_cost(Dpid(1), Dpid(2), LinkCost::new(10));

        let mut table = BTreeMap::new();
        table.insert((Dpid(3), Dpid(4)), LinkCost::new(7));
        costs.set_all(table);

        assert_eq!(costs.len(), 1);
        assert_eq!(
            costs.get_cost(Dpid(1), Dpid(2)),
            LinkCost::new(DEFAULT_LINK_COST)
        );
        assert_eq!(costs.get_cost(Dpid(4), Dpid(3)), LinkCost::new(7));
    }

    #[test]
    fn parse_cost_key_accepts_decimal_pairs() {
        assert_eq!(
            parse_cost_key("1,2").ok(),
            Some((Dpid(1), Dpid(2)))
        );
        assert_eq!(
            parse_cost_key("18446744073709551615,0").ok(),
            Some((Dpid(u64::MAX), Dpid(0)))
        );
    }

    #[test]
    fn parse_cost_key_rejects_malformed_keys() {
        for bad in ["", "1", "1,", ",2", "1,2,3", "a,2", "1,b", " 1,2", "1, 2", "-1,2", "0x1,2"] {
            assert!(parse_cost_key(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn render_parse_roundtrip() {
        let key = render_cost_key(Dpid(17), Dpid(42));
        assert_eq!(key, "17,42");
        assert_eq!(parse_cost_key(&key).ok(), Some((Dpid(17), Dpid(42))));
    }
}
