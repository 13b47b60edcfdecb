//! # Topology Set
//!
//! The controller's live, deduplicated collection of currently-known links.
//!
//! Uniqueness invariant: no two elements are equivalent under link
//! equivalence, in either orientation. The collection is insertion-ordered;
//! every derived value (MST, redundant set) gets its determinism from the
//! MST engine's total sort order, not from this container.

use crate::costs::CostRegistry;
use crate::types::{Dpid, Link};
use std::collections::BTreeSet;

/// The live set of discovered links.
#[derive(Debug, Clone, Default)]
pub struct TopologySet {
    links: Vec<Link>,
}

impl TopologySet {
    /// Create an empty topology.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a link unless it (or its swapped orientation) is already
    /// present. Returns whether the topology changed.
    ///
    /// Callers resolve the link's cost through the cost registry BEFORE
    /// insertion; the set never performs cost lookups on its own.
    pub fn add(&mut self, link: Link) -> bool {
        if self.contains(&link) || self.contains_inverse(&link) {
            return false;
        }
        self.links.push(link);
        true
    }

    /// Remove a link by equivalence, in either orientation. Returns whether
    /// a removal occurred; removing an unknown link is a no-op.
    pub fn remove(&mut self, link: &Link) -> bool {
        let mut removed = false;

        if let Some(idx) = self.links.iter().position(|l| l == link) {
            self.links.remove(idx);
            removed = true;
        }

        let inverse = link.inverse();
        if let Some(idx) = self.links.iter().position(|l| *l == inverse) {
            self.links.remove(idx);
            removed = true;
        }

        removed
    }

    /// Whether an equivalent link is present in the stored orientation.
    #[must_use]
    pub fn contains(&self, link: &Link) -> bool {
        self.links.contains(link)
    }

    /// Whether the swapped orientation of the link is present.
    #[must_use]
    pub fn contains_inverse(&self, link: &Link) -> bool {
        self.links.contains(&link.inverse())
    }

    /// All links in insertion order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the topology has no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All switch ids appearing as an endpoint, deduplicated and sorted.
    #[must_use]
    pub fn switches(&self) -> BTreeSet<Dpid> {
        self.links
            .iter()
            .flat_map(|l| [l.src, l.dst])
            .collect()
    }

    /// Re-resolve every link's cost from the registry.
    ///
    /// Links carry the cost they were inserted with; this is the explicit
    /// recomputation trigger that lets a bulk configuration change reach
    /// links already in the set. Links are rebuilt, not patched, so the
    /// "never mutated in place" lifecycle holds.
    pub fn refresh_costs(&mut self, costs: &mut CostRegistry) {
        self.links = self
            .links
            .iter()
            .map(|l| Link::new(l.src, l.dst, l.src_port, l.dst_port, costs.get_cost(l.src, l.dst)))
            .collect();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LinkCost, PortNo};

    fn link(src: u64, dst: u64, src_port: u32, dst_port: u32, cost: i64) -> Link {
        Link::new(
            Dpid(src),
            Dpid(dst),
            PortNo(src_port),
            PortNo(dst_port),
            LinkCost::new(cost),
        )
    }

    #[test]
    fn add_then_contains() {
        let mut topo = TopologySet::new();
        let l = link(1, 2, 1, 1, 1);

        assert!(topo.add(l));
        assert!(topo.contains(&l));
        assert_eq!(topo.len(), 1);
    }

    #[test]
    fn duplicate_add_is_noop() {
        let mut topo = TopologySet::new();
        let l = link(1, 2, 1, 1, 1);

        assert!(topo.add(l));
        assert!(!topo.add(l));
        assert_eq!(topo.len(), 1);
    }

    #[test]
    fn inverse_add_is_noop() {
        let mut topo = TopologySet::new();
        let l = link(1, 2, 1, 1, 1);

        assert!(topo.add(l));
        assert!(!topo.add(l.inverse()));
        assert_eq!(topo.len(), 1);
    }

    #[test]
    fn containment_is_symmetric_across_orientations() {
        let mut topo = TopologySet::new();
        let l = link(1, 2, 3, 4, 1);
        topo.add(l);

        let swapped = l.inverse();
        assert_eq!(
            topo.contains(&l) || topo.contains_inverse(&l),
            topo.contains(&swapped) || topo.contains_inverse(&swapped),
        );
    }

    #[test]
    fn remove_by_either_orientation() {
        let mut topo = TopologySet::new();
        let l = link(1, 2, 1, 1, 1);

        topo.add(l);
        assert!(topo.remove(&l.inverse()));
        assert!(topo.is_empty());

        topo.add(l);
        assert!(topo.remove(&l));
        assert!(topo.is_empty());
    }

    #[test]
    fn remove_unknown_link_is_noop() {
        let mut topo = TopologySet::new();
        topo.add(link(1, 2, 1, 1, 1));

        assert!(!topo.remove(&link(3, 4, 1, 1, 1)));
        assert_eq!(topo.len(), 1);
    }

    #[test]
    fn switches_are_sorted_and_deduplicated() {
        let mut topo = TopologySet::new();
        topo.add(link(3, 1, 1, 1, 1));
        topo.add(link(2, 3, 2, 2, 1));

        let switches: Vec<_> = topo.switches().into_iter().collect();
        assert_eq!(switches, vec![Dpid(1), Dpid(2), Dpid(3)]);
    }

    #[test]
    fn refresh_costs_applies_new_table() {
        let mut topo = TopologySet::new();
        topo.add(link(1, 2, 1, 1, 1));
        topo.add(link(2, 3, 2, 1, 1));

        let mut costs = CostRegistry::new();
        costs.set_cost(Dpid(2), Dpid(1), LinkCost::new(40));
        topo.refresh_costs(&mut costs);

        // (1,2) resolves through the reversed stored key; (2,3) falls back
        // to the default.
        assert_eq!(topo.links()[0].cost, LinkCost::new(40));
        assert_eq!(topo.links()[1].cost, LinkCost::new(1));
    }
}
