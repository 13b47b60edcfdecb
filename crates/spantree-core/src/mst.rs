//! # MST Engine
//!
//! Kruskal's minimum spanning forest over the live topology.
//!
//! Determinism is the whole point: the same input edge multiset must always
//! yield the same forest, or reconciliation would flap ports on topologies
//! that did not change. Two ingredients guarantee it:
//!
//! - The union-find structure is allocated fresh per call. No state is
//!   carried across invocations, so vertices that left the topology can
//!   never leak stale partition data into a later run.
//! - Edges are sorted by the strict total order
//!   `(cost, src, dst, src_port, dst_port)`. Equal-cost edges between the
//!   same switch pair (parallel links on different ports) still order
//!   deterministically by their port numbers.

use crate::topology::TopologySet;
use crate::types::{Dpid, Link};
use std::collections::BTreeMap;

// =============================================================================
// DISJOINT SET (UNION-FIND)
// =============================================================================

/// Union-find over switch ids, scoped to a single forest computation.
///
/// Union by rank, find with path compression. The rank bookkeeping is a
/// performance choice with no externally observable effect: which edge wins
/// among equal-cost alternatives is fixed by the edge sort, not by the
/// union-find internals.
#[derive(Debug, Default)]
pub struct DisjointSet {
    parent: BTreeMap<Dpid, Dpid>,
    rank: BTreeMap<Dpid, u32>,
}

impl DisjointSet {
    /// Create an empty structure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex as its own singleton partition.
    pub fn insert(&mut self, vertex: Dpid) {
        self.parent.entry(vertex).or_insert(vertex);
        self.rank.entry(vertex).or_insert(0);
    }

    /// Find the partition root of a vertex, compressing the path walked.
    ///
    /// A vertex never inserted is its own root.
    pub fn find(&mut self, vertex: Dpid) -> Dpid {
        let mut root = vertex;
        while let Some(&p) = self.parent.get(&root) {
            if p == root {
                break;
            }
            root = p;
        }

        // Point everything on the walked path directly at the root.
        let mut current = vertex;
        while let Some(&p) = self.parent.get(&current) {
            if p == current {
                break;
            }
            self.parent.insert(current, root);
            current = p;
        }

        root
    }

    /// Merge the partitions of two vertices.
    ///
    /// Returns `true` if they were in different partitions (and are now
    /// merged), `false` if they already shared a root.
    pub fn union(&mut self, a: Dpid, b: Dpid) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        let rank_a = self.rank.get(&root_a).copied().unwrap_or(0);
        let rank_b = self.rank.get(&root_b).copied().unwrap_or(0);

        if rank_a > rank_b {
            self.parent.insert(root_b, root_a);
        } else {
            self.parent.insert(root_a, root_b);
            if rank_a == rank_b {
                self.rank.insert(root_b, rank_b.saturating_add(1));
            }
        }

        true
    }
}

// =============================================================================
// KRUSKAL
// =============================================================================

/// Compute the minimum spanning forest of the topology.
///
/// Returns a subset of the topology's links (by value) forming one tree per
/// connected component. An empty topology yields an empty forest; a
/// disconnected topology yields a forest, not an error.
#[must_use]
pub fn minimum_spanning_forest(topology: &TopologySet) -> Vec<Link> {
    let mut partitions = DisjointSet::new();
    for switch in topology.switches() {
        partitions.insert(switch);
    }

    let mut edges: Vec<Link> = topology.links().to_vec();
    edges.sort_by_key(|l| (l.cost, l.src, l.dst, l.src_port, l.dst_port));

    let mut forest = Vec::new();
    for link in edges {
        // Accepting an edge whose endpoints already share a partition would
        // close a cycle.
        if partitions.union(link.src, link.dst) {
            forest.push(link);
        }
    }

    forest
}

// =============================================================================
// TESTS
// =============================================================================
