//! # Controller
//!
//! The topology component: consumes link discovery events, keeps the live
//! topology, recomputes the spanning forest on every change, and reconciles
//! the redundant-link set into the minimal batch of port commands.
//!
//! ## Composition
//!
//! The controller is a standalone component implementing the
//! [`LinkObserver`] dispatch trait. Anything else interested in link events
//! (an L2 forwarding component, a metrics exporter) registers against the
//! same trait; there is no subclass relationship between forwarding and
//! loop prevention.
//!
//! ## Reconciliation contract
//!
//! A port is touched only when its loop-redundancy status actually changes.
//! The diff between the previous and the new redundant set is the ONLY
//! source of commands; links whose status is unchanged are never mentioned,
//! so stable links never flap.

use crate::costs::CostRegistry;
use crate::mst::minimum_spanning_forest;
use crate::ports::{PortCommand, PortControl};
use crate::topology::TopologySet;
use crate::types::{Dpid, Link, LinkCost, LinkEvent};
use std::collections::BTreeMap;

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Receiver of link discovery events.
///
/// Both the loop-prevention controller and any co-resident components
/// (forwarding, reporting) implement this and get the same notifications,
/// one at a time, in arrival order.
pub trait LinkObserver {
    /// A link was discovered.
    fn on_link_added(&mut self, event: &LinkEvent);

    /// A previously discovered link went away.
    fn on_link_removed(&mut self, event: &LinkEvent);
}

// =============================================================================
// REDUNDANT-SET COMPUTATION & DIFF
// =============================================================================

/// Topology links that are not part of the spanning forest, by equivalence
/// in either orientation. These are the loop-risk candidates.
#[must_use]
pub fn find_redundant(topology: &TopologySet, mst: &[Link]) -> Vec<Link> {
    topology
        .links()
        .iter()
        .copied()
        .filter(|l| !contains_equivalent(mst, l))
        .collect()
}

/// Diff two redundant sets into the minimal command batch.
///
/// Close commands (both endpoints) for every link newly redundant, then
/// open commands (both endpoints) for every link that rejoined the tree.
/// Links redundant in both sets produce nothing — that is the whole
/// anti-flapping contract.
#[must_use]
pub fn reconcile(previous: &[Link], current: &[Link]) -> Vec<PortCommand> {
    let mut commands = Vec::new();

    for link in current {
        if !contains_equivalent(previous, link) {
            commands.push(PortCommand::new(link.src, link.src_port, false));
            commands.push(PortCommand::new(link.dst, link.dst_port, false));
        }
    }

    for link in previous {
        if !contains_equivalent(current, link) {
            commands.push(PortCommand::new(link.src, link.src_port, true));
            commands.push(PortCommand::new(link.dst, link.dst_port, true));
        }
    }

    commands
}

fn contains_equivalent(set: &[Link], link: &Link) -> bool {
    set.contains(link) || set.contains(&link.inverse())
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// The loop-prevention controller.
///
/// Owns the cost registry, the live topology, the derived spanning forest
/// and redundant set, and the port-control sink. All mutation happens on a
/// single control-flow thread: each event is processed to completion
/// (recomputation + reconciliation + command emission) before the next one
/// is handled.
#[derive(Debug)]
pub struct Controller<P: PortControl> {
    costs: CostRegistry,
    topology: TopologySet,
    mst: Vec<Link>,
    redundant: Vec<Link>,
    sink: P,
}

impl<P: PortControl> Controller<P> {
    /// Create a controller with an empty cost table.
    #[must_use]
    pub fn new(sink: P) -> Self {
        Self::with_costs(sink, CostRegistry::new())
    }

    /// Create a controller with a pre-populated cost registry.
    #[must_use]
    pub fn with_costs(sink: P, costs: CostRegistry) -> Self {
        Self {
            costs,
            topology: TopologySet::new(),
            mst: Vec::new(),
            redundant: Vec::new(),
            sink,
        }
    }

    /// Handle a link-add notification.
    ///
    /// The link's cost is resolved through the cost registry NOW, at
    /// insertion time. Returns whether the topology changed (a re-report of
    /// a known link, in either orientation, is a no-op).
    pub fn link_added(&mut self, event: &LinkEvent) -> bool {
        let cost = self.costs.get_cost(event.src, event.dst);
        let link = Link::from_event(event, cost);

        if !self.topology.add(link) {
            return false;
        }
        self.update_links();
        true
    }

    /// Handle a link-remove notification.
    ///
    /// Removal is idempotent: a notification for a link never added (or
    /// already removed) changes nothing and is not an error.
    pub fn link_removed(&mut self, event: &LinkEvent) -> bool {
        let cost = self.costs.get_cost(event.src, event.dst);
        let link = Link::from_event(event, cost);

        if !self.topology.remove(&link) {
            return false;
        }
        self.update_links();
        true
    }

    /// Replace the entire cost table and recompute.
    ///
    /// Stored links carry insertion-time costs, so this is the explicit
    /// trigger that re-resolves every link against the new table before
    /// recomputing the forest — a configuration change can change which
    /// links are redundant with no physical topology change at all.
    pub fn set_costs(&mut self, table: BTreeMap<(Dpid, Dpid), LinkCost>) {
        self.costs.set_all(table);
        self.topology.refresh_costs(&mut self.costs);
        self.update_links();
    }

    /// The live topology.
    #[must_use]
    pub fn topology(&self) -> &TopologySet {
        &self.topology
    }

    /// The current spanning forest.
    #[must_use]
    pub fn mst_links(&self) -> &[Link] {
        &self.mst
    }

    /// The redundant set stored by the last reconciliation pass.
    #[must_use]
    pub fn redundant_links(&self) -> &[Link] {
        &self.redundant
    }

    /// The cost registry (read-only; mutation goes through
    /// [`Controller::set_costs`] so recomputation cannot be skipped).
    #[must_use]
    pub fn costs(&self) -> &CostRegistry {
        &self.costs
    }

    /// The port-control sink.
    #[must_use]
    pub fn sink(&self) -> &P {
        &self.sink
    }

    /// Recompute the forest and reconcile port state.
    fn update_links(&mut self) {
        self.mst = minimum_spanning_forest(&self.topology);
        let new_redundant = find_redundant(&self.topology, &self.mst);

        // Early exit on an empty redundant set: no commands are emitted and
        // the stored set is left as the previous value. Consequence: links
        // closed by an earlier pass are NOT reopened when the topology
        // becomes tree-shaped. Pinned by test; see DESIGN.md before
        // changing.
        if new_redundant.is_empty() {
            return;
        }

        for command in reconcile(&self.redundant, &new_redundant) {
            if let Err(e) = self
                .sink
                .set_port_state(command.dpid, command.port, command.open)
            {
                // A failed delivery is the sink's problem to surface; the
                // rest of the batch still goes out. The engine stays free
                // of logging dependencies, same as the rest of this crate.
                eprintln!(
                    "{{\"level\":\"warn\",\"target\":\"spantree_core::controller\",\"message\":\"port command {:?} failed: {}\"}}",
                    command, e
                );
            }
        }

        self.redundant = new_redundant;
    }
}

impl<P: PortControl> LinkObserver for Controller<P> {
    fn on_link_added(&mut self, event: &LinkEvent) {
        let _ = self.link_added(event);
    }

    fn on_link_removed(&mut self, event: &LinkEvent) {
        let _ = self.link_removed(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
