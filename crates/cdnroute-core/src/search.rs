//! Capacity-aware breadth-first search.
//!
//! Distance from the provider doubles as the time step at which a packet passes through a node,
//! so a node can only be entered at time `t` if its committed occupancy at `t` leaves room for one
//! more packet. The search reads the occupancy table but never writes it.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::network::{trace_back, NodeId, Path, Predecessors, TimeStep, Topology};
use crate::occupancy::Occupancy;

/// The result of one capacity-aware search from the provider: for every reached node, the node it
/// was reached from and the time step at which it was reached.
#[derive(Debug, Clone)]
pub struct CapacityTree {
    root: NodeId,
    preds: Predecessors,
    arrivals: FxHashMap<NodeId, TimeStep>,
}

impl CapacityTree {
    /// Searches the whole topology against the current `occupancy`.
    pub fn grow(topology: &Topology, occupancy: &Occupancy) -> Self {
        let root = topology.provider();
        let mut arrivals: FxHashMap<NodeId, TimeStep> = [(root, 0)].into_iter().collect();
        let mut preds = Predecessors::default();

        let mut queue = VecDeque::new();
        queue.push_back(root);

        while let Some(n) = queue.pop_front() {
            let next = arrivals[&n] + 1;
            for &m in topology.neighbors(n) {
                if m == root || arrivals.contains_key(&m) {
                    continue;
                }
                // Neighbors are declared nodes by construction
                let capacity = topology.capacity(m).expect("neighbor missing from topology");
                // A full node is not marked as reached, so it may still be entered later
                // through a longer path.
                if occupancy.has_room(m, next, capacity) {
                    arrivals.insert(m, next);
                    preds.insert(m, n);
                    queue.push_back(m);
                }
            }
        }
        Self {
            root,
            preds,
            arrivals,
        }
    }

    /// The path to `dst` within this tree, or `None` if capacity left no way to reach it.
    pub fn path_to(&self, dst: NodeId) -> Option<Path> {
        trace_back(&self.preds, self.root, dst)
    }

    /// The time step at which `node` was reached, if it was.
    pub fn arrival(&self, node: NodeId) -> Option<TimeStep> {
        self.arrivals.get(&node).copied()
    }

    delegate::delegate! {
        to self.arrivals {
            #[call(len)]
            pub fn nr_reached(&self) -> usize;
        }
    }
}

/// Finds a path to `dst` that does not push any node over capacity given `occupancy`.
pub fn search(topology: &Topology, occupancy: &Occupancy, dst: NodeId) -> Option<Path> {
    CapacityTree::grow(topology, occupancy).path_to(dst)
}
