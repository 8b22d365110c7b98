use std::collections::VecDeque;

use petgraph::visit::{VisitMap, Visitable};
use rustc_hash::FxHashMap;

use crate::network::{
    topology::Topology,
    types::{NodeId, Path},
};

/// A mapping from each reached node to the node it was reached from.
pub(crate) type Predecessors = FxHashMap<NodeId, NodeId>;

/// Capacity-blind shortest paths from the provider to every reachable node.
#[derive(Debug, Clone)]
pub(crate) struct Routes {
    root: NodeId,
    preds: Predecessors,
}

impl Routes {
    /// Builds a shortest-path tree rooted at the provider using BFS. Ties between equally short
    /// paths are broken by the topology's neighbor order.
    pub(crate) fn new(topology: &Topology) -> Self {
        let g = &topology.graph;
        let root = topology.provider();
        let mut discovered = g.visit_map();
        // The provider is always declared in a valid topology
        let start = topology.idx_of(root).expect("provider missing from topology");
        discovered.visit(start);

        let mut queue = VecDeque::new();
        queue.push_back(root);

        let mut preds = Predecessors::default();
        while let Some(n) = queue.pop_front() {
            for &succ in topology.neighbors(n) {
                // Neighbors are declared nodes by construction
                let idx = topology.idx_of(succ).expect("neighbor missing from topology");
                if discovered.visit(idx) {
                    preds.insert(succ, n);
                    queue.push_back(succ);
                }
            }
        }
        Self { root, preds }
    }

    /// Reconstructs the shortest path from the provider to `dst`, or `None` if `dst` cannot be
    /// reached.
    pub(crate) fn path_to(&self, dst: NodeId) -> Option<Path> {
        trace_back(&self.preds, self.root, dst)
    }
}

/// Walks predecessor links from `dst` back to `root`. A node other than `root` with no recorded
/// predecessor was never reached.
pub(crate) fn trace_back(preds: &Predecessors, root: NodeId, dst: NodeId) -> Option<Path> {
    if dst != root && !preds.contains_key(&dst) {
        return None;
    }
    let mut nodes = vec![dst];
    let mut cur = dst;
    while let Some(&prev) = preds.get(&cur) {
        nodes.push(prev);
        cur = prev;
    }
    nodes.reverse();
    Some(Path::new(nodes))
}
