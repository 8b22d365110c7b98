use itertools::Itertools;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use crate::network::types::{Link, Node, NodeId, Path};
use crate::units::Packets;

/// An immutable network graph with a single content provider.
#[derive(Debug, Clone)]
pub struct Topology {
    pub(crate) graph: DiGraph<Node, ()>,
    provider: NodeId,
    id2idx: FxHashMap<NodeId, NodeIndex>,
    // Neighbors of every node in ascending ID order, which fixes the traversal order of every
    // search over this topology.
    neighbors: FxHashMap<NodeId, Vec<NodeId>>,
    links: Vec<Link>,
}

impl Topology {
    /// Creates a network topology from a list of nodes, a list of links, and the ID of the
    /// content provider. This function returns an error if the given specification fails to
    /// produce a valid topology.
    ///
    /// Correctness properties:
    ///
    /// - Every node must have a unique ID.
    /// - The provider must be declared in `nodes`.
    /// - Every link must have distinct endpoints in `nodes`.
    /// - For any two nodes, there must be at most one link between them.
    pub fn new(nodes: &[Node], links: &[Link], provider: NodeId) -> Result<Self, TopologyError> {
        let mut g = DiGraph::new();
        let mut id2idx = FxHashMap::default();
        for n in nodes.iter().cloned() {
            let id = n.id;
            let idx = g.add_node(n);
            // CORRECTNESS: Every node must have a unique ID.
            if id2idx.insert(id, idx).is_some() {
                return Err(TopologyError::DuplicateNodeId(id));
            }
        }
        // CORRECTNESS: The provider must be declared in `nodes`.
        if !id2idx.contains_key(&provider) {
            return Err(TopologyError::UndeclaredProvider(provider));
        }
        for &Link { a, b } in links {
            // CORRECTNESS: Every link must have distinct endpoints in `nodes`.
            if a == b {
                return Err(TopologyError::NodeAdjacentSelf(a));
            }
            let i = *id2idx.get(&a).ok_or(TopologyError::UndeclaredNode(a))?;
            let j = *id2idx.get(&b).ok_or(TopologyError::UndeclaredNode(b))?;
            // CORRECTNESS: For any two nodes, there must be at most one link between them.
            if g.contains_edge(i, j) {
                return Err(TopologyError::DuplicateLink { n1: a, n2: b });
            }
            // Links are bidirectional
            g.add_edge(i, j, ());
            g.add_edge(j, i, ());
        }
        let neighbors: FxHashMap<NodeId, Vec<NodeId>> = g
            .node_indices()
            .map(|i| {
                let ids: Vec<NodeId> = g.neighbors(i).map(|j| g[j].id).sorted().collect();
                (g[i].id, ids)
            })
            .collect();
        Ok(Self {
            graph: g,
            provider,
            id2idx,
            neighbors,
            links: links.to_vec(),
        })
    }

    pub fn provider(&self) -> NodeId {
        self.provider
    }

    pub fn capacity(&self, id: NodeId) -> Option<Packets> {
        self.id2idx.get(&id).map(|&idx| self.graph[idx].capacity)
    }

    /// Neighbors of `id` in ascending ID order. Unknown nodes have no neighbors.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.neighbors.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_edge(&self, a: NodeId, b: NodeId) -> bool {
        match (self.id2idx.get(&a), self.id2idx.get(&b)) {
            (Some(&i), Some(&j)) => self.graph.contains_edge(i, j),
            _ => false,
        }
    }

    /// Returns true if `path` starts at the provider, ends at `dst`, and only follows links of
    /// this topology.
    pub fn is_route(&self, path: &Path, dst: NodeId) -> bool {
        path.source() == Some(self.provider)
            && path.destination() == Some(dst)
            && path
                .nodes()
                .iter()
                .tuple_windows()
                .all(|(&a, &b)| self.is_edge(a, b))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub(crate) fn idx_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id2idx.get(&id).copied()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("Duplicate node ID {0}")]
    DuplicateNodeId(NodeId),

    #[error("Provider {0} is not declared")]
    UndeclaredProvider(NodeId),

    #[error("Node {0} is connected to itself")]
    NodeAdjacentSelf(NodeId),

    #[error("Node {0} is not declared")]
    UndeclaredNode(NodeId),

    #[error("Duplicate links between {n1} and {n2}")]
    DuplicateLink { n1: NodeId, n2: NodeId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn node(id: usize) -> Node {
        Node::new(NodeId::new(id), 1)
    }

    fn link(a: usize, b: usize) -> Link {
        Link::new(NodeId::new(a), NodeId::new(b))
    }

    #[test]
    fn single_node_topology_succeeds() {
        assert!(
            Topology::new(&[node(0)], &[], NodeId::new(0)).is_ok(),
            "failed to create single-node topology"
        );
    }

    #[test]
    fn detour_topology_succeeds() {
        let (nodes, links) = testing::detour_config();
        let res = Topology::new(&nodes, &links, NodeId::new(0));
        assert!(res.is_ok());
    }

    #[test]
    fn neighbors_are_sorted() -> anyhow::Result<()> {
        let nodes = (0..4).map(node).collect::<Vec<_>>();
        // Declared in descending order on purpose
        let links = [link(0, 3), link(0, 2), link(0, 1)];
        let topo = Topology::new(&nodes, &links, NodeId::new(0))?;
        assert_eq!(
            topo.neighbors(NodeId::new(0)),
            &[NodeId::new(1), NodeId::new(2), NodeId::new(3)]
        );
        assert_eq!(topo.neighbors(NodeId::new(3)), &[NodeId::new(0)]);
        assert!(topo.neighbors(NodeId::new(42)).is_empty());
        Ok(())
    }

    #[test]
    fn links_are_bidirectional() -> anyhow::Result<()> {
        let topo = Topology::new(&[node(0), node(1)], &[link(0, 1)], NodeId::new(0))?;
        assert!(topo.is_edge(NodeId::new(0), NodeId::new(1)));
        assert!(topo.is_edge(NodeId::new(1), NodeId::new(0)));
        assert!(!topo.is_edge(NodeId::new(0), NodeId::new(0)));
        Ok(())
    }

    #[test]
    fn route_checks() -> anyhow::Result<()> {
        let (nodes, links) = testing::detour_config();
        let topo = Topology::new(&nodes, &links, NodeId::new(0))?;
        let path = |ids: &[usize]| Path::new(ids.iter().copied().map(NodeId::new).collect());
        assert!(topo.is_route(&path(&[0, 2, 3, 5]), NodeId::new(5)));
        // Wrong destination
        assert!(!topo.is_route(&path(&[0, 2, 3, 5]), NodeId::new(3)));
        // Doesn't start at the provider
        assert!(!topo.is_route(&path(&[2, 3, 5]), NodeId::new(5)));
        // 0 and 3 aren't adjacent
        assert!(!topo.is_route(&path(&[0, 3, 5]), NodeId::new(5)));
        Ok(())
    }

    #[test]
    fn duplicate_node_fails() {
        let res = Topology::new(&[node(0), node(0)], &[], NodeId::new(0));
        assert!(matches!(res, Err(TopologyError::DuplicateNodeId(..))));
    }

    #[test]
    fn undeclared_provider_fails() {
        let res = Topology::new(&[node(0), node(1)], &[link(0, 1)], NodeId::new(7));
        assert!(matches!(res, Err(TopologyError::UndeclaredProvider(..))));
    }

    #[test]
    fn node_adjacent_self_fails() {
        let res = Topology::new(&[node(0), node(1)], &[link(0, 1), link(1, 1)], NodeId::new(0));
        assert!(matches!(res, Err(TopologyError::NodeAdjacentSelf(..))));
    }

    #[test]
    fn undeclared_node_fails() {
        let res = Topology::new(&[node(0), node(1)], &[link(0, 1), link(1, 2)], NodeId::new(0));
        assert!(matches!(res, Err(TopologyError::UndeclaredNode(..))));
    }

    #[test]
    fn duplicate_links_fails() {
        let res = Topology::new(&[node(0), node(1)], &[link(0, 1), link(1, 0)], NodeId::new(0));
        assert!(matches!(res, Err(TopologyError::DuplicateLink { .. })));
    }
}
