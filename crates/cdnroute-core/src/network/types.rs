use crate::units::Packets;

// A node in the topology. Clients are identified by the node they sit on.
identifier!(NodeId, usize);

/// Index of a node within a path. The provider sits at time step 0 and each hop advances the
/// clock by one.
pub type TimeStep = usize;

/// A node and the number of packets it can forward per time step.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub capacity: Packets,
}

impl Node {
    pub fn new(id: NodeId, capacity: u64) -> Self {
        Self {
            id,
            capacity: Packets::new(capacity),
        }
    }
}

/// An undirected link between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
}

impl Link {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self { a, b }
    }
}

/// A delivery path. The first node is the provider, the last is the client, and the position of
/// each node is the time step at which the packet passes through it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of hops, which is also the time step at which the packet arrives.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Iterates over `(time step, node)` pairs from the provider to the client.
    pub fn steps(&self) -> impl Iterator<Item = (TimeStep, NodeId)> + '_ {
        self.nodes.iter().copied().enumerate()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for id in &self.nodes {
            if !first {
                write!(f, " -> ")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}
