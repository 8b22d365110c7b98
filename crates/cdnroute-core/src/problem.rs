//! This module defines problem instances ([`Problem`]), which consist of a topology, a content
//! provider, and a registry of paying clients.

use std::collections::HashSet;

use crate::network::{Link, Network, Node, NodeId, TopologyError};
use crate::units::Payment;

/// A client sitting on a topology node. Lower payments are rerouted first when capacity runs
/// out.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Client {
    pub node: NodeId,
    pub payment: Payment,
}

impl Client {
    pub fn new(node: NodeId, payment: u64) -> Self {
        Self {
            node,
            payment: Payment::new(payment),
        }
    }
}

/// A problem instance.
#[derive(Debug, Clone, typed_builder::TypedBuilder, serde::Serialize, serde::Deserialize)]
pub struct Problem {
    /// Topology nodes.
    pub nodes: Vec<Node>,
    /// Topology links.
    pub links: Vec<Link>,
    /// The content provider.
    pub provider: NodeId,
    /// Clients, in registry order.
    pub clients: Vec<Client>,
}

impl Problem {
    /// Validate a problem, producing a `ValidProblem`.
    ///
    /// Correctness properties:
    ///
    /// - Every client must sit on a declared node
    /// - No client may sit on the provider
    /// - No two clients may share a node
    pub fn validate(self) -> Result<ValidProblem, ProblemError> {
        let declared = self.nodes.iter().map(|n| n.id).collect::<HashSet<_>>();
        let mut seen = HashSet::new();
        for &Client { node, .. } in &self.clients {
            // CORRECTNESS: Every client must sit on a declared node.
            if !declared.contains(&node) {
                return Err(ProblemError::UndeclaredClient(node));
            }
            // CORRECTNESS: No client may sit on the provider.
            if node == self.provider {
                return Err(ProblemError::ClientAtProvider(node));
            }
            // CORRECTNESS: No two clients may share a node.
            if !seen.insert(node) {
                return Err(ProblemError::DuplicateClient(node));
            }
        }
        let network = Network::new(&self.nodes, &self.links, self.provider)?;
        Ok(ValidProblem {
            network,
            clients: self.clients,
        })
    }
}

/// A `ValidProblem` is a `Problem` that has been validated. The topology and the clients are
/// guaranteed to satisfy properties listed in `Topology::new()` and `Problem::validate()`.
#[derive(Debug)]
pub struct ValidProblem {
    network: Network,
    clients: Vec<Client>,
}

impl ValidProblem {
    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }
}

/// Problem validation error.
#[derive(Debug, thiserror::Error)]
pub enum ProblemError {
    /// A client sits on a node missing from the topology.
    #[error("client node {0} is not declared")]
    UndeclaredClient(NodeId),

    /// A client sits on the provider.
    #[error("client node {0} is the provider")]
    ClientAtProvider(NodeId),

    /// Two clients share a node.
    #[error("more than one client on node {0}")]
    DuplicateClient(NodeId),

    /// The topology is invalid.
    #[error("invalid topology")]
    InvalidTopology(#[from] TopologyError),
}
