//! This module defines the [`Network`], a validated [`Topology`] paired with its capacity-blind
//! shortest-path routes from the provider.

mod routing;
pub mod topology;
pub mod types;

pub use topology::{Topology, TopologyError};
pub use types::*;

pub(crate) use routing::{trace_back, Predecessors};

use crate::units::Packets;

use self::routing::Routes;

#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    routes: Routes,
}

impl Network {
    pub fn new(nodes: &[Node], links: &[Link], provider: NodeId) -> Result<Self, TopologyError> {
        let topology = Topology::new(nodes, links, provider)?;
        let routes = Routes::new(&topology);
        Ok(Self { topology, routes })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The shortest path from the provider to `dst`, ignoring capacities, or `None` if `dst`
    /// is unreachable.
    pub fn shortest_path(&self, dst: NodeId) -> Option<Path> {
        self.routes.path_to(dst)
    }

    delegate::delegate! {
        to self.topology {
            pub fn provider(&self) -> NodeId;

            pub fn capacity(&self, id: NodeId) -> Option<Packets>;

            pub fn neighbors(&self, id: NodeId) -> &[NodeId];

            pub fn nodes(&self) -> impl Iterator<Item = &Node>;

            pub fn links(&self) -> &[Link];
        }
    }
}
