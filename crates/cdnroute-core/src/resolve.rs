//! Clash detection and resolution.
//!
//! The initial assignment is replayed into an [`Occupancy`] table one client at a time. A client
//! whose path pushes some node past its capacity is a [`Clash`]. Clashing clients are then
//! rerouted, cheapest first, through a [capacity-aware search](crate::search) against the live
//! table. A client with no admissible path keeps its old one and is reported as unresolved.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};
use priority_queue::PriorityQueue;
use rustc_hash::FxHashMap;

use crate::network::{Network, NodeId, TimeStep};
use crate::occupancy::Occupancy;
use crate::problem::Client;
use crate::search::CapacityTree;
use crate::solution::{Assignment, Solution};
use crate::units::Payment;

/// A client whose path exceeded the capacity of `node` at time step `time`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_new::new, serde::Serialize, serde::Deserialize,
)]
pub struct Clash {
    pub client: NodeId,
    pub node: NodeId,
    pub time: TimeStep,
}

// Payment first, then registry position.
type Rank = (Payment, usize);

/// Owns the occupancy table and the assignment for one run. The resolver is the only thing that
/// mutates either.
#[derive(Debug)]
pub struct Resolver<'a> {
    network: &'a Network,
    clients: &'a [Client],
    ranks: FxHashMap<NodeId, Rank>,
    assignment: Assignment,
    occupancy: Occupancy,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over an initial assignment that holds exactly one path per client.
    pub fn new(network: &'a Network, clients: &'a [Client], assignment: Assignment) -> Self {
        let ranks = clients
            .iter()
            .enumerate()
            .map(|(i, c)| (c.node, (c.payment, i)))
            .collect();
        Self {
            network,
            clients,
            ranks,
            assignment,
            occupancy: Occupancy::new(),
        }
    }

    /// Get a reference to the resolver's occupancy table.
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// Get a reference to the resolver's current assignment.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Detects every clash in the assignment and reroutes the clashing clients.
    pub fn run(mut self) -> Solution {
        let clashes = self.detect_clashes();
        info!(
            "Found {} clashes among {} clients",
            clashes.len(),
            self.clients.len()
        );
        self.resolve(clashes)
    }

    /// Replays the assignment into the occupancy table, highest payment first (registry order
    /// among equal payments), and returns the clients that overflowed some node.
    ///
    /// This is a single forward pass. Each path is walked from the provider and every step is
    /// claimed. At the first step that exceeds capacity the claim is retracted, the client is
    /// recorded as a clash, and the rest of its path is skipped. Claims it made before that
    /// point stay in the table. The provider itself is never over capacity.
    fn detect_clashes(&mut self) -> Vec<Clash> {
        let provider = self.network.provider();
        let mut order = self.clients.iter().collect::<Vec<_>>();
        order.sort_by_key(|c| {
            let (payment, i) = self.ranks[&c.node];
            (Reverse(payment), i)
        });

        let mut clashes = Vec::new();
        for client in order {
            let Some(path) = self.assignment.get(&client.node) else {
                continue;
            };
            for (time, node) in path.steps() {
                let count = self.occupancy.claim(node, time);
                if node == provider {
                    continue;
                }
                let capacity = self.network.capacity(node).unwrap_or_default();
                if count > capacity {
                    self.occupancy.retract(node, time);
                    clashes.push(Clash::new(client.node, node, time));
                    break;
                }
            }
        }
        clashes
    }

    /// Reroutes each clashing client, lowest payment first. Every client is dequeued exactly
    /// once; a client that cannot be rerouted is not retried. `clashes` must come from
    /// `detect_clashes` on this resolver.
    fn resolve(mut self, clashes: Vec<Clash>) -> Solution {
        let mut queue = PriorityQueue::new();
        let mut pending = FxHashMap::default();
        for clash in &clashes {
            queue.push(clash.client, Reverse(self.ranks[&clash.client]));
            pending.insert(clash.client, *clash);
        }

        let mut rerouted = BTreeSet::new();
        let mut unresolved = BTreeSet::new();
        while let Some((client, Reverse((payment, _)))) = queue.pop() {
            let clash = pending[&client];
            let tree = CapacityTree::grow(self.network.topology(), &self.occupancy);
            match tree.path_to(client) {
                Some(path) => {
                    debug!("Rerouting client {client} ({payment}) along {path}");
                    // Only the steps before the clash were ever claimed
                    if let Some(old) = self.assignment.get(&client) {
                        self.occupancy.release(old, clash.time);
                    }
                    self.occupancy.commit(&path);
                    self.assignment.insert(client, path);
                    rerouted.insert(client);
                }
                None => {
                    warn!(
                        "No path to client {client} ({payment}) fits; node {} stays over capacity at step {}",
                        clash.node, clash.time
                    );
                    unresolved.insert(client);
                }
            }
        }
        self.into_solution(clashes, rerouted, unresolved)
    }

    fn into_solution(
        self,
        clashes: Vec<Clash>,
        rerouted: BTreeSet<NodeId>,
        unresolved: BTreeSet<NodeId>,
    ) -> Solution {
        let payments = self
            .clients
            .iter()
            .map(|c| (c.node, c.payment))
            .collect::<BTreeMap<_, _>>();
        let capacities = self
            .network
            .nodes()
            .map(|n| (n.id, n.capacity))
            .collect::<BTreeMap<_, _>>();
        Solution::new(
            self.network.provider(),
            self.assignment,
            payments,
            capacities,
            clashes,
            rerouted,
            unresolved,
        )
    }
}
