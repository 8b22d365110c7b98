//! This module defines the [`Solution`], the final path of every client together with a record
//! of which clients had to be rerouted and which could not be.

use std::collections::{BTreeMap, BTreeSet};

use crate::network::{NodeId, Path, TimeStep};
use crate::occupancy::Occupancy;
use crate::resolve::Clash;
use crate::units::{Packets, Payment};

/// A mapping from clients (by node) to their paths
pub type Assignment = BTreeMap<NodeId, Path>;

/// Whether every detected clash was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No client is left on an over-capacity path.
    Resolved,
    /// `count` clients could not be rerouted and keep paths that may exceed capacity.
    Unresolved { count: usize },
}

/// A `(node, time step)` pair whose load exceeds the node's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new, serde::Serialize)]
pub struct Violation {
    pub node: NodeId,
    pub time: TimeStep,
    pub load: Packets,
    pub capacity: Packets,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Solution {
    provider: NodeId,
    paths: Assignment,
    payments: BTreeMap<NodeId, Payment>,
    capacities: BTreeMap<NodeId, Packets>,
    clashes: Vec<Clash>,
    rerouted: BTreeSet<NodeId>,
    unresolved: BTreeSet<NodeId>,
}

impl Solution {
    pub(crate) fn new(
        provider: NodeId,
        paths: Assignment,
        payments: BTreeMap<NodeId, Payment>,
        capacities: BTreeMap<NodeId, Packets>,
        clashes: Vec<Clash>,
        rerouted: BTreeSet<NodeId>,
        unresolved: BTreeSet<NodeId>,
    ) -> Self {
        Self {
            provider,
            paths,
            payments,
            capacities,
            clashes,
            rerouted,
            unresolved,
        }
    }

    pub fn provider(&self) -> NodeId {
        self.provider
    }

    /// Get a reference to the final assignment.
    pub fn paths(&self) -> &Assignment {
        &self.paths
    }

    pub fn path(&self, client: NodeId) -> Option<&Path> {
        self.paths.get(&client)
    }

    pub fn payment(&self, client: NodeId) -> Option<Payment> {
        self.payments.get(&client).copied()
    }

    /// Clashes found by the initial pass, in detection order.
    pub fn clashes(&self) -> &[Clash] {
        &self.clashes
    }

    /// Clients whose paths were replaced.
    pub fn rerouted(&self) -> &BTreeSet<NodeId> {
        &self.rerouted
    }

    /// Clients whose clash could not be resolved.
    pub fn unresolved(&self) -> &BTreeSet<NodeId> {
        &self.unresolved
    }

    pub fn outcome(&self) -> Outcome {
        match self.unresolved.len() {
            0 => Outcome::Resolved,
            count => Outcome::Unresolved { count },
        }
    }

    /// Recomputes occupancy from the final paths.
    pub fn load(&self) -> Occupancy {
        Occupancy::from_paths(self.paths.values())
    }

    /// Every non-provider `(node, time step)` pair loaded beyond capacity by the final paths,
    /// ordered by node, then time step.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = self
            .load()
            .iter()
            .filter(|&(node, ..)| node != self.provider)
            .filter_map(|(node, time, load)| {
                let capacity = self.capacities.get(&node).copied().unwrap_or_default();
                (load > capacity).then(|| Violation::new(node, time, load, capacity))
            })
            .collect::<Vec<_>>();
        violations.sort_by_key(|v| (v.node, v.time));
        violations
    }

    delegate::delegate! {
        to self.paths {
            #[call(len)]
            pub fn nr_clients(&self) -> usize;
        }
    }
}
