//! Per-node, per-time-step packet counts.

use rustc_hash::FxHashMap;

use crate::network::types::{NodeId, Path, TimeStep};
use crate::units::Packets;

/// The number of packets scheduled to pass through each node at each time step. Missing entries
/// are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    inner: FxHashMap<(NodeId, TimeStep), Packets>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies every `(node, time step)` pair visited by `paths`.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        let mut occupancy = Self::new();
        for path in paths {
            occupancy.commit(path);
        }
        occupancy
    }

    pub fn get(&self, node: NodeId, time: TimeStep) -> Packets {
        self.inner.get(&(node, time)).copied().unwrap_or_default()
    }

    /// Returns true if one more packet fits through `node` at `time`.
    pub fn has_room(&self, node: NodeId, time: TimeStep, capacity: Packets) -> bool {
        self.get(node, time) < capacity
    }

    /// Adds one packet at `(node, time)` and returns the new count.
    pub(crate) fn claim(&mut self, node: NodeId, time: TimeStep) -> Packets {
        let count = self.inner.entry((node, time)).or_default();
        *count += Packets::ONE;
        *count
    }

    /// Removes one packet at `(node, time)`. Entries never drop below zero.
    pub(crate) fn retract(&mut self, node: NodeId, time: TimeStep) {
        if let Some(count) = self.inner.get_mut(&(node, time)) {
            *count -= Packets::ONE;
            if *count == Packets::ZERO {
                self.inner.remove(&(node, time));
            }
        }
    }

    /// Claims every step of `path`.
    pub(crate) fn commit(&mut self, path: &Path) {
        for (time, node) in path.steps() {
            self.claim(node, time);
        }
    }

    /// Retracts the first `len` steps of `path`.
    pub(crate) fn release(&mut self, path: &Path, len: usize) {
        for (time, node) in path.steps().take(len) {
            self.retract(node, time);
        }
    }

    /// Iterates over all nonzero entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, TimeStep, Packets)> + '_ {
        self.inner
            .iter()
            .map(|(&(node, time), &count)| (node, time, count))
    }
}
