#![warn(unreachable_pub, missing_debug_implementations)]

//! The core routing library. This crate defines [the routine](run::run) that turns a
//! [problem instance](Problem) into a [solution](Solution): one delivery path per client from the
//! content provider such that, wherever rerouting succeeds, no node forwards more packets in a
//! time step than its capacity allows.

#[macro_use]
mod ident;
mod units;

pub mod network;
pub mod occupancy;
pub mod problem;
pub mod resolve;
pub mod run;
pub mod search;
pub mod solution;

#[cfg(test)]
pub(crate) mod testing;

pub use network::{Link, Network, Node, NodeId, Path, TimeStep, Topology, TopologyError};
pub use occupancy::Occupancy;
pub use problem::{Client, Problem, ProblemError, ValidProblem};
pub use resolve::{Clash, Resolver};
pub use run::{run, solve, Error};
pub use search::CapacityTree;
pub use solution::{Assignment, Outcome, Solution, Violation};
pub use units::{Packets, Payment};
