use log::info;

use crate::network::{Network, NodeId};
use crate::problem::{Client, Problem, ProblemError};
use crate::resolve::Resolver;
use crate::solution::{Assignment, Solution};

/// The core routing routine. This validates a problem instance and turns it into a solution in
/// which, unless the solution reports unresolved clients, no node forwards more packets in a time
/// step than its capacity allows.
///
/// This function returns an error if the problem is invalid or some client cannot be reached
/// from the provider at all.
pub fn run(problem: Problem) -> Result<Solution, Error> {
    let problem = problem.validate()?;
    solve(problem.network(), problem.clients())
}

/// Routes `clients` over an already-built `network`.
pub fn solve(network: &Network, clients: &[Client]) -> Result<Solution, Error> {
    let assignment = initial_assignment(network, clients)?;
    let solution = Resolver::new(network, clients, assignment).run();
    info!(
        "Rerouted {} clients, {} left unresolved",
        solution.rerouted().len(),
        solution.unresolved().len()
    );
    Ok(solution)
}

/// Gives every client its capacity-blind shortest path from the provider.
pub fn initial_assignment(network: &Network, clients: &[Client]) -> Result<Assignment, Error> {
    clients
        .iter()
        .map(|&Client { node, .. }| {
            network
                .shortest_path(node)
                .map(|path| (node, path))
                .ok_or(Error::UnreachableClient(node))
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidProblem(#[from] ProblemError),

    #[error("client {0} is unreachable from the provider")]
    UnreachableClient(NodeId),
}
