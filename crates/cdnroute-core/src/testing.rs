use crate::network::types::{Link, Node, NodeId};
use crate::problem::Client;

fn nodes(capacities: &[u64]) -> Vec<Node> {
    capacities
        .iter()
        .enumerate()
        .map(|(i, &c)| Node::new(NodeId::new(i), c))
        .collect()
}

fn links(pairs: &[(usize, usize)]) -> Vec<Link> {
    pairs
        .iter()
        .map(|&(a, b)| Link::new(NodeId::new(a), NodeId::new(b)))
        .collect()
}

pub(crate) fn client(node: usize, payment: u64) -> Client {
    Client::new(NodeId::new(node), payment)
}

/// 0 - 1 - 2, where node 1 can forward two packets per step.
pub(crate) fn chain_config() -> (Vec<Node>, Vec<Link>) {
    (nodes(&[1, 2, 1]), links(&[(0, 1), (1, 2)]))
}

/// The provider has two neighbors, 1 (capacity 1) and 2 (capacity 5). Clients at 3 and 4 can
/// only be reached through 1, and 2 is a dead end.
pub(crate) fn bottleneck_config() -> (Vec<Node>, Vec<Link>) {
    (
        nodes(&[1, 1, 5, 5, 5]),
        links(&[(0, 1), (0, 2), (1, 3), (1, 4)]),
    )
}

/// Clients at 4 and 5 are both two hops away through node 1 (capacity 1), but 5 can also be
/// reached in three hops through 2 and 3.
pub(crate) fn detour_config() -> (Vec<Node>, Vec<Link>) {
    (
        nodes(&[1, 1, 5, 5, 5, 5]),
        links(&[(0, 1), (0, 2), (1, 4), (1, 5), (2, 3), (3, 5)]),
    )
}

/// Nodes 3 and 4 are each reachable in two hops through either 1 (capacity 1) or 2
/// (capacity 5).
pub(crate) fn diamond_config() -> (Vec<Node>, Vec<Link>) {
    (
        nodes(&[5, 1, 5, 5, 5]),
        links(&[(0, 1), (0, 2), (1, 3), (1, 4), (2, 3), (2, 4)]),
    )
}

/// Three clients (3, 4, 5) behind node 1 (capacity 1). Node 2 (capacity 1) offers a second way to
/// reach 4 and 5.
pub(crate) fn fanout_config() -> (Vec<Node>, Vec<Link>) {
    (
        nodes(&[1, 1, 1, 5, 5, 5]),
        links(&[(0, 1), (0, 2), (1, 3), (1, 4), (1, 5), (2, 4), (2, 5)]),
    )
}

/// A client at 4 shares node 2 (capacity 2) with the client at 3 at step 1, then overflows node 3
/// (capacity 1) at step 2. The client at 5 is first routed through node 1, which has no capacity,
/// and can only reach 5 through node 2 at step 1. Nodes 6 and 7 (capacity 1) offer 4 a detour.
pub(crate) fn staggered_config() -> (Vec<Node>, Vec<Link>) {
    (
        nodes(&[1, 0, 2, 1, 5, 5, 1, 1]),
        links(&[
            (0, 1),
            (0, 2),
            (0, 6),
            (1, 5),
            (2, 3),
            (2, 5),
            (3, 4),
            (4, 7),
            (6, 7),
        ]),
    )
}
