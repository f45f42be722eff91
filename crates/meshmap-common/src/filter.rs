use crate::node::Node;

/// Nodes last heard this long ago or earlier are stale.
pub const STALE_AFTER_SECS: u64 = 86_400;

/// A live single-hop peer: zero hops (or hops not reported), a reported SNR,
/// and heard within the last day. Coordinates play no part here.
pub fn is_direct_connection(node: &Node) -> bool {
    node.hops_away.is_zero_or_unknown()
        && node.signal_quality.is_some()
        && node.last_heard_secs < STALE_AFTER_SECS
}

pub fn direct_connections(nodes: impl IntoIterator<Item = Node>) -> Vec<Node> {
    nodes.into_iter().filter(is_direct_connection).collect()
}
