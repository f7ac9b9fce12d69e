//! Finding the deepest node at an offset.

use tracing::trace;
use tsz_pick_oracle::{NodeIndex, TypeOracle};

/// Descend from `root` to the deepest node whose full span contains `offset`.
///
/// A child contains the offset when `pos <= offset <= end`, where `pos`
/// includes leading trivia. Both ends are inclusive, so an offset on the
/// boundary between two siblings goes to the earlier one. When no child
/// contains the offset the current node is the answer; the search never fails.
pub fn locate<O: TypeOracle + ?Sized>(oracle: &O, root: NodeIndex, offset: u32) -> NodeIndex {
    let mut current = root;
    let mut depth = 0usize;

    while let Some(child) = oracle.node_children(current).into_iter().find(|&child| {
        oracle
            .node_span(child)
            .is_some_and(|span| span.contains(offset))
    }) {
        current = child;
        depth += 1;
    }

    trace!(
        offset,
        depth,
        kind = oracle.node_kind(current),
        "located node"
    );
    current
}
