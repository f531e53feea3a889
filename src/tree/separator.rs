//! Separator cleanup for a filtered sibling list.

use super::node::PageNode;

/// Drop leading, trailing and repeated separators.
///
/// Non-separator nodes keep their order. Running this on its own output is a
/// no-op.
pub fn prune_separators(nodes: Vec<PageNode>) -> Vec<PageNode> {
    let mut kept: Vec<PageNode> = Vec::with_capacity(nodes.len());

    for node in nodes {
        if node.is_separator() && kept.last().is_none_or(PageNode::is_separator) {
            continue;
        }
        kept.push(node);
    }

    if kept.last().is_some_and(PageNode::is_separator) {
        kept.pop();
    }

    kept
}
