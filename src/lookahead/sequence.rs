//! Sequences
//!
//! Only the leading run of optional children, up to and including the first
//! required child, can supply the first terminal of a sequence. The required
//! set comes from that first required child alone.

use crate::base::NodeId;
use crate::grammar::ChildRef;

use super::cache::LookupCache;
use super::context::LookaheadContext;

/// `source` is in the leading optional run or is the first required child
pub(super) fn could_start_with_child(children: &[ChildRef], source: NodeId) -> bool {
    for child in children {
        if child.node == source {
            return true;
        }
        if !child.optional {
            return false;
        }
    }
    false
}

/// `source` is the first required child
pub(super) fn should_start_with_child(children: &[ChildRef], source: NodeId) -> bool {
    children
        .iter()
        .find(|child| !child.optional)
        .is_some_and(|child| child.node == source)
}

pub(super) fn is_possible_contribution(
    children: &[ChildRef],
    source_cache: &LookupCache,
    leaf: NodeId,
    source: NodeId,
) -> bool {
    could_start_with_child(children, source) && source_cache.possible_leaves.contains(&leaf)
}

pub(super) fn is_required_contribution(
    children: &[ChildRef],
    source_cache: &LookupCache,
    leaf: NodeId,
    source: NodeId,
) -> bool {
    should_start_with_child(children, source) && source_cache.required_leaves.contains(&leaf)
}

/// Children a context-filtered walk enters, in declaration order. A required
/// child ends the run even when the context filters it out.
pub(super) fn first_children(children: &[ChildRef], ctx: &LookaheadContext) -> Vec<NodeId> {
    let mut first = Vec::new();
    for child in children {
        if ctx.check(child) {
            first.push(child.node);
        }
        if !child.optional {
            break;
        }
    }
    first
}
