//! Iterations
//!
//! An iteration is transparent for lookahead except for its wrapping: the
//! wrapping-begin terminal joins the body's first terminals. A mandatory
//! wrapping also becomes the only required first terminal.

use crate::base::NodeId;
use crate::grammar::Wrapping;

use super::cache::LookupCache;

pub(super) fn is_possible_contribution(
    body: NodeId,
    wrapping: Option<&Wrapping>,
    body_cache: &LookupCache,
    leaf: NodeId,
    source: NodeId,
) -> bool {
    if let Some(wrapping) = wrapping {
        if source == wrapping.begin {
            return leaf == wrapping.begin;
        }
    }
    source == body && body_cache.possible_leaves.contains(&leaf)
}

pub(super) fn is_required_contribution(
    body: NodeId,
    wrapping: Option<&Wrapping>,
    body_cache: &LookupCache,
    leaf: NodeId,
    source: NodeId,
) -> bool {
    match wrapping {
        Some(wrapping) if !wrapping.optional => source == wrapping.begin && leaf == wrapping.begin,
        _ => source == body && body_cache.required_leaves.contains(&leaf),
    }
}

/// Whether consuming `leaf` leads straight back into the body: the leaf is
/// the separator or the wrapping begin.
pub(super) fn resumes_body(separator: Option<NodeId>, wrapping: Option<&Wrapping>, leaf: NodeId) -> bool {
    separator == Some(leaf) || wrapping.is_some_and(|wrapping| wrapping.begin == leaf)
}
