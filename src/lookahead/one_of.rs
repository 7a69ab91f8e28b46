//! Alternations
//!
//! Every alternative is an independent first step, so the sets are plain
//! unions. Alternations also derive their landmarks (terminals that pick
//! exactly one alternative), the alternatives that overlap an earlier
//! sibling, and the order in which a driver should try them.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::{NodeId, TerminalId, TerminalSet};
use crate::grammar::ChildRef;

use super::cache::{AlternativeCache, LookupCache};
use super::context::LookaheadContext;

pub(super) fn is_possible_contribution(
    children: &[ChildRef],
    source_cache: &LookupCache,
    leaf: NodeId,
    source: NodeId,
) -> bool {
    children.iter().any(|child| child.node == source)
        && source_cache.possible_leaves.contains(&leaf)
}

pub(super) fn is_required_contribution(
    children: &[ChildRef],
    source_cache: &LookupCache,
    leaf: NodeId,
    source: NodeId,
) -> bool {
    children.iter().any(|child| child.node == source)
        && source_cache.required_leaves.contains(&leaf)
}

pub(super) fn first_children(children: &[ChildRef], ctx: &LookaheadContext) -> Vec<NodeId> {
    children
        .iter()
        .filter(|child| ctx.check(child))
        .map(|child| child.node)
        .collect()
}

/// Derive the alternation data from the children's final caches
pub(super) fn derive(
    children: &[ChildRef],
    sortable: bool,
    caches: &[LookupCache],
) -> AlternativeCache {
    // terminal -> Some(child) while exactly one distinct child has it
    let mut owners: FxHashMap<TerminalId, Option<NodeId>> = FxHashMap::default();
    let mut seen_children = FxHashSet::default();
    for child in children {
        if !seen_children.insert(child.node) {
            continue;
        }
        for terminal in first_terminals(caches, child.node) {
            owners
                .entry(*terminal)
                .and_modify(|owner| *owner = None)
                .or_insert(Some(child.node));
        }
    }
    let landmarks = owners
        .into_iter()
        .filter_map(|(terminal, owner)| owner.map(|node| (terminal, node)))
        .collect();

    let mut ambiguous = Vec::new();
    let mut seen_terminals = FxHashSet::default();
    for child in children {
        let terminals = first_terminals(caches, child.node);
        if terminals.iter().any(|terminal| seen_terminals.contains(terminal))
            && !ambiguous.contains(&child.node)
        {
            ambiguous.push(child.node);
        }
        seen_terminals.extend(terminals.iter().copied());
    }

    let mut ordered = children.to_vec();
    if sortable {
        ordered.sort_by_key(|child| caches[child.node.index()].starts_with_identifier);
    }

    AlternativeCache {
        landmarks,
        ambiguous,
        ordered,
    }
}

fn first_terminals(caches: &[LookupCache], node: NodeId) -> &TerminalSet {
    &caches[node.index()].possible_terminals
}
