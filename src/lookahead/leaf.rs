//! Terminal-matching nodes
//!
//! Terminal and identifier nodes are the base case of every other
//! algorithm: their sets contain just themselves and they never receive
//! registrations.

use crate::base::{NodeId, TerminalId, TerminalTable};
use crate::grammar::{Node, NodeKind};

use super::cache::LookupCache;

/// Seed the cache of a leaf with the leaf itself
pub(super) fn seed(id: NodeId, node: &Node, cache: &mut LookupCache) {
    cache.possible_leaves.insert(id);
    cache.required_leaves.insert(id);
    absorb_contained(id, node, cache);
}

/// Record that the leaf `id` appears inside the construct owning `cache`.
/// Returns whether the leaf is new to the construct.
pub(super) fn absorb_contained(id: NodeId, leaf: &Node, cache: &mut LookupCache) -> bool {
    if !cache.contained_leaves.insert(id) {
        return false;
    }
    match leaf.kind {
        NodeKind::Terminal(terminal) => {
            cache.contained_terminals.insert(terminal);
        }
        NodeKind::Identifier => cache.contains_identifier = true,
        _ => {}
    }
    true
}

/// Terminals a leaf matches: its own terminal, or every identifier-class
/// terminal for an identifier node.
pub(super) fn for_each_terminal(
    leaf: &Node,
    terminals: &TerminalTable,
    mut f: impl FnMut(TerminalId),
) {
    match leaf.kind {
        NodeKind::Terminal(terminal) => f(terminal),
        NodeKind::Identifier => terminals.identifiers().for_each(f),
        _ => {}
    }
}

/// Whether a leaf matches identifier-class terminals
pub(super) fn is_identifier(leaf: &Node, terminals: &TerminalTable) -> bool {
    match leaf.kind {
        NodeKind::Terminal(terminal) => terminals.is_identifier(terminal),
        NodeKind::Identifier => true,
        _ => false,
    }
}
