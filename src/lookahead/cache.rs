//! Per-node lookahead cache
//!
//! One [`LookupCache`] exists for every grammar node. The leaf-level sets are
//! filled by the registration pass in [`index`](super::index); the
//! terminal-level sets and flags are derived from them once the pass reaches
//! its fixed point. After that the cache never changes.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::{LeafSet, NodeId, TerminalId, TerminalSet};
use crate::grammar::{ChildRef, Variant};

/// Memoized lookahead sets of a grammar node.
#[derive(Debug, Clone, Default)]
pub struct LookupCache {
    /// Leaves that can start a match
    pub(crate) possible_leaves: LeafSet,
    /// Leaves one of which must start a match
    pub(crate) required_leaves: LeafSet,
    pub(crate) possible_terminals: TerminalSet,
    pub(crate) required_terminals: TerminalSet,
    /// Leaf nodes appearing anywhere inside the construct
    pub(crate) contained_leaves: FxHashSet<NodeId>,
    /// Terminals appearing anywhere inside the construct
    pub(crate) contained_terminals: FxHashSet<TerminalId>,
    /// The construct contains an identifier node
    pub(crate) contains_identifier: bool,
    pub(crate) starts_with_identifier: bool,
    /// Terminals that are a landmark of some alternation inside the construct
    pub(crate) landmark_terminals: FxHashSet<TerminalId>,
    pub(crate) kind: KindCache,
}

/// Data only some node kinds derive
#[derive(Debug, Clone, Default)]
pub(crate) enum KindCache {
    #[default]
    Plain,
    /// Variants of a qualified identifier, expanded by `init`
    Qualified(Vec<Variant>),
    OneOf(AlternativeCache),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct AlternativeCache {
    /// Terminal -> the only alternative that can start with it
    pub(crate) landmarks: FxHashMap<TerminalId, NodeId>,
    /// Alternatives sharing a first terminal with an earlier sibling
    pub(crate) ambiguous: Vec<NodeId>,
    /// Alternatives in the order a driver should try them
    pub(crate) ordered: Vec<ChildRef>,
}

impl LookupCache {
    pub fn possible_leaves(&self) -> &LeafSet {
        &self.possible_leaves
    }

    pub fn required_leaves(&self) -> &LeafSet {
        &self.required_leaves
    }

    pub fn possible_terminals(&self) -> &TerminalSet {
        &self.possible_terminals
    }

    pub fn required_terminals(&self) -> &TerminalSet {
        &self.required_terminals
    }

    pub fn starts_with_identifier(&self) -> bool {
        self.starts_with_identifier
    }

    pub(crate) fn variants(&self) -> &[Variant] {
        match &self.kind {
            KindCache::Qualified(variants) => variants,
            _ => &[],
        }
    }

    pub(crate) fn alternatives(&self) -> Option<&AlternativeCache> {
        match &self.kind {
            KindCache::OneOf(alternatives) => Some(alternatives),
            _ => None,
        }
    }
}
