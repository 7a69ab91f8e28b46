//! Grammar graph.
//!
//! A grammar is an arena of [`Node`]s addressed by [`NodeId`]. Rules may
//! reference each other recursively, so the graph can contain cycles. Nodes
//! are assembled with a [`GrammarBuilder`]; [`GrammarBuilder::build`]
//! validates the graph, computes every lookahead cache and returns an
//! immutable [`Grammar`] that can be shared across threads.
//!
//! ## Key Types
//!
//! - [`GrammarBuilder`] - Collects terminals and nodes, resolves forward references
//! - [`Grammar`] - The built, read-only graph with its lookahead caches
//! - [`NodeKind`] - The closed set of constructs
//! - [`ChildRef`] - A parent-to-child edge with its optional flag and dialect gates
//! - [`GrammarError`] - Construction-time errors

mod builder;
mod error;
mod node;

pub use builder::{BuildOptions, GrammarBuilder};
pub use error::GrammarError;
pub use node::{
    ChildRef, MAX_OPTIONAL_SEGMENTS, Node, NodeKind, PathSegment, QualifiedDef, Variant,
    VariantPart, Wrapping,
};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use crate::base::{NodeId, TerminalId, TerminalTable};
use crate::lookahead::index;
use crate::lookahead::{Lookup, LookupCache};

/// A built grammar. Immutable, `Send + Sync`.
#[derive(Debug, Clone)]
pub struct Grammar {
    terminals: TerminalTable,
    nodes: Vec<Node>,
    names: IndexMap<SmolStr, NodeId, FxBuildHasher>,
    parents: Vec<Vec<NodeId>>,
    caches: Vec<LookupCache>,
    /// Answers queries on ids this grammar does not know
    empty: LookupCache,
}

impl Grammar {
    pub(crate) fn assemble(
        terminals: TerminalTable,
        nodes: Vec<Node>,
        names: IndexMap<SmolStr, NodeId, FxBuildHasher>,
        options: BuildOptions,
    ) -> Self {
        let indexed = index::build(&terminals, &nodes, options);
        Self {
            terminals,
            nodes,
            names,
            parents: indexed.parents,
            caches: indexed.caches,
            empty: LookupCache::default(),
        }
    }

    pub fn terminals(&self) -> &TerminalTable {
        &self.terminals
    }

    /// Look up a terminal by name
    pub fn terminal(&self, name: &str) -> Option<TerminalId> {
        self.terminals.get(name)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Look up a node by rule name
    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes with an edge to `id`
    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        self.parents.get(id.index()).map_or(&[], Vec::as_slice)
    }

    pub fn debug_name(&self, id: NodeId) -> String {
        match self.node(id) {
            Some(node) => node.describe(id, &self.terminals),
            None => format!("unknown ({id})"),
        }
    }

    /// Query handle for `id`
    pub fn lookup(&self, id: NodeId) -> Lookup<'_> {
        Lookup::new(self, id)
    }

    pub(crate) fn cache(&self, id: NodeId) -> &LookupCache {
        self.caches.get(id.index()).unwrap_or(&self.empty)
    }
}
