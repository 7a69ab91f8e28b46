//! Lookahead queries
//!
//! [`Lookup`] answers FIRST-set questions for one node. Membership questions
//! read the cached sets directly. Collection questions take a
//! [`LookaheadContext`]: an unrestricted context copies the cached set, any
//! other context walks the graph and filters child edges on the way.

use rustc_hash::FxHashSet;

use crate::base::{LeafSet, NodeId, TerminalId, TerminalSet};
use crate::grammar::{ChildRef, Grammar, Node, NodeKind};

use super::cache::LookupCache;
use super::context::LookaheadContext;
use super::{iteration, leaf, one_of, qualified, sequence};

/// Query handle for one grammar node.
///
/// Cheap to copy. Obtained with [`Grammar::lookup`]; a handle to a node the
/// grammar does not know answers `false` and empty sets.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'g> {
    grammar: &'g Grammar,
    id: NodeId,
}

impl<'g> Lookup<'g> {
    pub(crate) fn new(grammar: &'g Grammar, id: NodeId) -> Self {
        Self { grammar, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> Option<&'g Node> {
        self.grammar.node(self.id)
    }

    pub fn cache(&self) -> &'g LookupCache {
        self.grammar.cache(self.id)
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Some match of this node can begin with `terminal`
    pub fn could_start_with_terminal(&self, terminal: TerminalId) -> bool {
        self.cache().possible_terminals.contains(&terminal)
    }

    /// Every match of this node must begin with one of the required terminals
    pub fn should_start_with_terminal(&self, terminal: TerminalId) -> bool {
        self.cache().required_terminals.contains(&terminal)
    }

    pub fn could_start_with_leaf(&self, leaf: NodeId) -> bool {
        self.cache().possible_leaves.contains(&leaf)
    }

    pub fn should_start_with_leaf(&self, leaf: NodeId) -> bool {
        self.cache().required_leaves.contains(&leaf)
    }

    /// `terminal` appears anywhere inside this construct
    pub fn contains_terminal(&self, terminal: TerminalId) -> bool {
        self.cache().contained_terminals.contains(&terminal)
    }

    /// The leaf node `leaf` itself appears anywhere inside this construct.
    /// Non-leaf nodes are never contained.
    pub fn contains_leaf(&self, leaf: NodeId) -> bool {
        self.cache().contained_leaves.contains(&leaf)
    }

    pub fn starts_with_identifier(&self) -> bool {
        self.cache().starts_with_identifier
    }

    pub fn possible_terminals(&self) -> &'g TerminalSet {
        &self.cache().possible_terminals
    }

    pub fn required_terminals(&self) -> &'g TerminalSet {
        &self.cache().required_terminals
    }

    pub fn possible_leaves(&self) -> &'g LeafSet {
        &self.cache().possible_leaves
    }

    pub fn required_leaves(&self) -> &'g LeafSet {
        &self.cache().required_leaves
    }

    // =========================================================================
    // Collection
    // =========================================================================

    /// Add every terminal that can start this node under `ctx` to `bucket`.
    pub fn collect_possible_terminals<'b>(
        &self,
        ctx: &LookaheadContext,
        bucket: &'b mut TerminalSet,
    ) -> &'b mut TerminalSet {
        if ctx.is_unrestricted() {
            bucket.extend(self.cache().possible_terminals.iter().copied());
            return bucket;
        }
        let terminals = self.grammar.terminals();
        self.walk_first(self.id, ctx, |_, node| {
            leaf::for_each_terminal(node, terminals, |terminal| {
                bucket.insert(terminal);
            });
        });
        bucket
    }

    /// Add every leaf that can start this node under `ctx` to `bucket`.
    pub fn collect_possible_leaves<'b>(
        &self,
        ctx: &LookaheadContext,
        bucket: &'b mut LeafSet,
    ) -> &'b mut LeafSet {
        if ctx.is_unrestricted() {
            bucket.extend(self.cache().possible_leaves.iter().copied());
            return bucket;
        }
        self.walk_first(self.id, ctx, |leaf_id, _| {
            bucket.insert(leaf_id);
        });
        bucket
    }

    /// Leaves that can follow `leaf` inside this iteration: after its
    /// separator or wrapping begin, the body starts again. Leaves `bucket`
    /// untouched for any other leaf or node kind.
    pub fn collect_leaves_after<'b>(
        &self,
        leaf: NodeId,
        ctx: &LookaheadContext,
        bucket: &'b mut LeafSet,
    ) -> &'b mut LeafSet {
        let Some(NodeKind::Iteration {
            body,
            separator,
            wrapping,
        }) = self.node().map(|node| &node.kind)
        else {
            return bucket;
        };
        if !iteration::resumes_body(*separator, wrapping.as_ref(), leaf) || ctx.is_excluded(*body) {
            return bucket;
        }
        if ctx.is_unrestricted() {
            bucket.extend(self.grammar.cache(*body).possible_leaves.iter().copied());
            return bucket;
        }
        self.walk_first(*body, ctx, |leaf_id, _| {
            bucket.insert(leaf_id);
        });
        bucket
    }

    /// Depth-first walk over the first leaves of `start`, in declaration
    /// order. Each node is entered once, which terminates cycles.
    fn walk_first(&self, start: NodeId, ctx: &LookaheadContext, mut emit: impl FnMut(NodeId, &'g Node)) {
        let mut visited = FxHashSet::default();
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(node) = self.grammar.node(id) else {
                continue;
            };
            let next: Vec<NodeId> = match &node.kind {
                NodeKind::Terminal(_) | NodeKind::Identifier => {
                    emit(id, node);
                    continue;
                }
                NodeKind::QualifiedIdentifier(_) => {
                    let mut heads = Vec::new();
                    for head in qualified::heads(self.grammar.cache(id).variants()) {
                        if !heads.contains(&head.leaf) {
                            heads.push(head.leaf);
                        }
                    }
                    heads
                }
                NodeKind::Sequence(children) => sequence::first_children(children, ctx),
                NodeKind::OneOf { children, .. } => one_of::first_children(children, ctx),
                NodeKind::Iteration { body, wrapping, .. } => {
                    let mut first = Vec::with_capacity(2);
                    if let Some(wrapping) = wrapping {
                        first.push(wrapping.begin);
                    }
                    first.push(*body);
                    first.retain(|node| !ctx.is_excluded(*node));
                    first
                }
            };
            stack.extend(next.into_iter().rev());
        }
    }

    // =========================================================================
    // Landmarks and alternatives
    // =========================================================================

    /// Some alternation inside this construct has a child for which
    /// `terminal` is a landmark. Alternations reachable only through nodes
    /// on `path` are not considered; an empty path answers from the cache.
    pub fn contains_landmark_terminal(&self, terminal: TerminalId, path: &[NodeId]) -> bool {
        if !self.cache().landmark_terminals.contains(&terminal) {
            return false;
        }
        if path.is_empty() {
            return true;
        }

        let mut visited: FxHashSet<NodeId> = path.iter().copied().collect();
        visited.insert(self.id);
        let mut stack = vec![self.id];

        while let Some(id) = stack.pop() {
            let cache = self.grammar.cache(id);
            if cache
                .alternatives()
                .is_some_and(|alternatives| alternatives.landmarks.contains_key(&terminal))
            {
                return true;
            }
            let Some(node) = self.grammar.node(id) else {
                continue;
            };
            for child in node.edges() {
                if self.grammar.cache(child).landmark_terminals.contains(&terminal)
                    && visited.insert(child)
                {
                    stack.push(child);
                }
            }
        }
        false
    }

    /// The only alternative of this alternation that can start with
    /// `terminal`
    pub fn landmark_alternative(&self, terminal: TerminalId) -> Option<NodeId> {
        self.cache()
            .alternatives()?
            .landmarks
            .get(&terminal)
            .copied()
    }

    /// Alternatives sharing a first terminal with an earlier sibling
    pub fn ambiguous_alternatives(&self) -> &'g [NodeId] {
        match self.cache().alternatives() {
            Some(alternatives) => &alternatives.ambiguous,
            None => &[],
        }
    }

    /// Alternatives in the order a driver should try them
    pub fn ordered_alternatives(&self) -> &'g [ChildRef] {
        match self.cache().alternatives() {
            Some(alternatives) => &alternatives.ordered,
            None => &[],
        }
    }
}
