//! Reverse leaf index
//!
//! Builds the leaf-level sets of every node bottom-up. Each leaf registers
//! itself with its parents; a parent absorbs the leaf when its node kind says
//! the registration contributes to its own sets, and re-propagates it to
//! *its* parents. Sets only grow, so the pass reaches a fixed point even on
//! cyclic grammars: a `(node, leaf)` pair can change a node at most a bounded
//! number of times, and repeat registrations are no-ops.
//!
//! ## Build steps
//!
//! ```text
//! init (qualified-identifier variants)
//!     ↓
//! parent links
//!     ↓
//! seed leaves → register_leaf worklist → fixed point
//!     ↓
//! terminal-level sets, alternation data, landmark propagation
//! ```

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::base::{NodeId, TerminalId, TerminalSet, TerminalTable};
use crate::grammar::{BuildOptions, Node, NodeKind};

use super::cache::{KindCache, LookupCache};
use super::{iteration, leaf, one_of, qualified, sequence};

/// Parent links and caches produced by [`build`]
pub(crate) struct IndexedGrammar {
    pub(crate) parents: Vec<Vec<NodeId>>,
    pub(crate) caches: Vec<LookupCache>,
}

/// Run every build step over a validated node arena.
pub(crate) fn build(terminals: &TerminalTable, nodes: &[Node], options: BuildOptions) -> IndexedGrammar {
    let mut caches = vec![LookupCache::default(); nodes.len()];
    init(nodes, &mut caches);
    let parents = collect_parents(nodes);

    let mut index = LeafIndex::new(nodes, &parents, caches);
    index.seed();
    index.run();
    let events = index.events;
    let mut caches = index.into_caches();

    derive_terminals(terminals, nodes, &mut caches);
    derive_alternatives(nodes, &mut caches);
    propagate_landmarks(nodes, &parents, &mut caches);

    debug!(
        "[LEAF_INDEX] built lookahead caches for {} nodes ({} registrations)",
        nodes.len(),
        events
    );
    if options.report_ambiguities {
        report_ambiguities(terminals, nodes, &caches);
    }

    IndexedGrammar { parents, caches }
}

/// One-time derivations needed before registration starts
fn init(nodes: &[Node], caches: &mut [LookupCache]) {
    for (node, cache) in nodes.iter().zip(caches.iter_mut()) {
        if let NodeKind::QualifiedIdentifier(def) = &node.kind {
            cache.kind = KindCache::Qualified(qualified::expand_variants(def));
        }
    }
}

fn collect_parents(nodes: &[Node]) -> Vec<Vec<NodeId>> {
    let mut parents = vec![Vec::new(); nodes.len()];
    for (index, node) in nodes.iter().enumerate() {
        let parent = NodeId::new(index);
        for child in node.edges() {
            let list: &mut Vec<NodeId> = &mut parents[child.index()];
            if !list.contains(&parent) {
                list.push(parent);
            }
        }
    }
    parents
}

#[derive(Debug, Clone, Copy)]
struct Registration {
    node: NodeId,
    leaf: NodeId,
    source: NodeId,
}

/// Worklist driving `register_leaf` events to a fixed point.
pub(crate) struct LeafIndex<'g> {
    nodes: &'g [Node],
    parents: &'g [Vec<NodeId>],
    caches: Vec<LookupCache>,
    queue: VecDeque<Registration>,
    events: usize,
}

impl<'g> LeafIndex<'g> {
    pub(crate) fn new(nodes: &'g [Node], parents: &'g [Vec<NodeId>], caches: Vec<LookupCache>) -> Self {
        Self {
            nodes,
            parents,
            caches,
            queue: VecDeque::new(),
            events: 0,
        }
    }

    /// Every leaf starts its own sets and announces itself to its parents.
    pub(crate) fn seed(&mut self) {
        for (index, node) in self.nodes.iter().enumerate() {
            if node.is_leaf() {
                let id = NodeId::new(index);
                leaf::seed(id, node, &mut self.caches[index]);
                self.notify_parents(id, id);
            }
        }
    }

    pub(crate) fn run(&mut self) {
        while let Some(Registration { node, leaf, source }) = self.queue.pop_front() {
            self.events += 1;
            if self.register_leaf(node, leaf, source) {
                self.notify_parents(node, leaf);
            }
        }
    }

    /// Offer `leaf`, reachable through the child `source`, to `node`.
    /// Returns whether any set of `node` grew.
    pub(crate) fn register_leaf(&mut self, node: NodeId, leaf: NodeId, source: NodeId) -> bool {
        let nodes = self.nodes;
        let (Some(owner), Some(leaf_node)) = (nodes.get(node.index()), nodes.get(leaf.index())) else {
            return false;
        };
        let Some(source_cache) = self.caches.get(source.index()) else {
            return false;
        };
        let cache = &self.caches[node.index()];

        let possible = !cache.possible_leaves.contains(&leaf)
            && is_possible_contribution(owner, cache, source_cache, leaf, source);
        let required = !cache.required_leaves.contains(&leaf)
            && is_required_contribution(owner, cache, source_cache, leaf, source);

        let cache = &mut self.caches[node.index()];
        if possible {
            cache.possible_leaves.insert(leaf);
        }
        if required {
            cache.required_leaves.insert(leaf);
        }
        let contained = leaf::absorb_contained(leaf, leaf_node, cache);

        if possible || required {
            trace!(
                "[LEAF_INDEX] {} absorbed {} via {} (possible: {}, required: {})",
                owner.debug_name(node),
                leaf_node.debug_name(leaf),
                source,
                possible,
                required
            );
        }
        possible || required || contained
    }

    fn notify_parents(&mut self, node: NodeId, leaf: NodeId) {
        let parents = self.parents;
        for parent in &parents[node.index()] {
            self.queue.push_back(Registration {
                node: *parent,
                leaf,
                source: node,
            });
        }
    }

    #[cfg(test)]
    pub(crate) fn cache(&self, node: NodeId) -> Option<&LookupCache> {
        self.caches.get(node.index())
    }

    pub(crate) fn into_caches(self) -> Vec<LookupCache> {
        self.caches
    }
}

/// Single dispatch point for the possible-set predicate
fn is_possible_contribution(
    owner: &Node,
    cache: &LookupCache,
    source_cache: &LookupCache,
    leaf: NodeId,
    source: NodeId,
) -> bool {
    match &owner.kind {
        NodeKind::Terminal(_) | NodeKind::Identifier => false,
        NodeKind::QualifiedIdentifier(_) => {
            qualified::is_possible_contribution(cache.variants(), leaf, source)
        }
        NodeKind::Sequence(children) => {
            sequence::is_possible_contribution(children, source_cache, leaf, source)
        }
        NodeKind::OneOf { children, .. } => {
            one_of::is_possible_contribution(children, source_cache, leaf, source)
        }
        NodeKind::Iteration { body, wrapping, .. } => iteration::is_possible_contribution(
            *body,
            wrapping.as_ref(),
            source_cache,
            leaf,
            source,
        ),
    }
}

/// Single dispatch point for the required-set predicate
fn is_required_contribution(
    owner: &Node,
    cache: &LookupCache,
    source_cache: &LookupCache,
    leaf: NodeId,
    source: NodeId,
) -> bool {
    match &owner.kind {
        NodeKind::Terminal(_) | NodeKind::Identifier => false,
        NodeKind::QualifiedIdentifier(_) => {
            qualified::is_required_contribution(cache.variants(), leaf, source)
        }
        NodeKind::Sequence(children) => {
            sequence::is_required_contribution(children, source_cache, leaf, source)
        }
        NodeKind::OneOf { children, .. } => {
            one_of::is_required_contribution(children, source_cache, leaf, source)
        }
        NodeKind::Iteration { body, wrapping, .. } => iteration::is_required_contribution(
            *body,
            wrapping.as_ref(),
            source_cache,
            leaf,
            source,
        ),
    }
}

/// Expand leaf sets into terminal sets
fn derive_terminals(terminals: &TerminalTable, nodes: &[Node], caches: &mut [LookupCache]) {
    let expand = |leaves: &crate::base::LeafSet| {
        let mut set = TerminalSet::default();
        for leaf in leaves {
            leaf::for_each_terminal(&nodes[leaf.index()], terminals, |terminal| {
                set.insert(terminal);
            });
        }
        set
    };

    for cache in caches.iter_mut() {
        cache.possible_terminals = expand(&cache.possible_leaves);
        cache.required_terminals = expand(&cache.required_leaves);
        cache.starts_with_identifier = cache
            .possible_leaves
            .iter()
            .any(|leaf| leaf::is_identifier(&nodes[leaf.index()], terminals));
        if cache.contains_identifier {
            cache.contained_terminals.extend(terminals.identifiers());
        }
    }
}

fn derive_alternatives(nodes: &[Node], caches: &mut [LookupCache]) {
    for (index, node) in nodes.iter().enumerate() {
        if let NodeKind::OneOf { children, sortable } = &node.kind {
            let derived = one_of::derive(children, *sortable, caches);
            caches[index].kind = KindCache::OneOf(derived);
        }
    }
}

/// Every ancestor of an alternation inherits its landmarks
fn propagate_landmarks(nodes: &[Node], parents: &[Vec<NodeId>], caches: &mut [LookupCache]) {
    let mut queue: VecDeque<(NodeId, TerminalId)> = VecDeque::new();
    for index in 0..nodes.len() {
        let seeds: Vec<TerminalId> = match caches[index].alternatives() {
            Some(alternatives) => alternatives.landmarks.keys().copied().collect(),
            None => continue,
        };
        queue.extend(seeds.into_iter().map(|terminal| (NodeId::new(index), terminal)));
    }

    while let Some((node, terminal)) = queue.pop_front() {
        if caches[node.index()].landmark_terminals.insert(terminal) {
            queue.extend(parents[node.index()].iter().map(|parent| (*parent, terminal)));
        }
    }
}

fn report_ambiguities(terminals: &TerminalTable, nodes: &[Node], caches: &[LookupCache]) {
    for (index, node) in nodes.iter().enumerate() {
        let Some(alternatives) = caches[index].alternatives() else {
            continue;
        };
        if alternatives.ambiguous.is_empty() {
            continue;
        }
        let names: Vec<String> = alternatives
            .ambiguous
            .iter()
            .map(|id| nodes[id.index()].describe(*id, terminals))
            .collect();
        warn!(
            "ambiguous one-of elements [{}] {}",
            node.describe(NodeId::new(index), terminals),
            names.join(" ")
        );
    }
}
