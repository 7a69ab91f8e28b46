//! Grammar assembly
//!
//! [`GrammarBuilder`] collects terminals and nodes, resolves forward
//! references (needed for recursive rules) and refuses malformed constructs.
//! [`GrammarBuilder::build`] runs the one-time lookahead pass and hands out an
//! immutable [`Grammar`].
//!
//! # Example
//!
//! ```
//! use lookahead::base::TerminalClass;
//! use lookahead::grammar::{ChildRef, GrammarBuilder};
//!
//! let mut builder = GrammarBuilder::new();
//! let lparen = builder.terminal("(", TerminalClass::Punctuation)?;
//! let rparen = builder.terminal(")", TerminalClass::Punctuation)?;
//! builder.terminal("IDENTIFIER", TerminalClass::Identifier)?;
//!
//! // expr := '(' expr ')' | identifier
//! let expr = builder.rule("expr")?;
//! let open = builder.terminal_node(lparen)?;
//! let close = builder.terminal_node(rparen)?;
//! let nested = builder.sequence(vec![open.into(), expr.into(), close.into()])?;
//! let ident = builder.identifier()?;
//! builder.define_one_of(expr, vec![ChildRef::required(nested), ChildRef::required(ident)])?;
//!
//! let grammar = builder.build()?;
//! assert!(grammar.lookup(expr).could_start_with_terminal(lparen));
//! # Ok::<(), lookahead::grammar::GrammarError>(())
//! ```

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use super::error::GrammarError;
use super::node::{
    ChildRef, MAX_OPTIONAL_SEGMENTS, Node, NodeKind, PathSegment, QualifiedDef, Variant, Wrapping,
};
use super::Grammar;
use crate::base::{NodeId, TerminalClass, TerminalId, TerminalTable};

/// Options applied while building the lookahead caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildOptions {
    /// Log alternations whose alternatives share first terminals
    pub report_ambiguities: bool,
}

/// Assembles a [`Grammar`].
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    terminals: TerminalTable,
    /// `None` marks a reserved node that is not defined yet
    nodes: Vec<Option<Node>>,
    names: IndexMap<SmolStr, NodeId, FxBuildHasher>,
    options: BuildOptions,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    // =========================================================================
    // Terminals
    // =========================================================================

    /// Declare a terminal. Redeclaring a name with the same class returns the
    /// existing terminal.
    pub fn terminal(
        &mut self,
        name: &str,
        class: TerminalClass,
    ) -> Result<TerminalId, GrammarError> {
        let (id, existing) = self
            .terminals
            .intern(name, class)
            .ok_or(GrammarError::TooManyTerminals)?;
        if existing != class {
            return Err(GrammarError::TerminalClassConflict {
                name: SmolStr::new(name),
                existing,
                requested: class,
            });
        }
        Ok(id)
    }

    pub fn keyword(&mut self, name: &str) -> Result<TerminalId, GrammarError> {
        self.terminal(name, TerminalClass::Keyword)
    }

    pub fn punctuation(&mut self, name: &str) -> Result<TerminalId, GrammarError> {
        self.terminal(name, TerminalClass::Punctuation)
    }

    pub fn terminals(&self) -> &TerminalTable {
        &self.terminals
    }

    // =========================================================================
    // Forward references
    // =========================================================================

    /// Handle of the rule called `name`, reserving it on first use.
    pub fn rule(&mut self, name: &str) -> Result<NodeId, GrammarError> {
        if let Some(id) = self.names.get(name) {
            return Ok(*id);
        }
        let id = self.reserve()?;
        self.names.insert(SmolStr::new(name), id);
        Ok(id)
    }

    /// Reserve an anonymous node to be defined later.
    pub fn reserve(&mut self) -> Result<NodeId, GrammarError> {
        let id = self.next_id()?;
        self.nodes.push(None);
        Ok(id)
    }

    /// Define a reserved node.
    pub fn define(&mut self, id: NodeId, kind: NodeKind) -> Result<NodeId, GrammarError> {
        self.check_kind(id, &kind)?;

        let name = self
            .names
            .iter()
            .find(|(_, node)| **node == id)
            .map(|(name, _)| name.clone());
        let slot = self
            .nodes
            .get_mut(id.index())
            .ok_or(GrammarError::UnknownNode(id))?;
        if slot.is_some() {
            return Err(GrammarError::Redefined(id));
        }
        *slot = Some(Node { name, kind });
        Ok(id)
    }

    pub fn define_sequence(
        &mut self,
        id: NodeId,
        children: Vec<ChildRef>,
    ) -> Result<NodeId, GrammarError> {
        self.define(id, NodeKind::Sequence(children))
    }

    pub fn define_one_of(
        &mut self,
        id: NodeId,
        children: Vec<ChildRef>,
    ) -> Result<NodeId, GrammarError> {
        self.define(
            id,
            NodeKind::OneOf {
                children,
                sortable: false,
            },
        )
    }

    // =========================================================================
    // Node constructors
    // =========================================================================

    fn next_id(&self) -> Result<NodeId, GrammarError> {
        NodeId::try_new(self.nodes.len()).ok_or(GrammarError::TooManyNodes)
    }

    fn add(&mut self, kind: NodeKind) -> Result<NodeId, GrammarError> {
        let id = self.next_id()?;
        self.check_kind(id, &kind)?;
        self.nodes.push(Some(Node::new(kind)));
        Ok(id)
    }

    pub fn terminal_node(&mut self, terminal: TerminalId) -> Result<NodeId, GrammarError> {
        self.add(NodeKind::Terminal(terminal))
    }

    pub fn identifier(&mut self) -> Result<NodeId, GrammarError> {
        self.add(NodeKind::Identifier)
    }

    pub fn qualified_identifier(&mut self, variants: Vec<Variant>) -> Result<NodeId, GrammarError> {
        self.add(NodeKind::QualifiedIdentifier(QualifiedDef::Variants(
            variants,
        )))
    }

    /// Qualified identifier from a dotted path; optional segments may be
    /// left out together with their separator.
    pub fn qualified_path(
        &mut self,
        segments: Vec<PathSegment>,
        separator: NodeId,
    ) -> Result<NodeId, GrammarError> {
        self.add(NodeKind::QualifiedIdentifier(QualifiedDef::Path {
            segments,
            separator,
        }))
    }

    pub fn sequence(&mut self, children: Vec<ChildRef>) -> Result<NodeId, GrammarError> {
        self.add(NodeKind::Sequence(children))
    }

    pub fn one_of(&mut self, children: Vec<ChildRef>) -> Result<NodeId, GrammarError> {
        self.add(NodeKind::OneOf {
            children,
            sortable: false,
        })
    }

    /// Alternation whose identifier-led alternatives are tried last
    pub fn sortable_one_of(&mut self, children: Vec<ChildRef>) -> Result<NodeId, GrammarError> {
        self.add(NodeKind::OneOf {
            children,
            sortable: true,
        })
    }

    pub fn iteration(
        &mut self,
        body: NodeId,
        separator: Option<NodeId>,
        wrapping: Option<Wrapping>,
    ) -> Result<NodeId, GrammarError> {
        self.add(NodeKind::Iteration {
            body,
            separator,
            wrapping,
        })
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Validate the graph and compute every lookahead cache.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (index, slot) in self.nodes.into_iter().enumerate() {
            let id = NodeId::new(index);
            match slot {
                Some(node) => nodes.push(node),
                None => {
                    let rule = self
                        .names
                        .iter()
                        .find(|(_, node)| **node == id)
                        .map(|(name, _)| name.clone());
                    return Err(match rule {
                        Some(name) => GrammarError::UndefinedRule(name),
                        None => GrammarError::UndefinedNode(id),
                    });
                }
            }
        }

        for (index, node) in nodes.iter().enumerate() {
            check_references(NodeId::new(index), node, &nodes)?;
        }

        Ok(Grammar::assemble(
            self.terminals,
            nodes,
            self.names,
            self.options,
        ))
    }

    fn check_kind(&self, id: NodeId, kind: &NodeKind) -> Result<(), GrammarError> {
        check_shape(id, kind)?;
        match kind {
            NodeKind::Terminal(terminal) if terminal.index() >= self.terminals.len() => {
                Err(GrammarError::UnknownTerminal(*terminal))
            }
            _ => Ok(()),
        }
    }
}

/// Shape checks that need no other node
fn check_shape(id: NodeId, kind: &NodeKind) -> Result<(), GrammarError> {
    match kind {
        NodeKind::Sequence(children) if children.is_empty() => Err(GrammarError::EmptySequence(id)),
        NodeKind::OneOf { children, .. } if children.is_empty() => Err(GrammarError::EmptyOneOf(id)),
        NodeKind::QualifiedIdentifier(QualifiedDef::Variants(variants)) => {
            if variants.is_empty() {
                return Err(GrammarError::EmptyQualifiedIdentifier(id));
            }
            match variants.iter().position(|variant| variant.is_empty()) {
                Some(variant) => Err(GrammarError::EmptyVariant { node: id, variant }),
                None => Ok(()),
            }
        }
        NodeKind::QualifiedIdentifier(QualifiedDef::Path { segments, .. }) => {
            if segments.is_empty() {
                return Err(GrammarError::EmptyQualifiedIdentifier(id));
            }
            let optional = segments.iter().filter(|segment| segment.optional).count();
            if optional == segments.len() {
                // every segment optional would admit the empty path
                return Err(GrammarError::EmptyVariant {
                    node: id,
                    variant: 0,
                });
            }
            if optional > MAX_OPTIONAL_SEGMENTS {
                return Err(GrammarError::TooManyOptionalSegments {
                    node: id,
                    count: optional,
                    max: MAX_OPTIONAL_SEGMENTS,
                });
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Checks that every referenced node exists and has the right kind
fn check_references(id: NodeId, node: &Node, nodes: &[Node]) -> Result<(), GrammarError> {
    let resolve = |part: NodeId| nodes.get(part.index()).ok_or(GrammarError::UnknownNode(part));

    for edge in node.edges() {
        resolve(edge)?;
    }

    match &node.kind {
        NodeKind::Iteration {
            separator,
            wrapping,
            ..
        } => {
            if let Some(separator) = separator {
                if resolve(*separator)?.terminal().is_none() {
                    return Err(GrammarError::separator(id, *separator));
                }
            }
            if let Some(wrapping) = wrapping {
                for part in [wrapping.begin, wrapping.end] {
                    if resolve(part)?.terminal().is_none() {
                        return Err(GrammarError::wrapping(id, part));
                    }
                }
            }
        }
        NodeKind::QualifiedIdentifier(def) => {
            if let QualifiedDef::Path { separator, .. } = def {
                if resolve(*separator)?.terminal().is_none() {
                    return Err(GrammarError::separator(id, *separator));
                }
            }
            for part in def.leaves() {
                if !resolve(part)?.is_leaf() {
                    return Err(GrammarError::variant_part(id, part));
                }
            }
        }
        _ => {}
    }
    Ok(())
}
