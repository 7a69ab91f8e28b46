//! Grammar node data model
//!
//! A grammar is a graph of nodes. Composite nodes point at their children
//! through [`NodeId`] handles, so a rule may (transitively) reference itself.

use smol_str::SmolStr;

use crate::base::{NodeId, TerminalId, TerminalTable, Version};

/// Edge from a composite node to one of its children.
///
/// Besides the optional flag, an edge can be gated on a minimum dialect
/// version or on a named grammar branch. Gates are only evaluated by the
/// [`LookaheadContext`](crate::lookahead::LookaheadContext) at query time; the
/// cached sets always cover every edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRef {
    pub node: NodeId,
    pub optional: bool,
    pub min_version: Option<Version>,
    pub branch: Option<SmolStr>,
}

impl ChildRef {
    pub fn required(node: NodeId) -> Self {
        Self {
            node,
            optional: false,
            min_version: None,
            branch: None,
        }
    }

    pub fn optional(node: NodeId) -> Self {
        Self {
            optional: true,
            ..Self::required(node)
        }
    }

    /// Only consider this edge for dialects at or above `version`
    pub fn since(mut self, version: Version) -> Self {
        self.min_version = Some(version);
        self
    }

    /// Only consider this edge when `branch` is enabled
    pub fn in_branch(mut self, branch: impl Into<SmolStr>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

impl From<NodeId> for ChildRef {
    fn from(node: NodeId) -> Self {
        Self::required(node)
    }
}

/// One element of a qualified-identifier variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantPart {
    pub leaf: NodeId,
    pub optional: bool,
}

impl VariantPart {
    pub fn required(leaf: NodeId) -> Self {
        Self {
            leaf,
            optional: false,
        }
    }

    pub fn optional(leaf: NodeId) -> Self {
        Self {
            leaf,
            optional: true,
        }
    }
}

/// A fixed sequence of leaves forming one dotted-path form (`schema.name`)
pub type Variant = Vec<VariantPart>;

/// Most optional segments a dotted path may have; each one doubles the
/// number of expanded variants.
pub const MAX_OPTIONAL_SEGMENTS: usize = 16;

/// One segment of a dotted path definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub leaf: NodeId,
    pub optional: bool,
}

/// Definition of a qualified identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualifiedDef {
    /// Variants spelled out by the grammar author
    Variants(Vec<Variant>),
    /// `[schema.][package.]name` style path; expanded into variants when the
    /// grammar is built
    Path {
        segments: Vec<PathSegment>,
        separator: NodeId,
    },
}

impl QualifiedDef {
    /// Leaves referenced by the definition, separator included
    pub fn leaves(&self) -> Vec<NodeId> {
        match self {
            Self::Variants(variants) => variants
                .iter()
                .flat_map(|variant| variant.iter().map(|part| part.leaf))
                .collect(),
            Self::Path {
                segments,
                separator,
            } => segments
                .iter()
                .map(|segment| segment.leaf)
                .chain(std::iter::once(*separator))
                .collect(),
        }
    }
}

/// Begin/end terminals bracketing an iteration (`( a, b, c )`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wrapping {
    pub begin: NodeId,
    pub end: NodeId,
    /// Optional wrapping may be omitted; mandatory wrapping is the only
    /// entry into the iteration.
    pub optional: bool,
}

impl Wrapping {
    pub fn optional(begin: NodeId, end: NodeId) -> Self {
        Self {
            begin,
            end,
            optional: true,
        }
    }

    pub fn mandatory(begin: NodeId, end: NodeId) -> Self {
        Self {
            begin,
            end,
            optional: false,
        }
    }
}

/// The closed set of grammar constructs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Matches exactly one terminal kind
    Terminal(TerminalId),
    /// Matches any identifier-class terminal
    Identifier,
    /// Matches one of several dotted-path forms
    QualifiedIdentifier(QualifiedDef),
    /// Ordered composition
    Sequence(Vec<ChildRef>),
    /// Alternation. Sortable alternations try keyword-led alternatives
    /// before identifier-led ones.
    OneOf {
        children: Vec<ChildRef>,
        sortable: bool,
    },
    /// Repetition of `body`, optionally separated and wrapped
    Iteration {
        body: NodeId,
        separator: Option<NodeId>,
        wrapping: Option<Wrapping>,
    },
}

impl NodeKind {
    /// Short kind label used in debug names and diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Terminal(_) => "token",
            Self::Identifier => "identifier",
            Self::QualifiedIdentifier(_) => "qualified-identifier",
            Self::Sequence(_) => "sequence",
            Self::OneOf { .. } => "one-of",
            Self::Iteration { .. } => "iteration",
        }
    }
}

/// A grammar node: an optional rule name and its construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: Option<SmolStr>,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self { name: None, kind }
    }

    /// Terminal and identifier nodes match a single terminal
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal(_) | NodeKind::Identifier)
    }

    /// The terminal matched by a terminal leaf
    pub fn terminal(&self) -> Option<TerminalId> {
        match self.kind {
            NodeKind::Terminal(terminal) => Some(terminal),
            _ => None,
        }
    }

    /// Every node this node points at, in declaration order.
    ///
    /// Qualified identifiers report the leaves of their definition; the
    /// expanded variants reference the same leaves.
    pub fn edges(&self) -> Vec<NodeId> {
        match &self.kind {
            NodeKind::Terminal(_) | NodeKind::Identifier => Vec::new(),
            NodeKind::QualifiedIdentifier(def) => def.leaves(),
            NodeKind::Sequence(children) | NodeKind::OneOf { children, .. } => {
                children.iter().map(|child| child.node).collect()
            }
            NodeKind::Iteration {
                body,
                separator,
                wrapping,
            } => {
                let mut edges = vec![*body];
                edges.extend(*separator);
                if let Some(wrapping) = wrapping {
                    edges.push(wrapping.begin);
                    edges.push(wrapping.end);
                }
                edges
            }
        }
    }

    /// `one-of (expr)` style label for logs
    pub fn debug_name(&self, id: NodeId) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.kind.label(), name),
            None => format!("{} ({})", self.kind.label(), id),
        }
    }

    /// Like [`debug_name`](Self::debug_name), but an unnamed terminal node
    /// shows its terminal: `keyword 'SELECT' (#3)`
    pub fn describe(&self, id: NodeId, terminals: &TerminalTable) -> String {
        let info = match (&self.name, self.terminal()) {
            (None, Some(terminal)) => terminals.info(terminal),
            _ => None,
        };
        match info {
            Some(info) => format!("{} '{}' ({})", info.class.as_str(), info.name, id),
            None => self.debug_name(id),
        }
    }
}
