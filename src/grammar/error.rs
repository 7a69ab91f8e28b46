//! Construction-time errors for grammar assembly.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{NodeId, TerminalClass, TerminalId};

/// Errors raised while assembling a grammar.
///
/// A malformed grammar is refused when it is built; the lookahead caches
/// never see one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// Sequence without children.
    #[error("sequence {0} has no children")]
    EmptySequence(NodeId),

    /// Alternation without alternatives.
    #[error("one-of {0} has no alternatives")]
    EmptyOneOf(NodeId),

    /// Qualified identifier without variants or path segments.
    #[error("qualified identifier {0} has no variants")]
    EmptyQualifiedIdentifier(NodeId),

    /// A qualified-identifier variant without parts.
    #[error("variant {variant} of qualified identifier {node} is empty")]
    EmptyVariant { node: NodeId, variant: usize },

    /// A node used as separator or wrapping is not a terminal node.
    #[error("{role} {part} of {node} must be a terminal node")]
    NotATerminal {
        node: NodeId,
        part: NodeId,
        role: &'static str,
    },

    /// A qualified-identifier part is not a terminal or identifier node.
    #[error("{role} {part} of {node} must be a leaf node")]
    NotALeaf {
        node: NodeId,
        part: NodeId,
        role: &'static str,
    },

    /// An anonymous node was reserved but never defined.
    #[error("node {0} was reserved but never defined")]
    UndefinedNode(NodeId),

    /// A named rule was referenced but never defined.
    #[error("rule '{0}' was referenced but never defined")]
    UndefinedRule(SmolStr),

    /// A node handle was defined twice.
    #[error("node {0} is already defined")]
    Redefined(NodeId),

    /// A node handle that was not issued by this builder.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// A terminal handle that was not issued by this builder.
    #[error("unknown terminal {0}")]
    UnknownTerminal(TerminalId),

    /// A dotted path with more optional segments than can be expanded.
    #[error("qualified identifier {node} has {count} optional segments, at most {max} are supported")]
    TooManyOptionalSegments { node: NodeId, count: usize, max: usize },

    /// The builder cannot issue another node id.
    #[error("grammar exceeds the maximum number of nodes")]
    TooManyNodes,

    /// The terminal table cannot issue another terminal id.
    #[error("grammar exceeds the maximum number of terminals")]
    TooManyTerminals,

    /// A terminal name redeclared with another class.
    #[error("terminal '{name}' is already declared as {existing:?}, not {requested:?}")]
    TerminalClassConflict {
        name: SmolStr,
        existing: TerminalClass,
        requested: TerminalClass,
    },
}

impl GrammarError {
    /// Create a not-a-terminal error for an iteration separator.
    pub fn separator(node: NodeId, part: NodeId) -> Self {
        Self::NotATerminal {
            node,
            part,
            role: "separator",
        }
    }

    /// Create a not-a-terminal error for a wrapping terminal.
    pub fn wrapping(node: NodeId, part: NodeId) -> Self {
        Self::NotATerminal {
            node,
            part,
            role: "wrapping",
        }
    }

    /// Create a not-a-leaf error for a qualified-identifier part.
    pub fn variant_part(node: NodeId, part: NodeId) -> Self {
        Self::NotALeaf {
            node,
            part,
            role: "variant part",
        }
    }
}
