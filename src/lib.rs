//! # grammar-lookahead
//!
//! FIRST-set caches for hand-written, recursive-descent style grammars.
//!
//! A grammar is described once as a graph of nodes (terminals, identifiers,
//! qualified identifiers, sequences, alternations and iterations) and built
//! into an immutable [`Grammar`](grammar::Grammar). Every node then answers
//! lookahead questions in constant time: which terminals can start it, which
//! must, what it contains anywhere, and which alternative a terminal selects.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! lookahead → caches, leaf index, queries, lookahead context
//!   ↓
//! grammar   → node arena, builder, construction errors
//!   ↓
//! base      → primitives (TerminalId, NodeId, Version, id sets)
//! ```

// ============================================================================
// MODULES (dependency order: base → grammar → lookahead)
// ============================================================================

/// Foundation types: terminals, node handles, versions
pub mod base;

/// Grammar graph and builder
pub mod grammar;

/// Lookahead caches and queries
pub mod lookahead;

// Re-export the types most callers need
pub use base::{LeafSet, NodeId, TerminalClass, TerminalId, TerminalSet, Version};
pub use grammar::{ChildRef, Grammar, GrammarBuilder, GrammarError};
pub use lookahead::{LookaheadContext, Lookup};
