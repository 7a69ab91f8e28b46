//! Foundation types for the lookahead engine.
//!
//! This module provides the primitive types shared by the grammar graph and
//! the lookahead caches:
//! - [`TerminalId`], [`TerminalClass`], [`TerminalTable`] - Interned terminal symbols
//! - [`NodeId`] - Arena handle of a grammar node
//! - [`TerminalSet`], [`LeafSet`] - Ordered id sets used as query accumulators
//! - [`Version`] - Dialect version used for gating grammar branches
//!
//! This module has NO dependencies on other lookahead modules.

mod node_id;
mod terminal;
mod version;

pub use node_id::NodeId;
pub use terminal::{TerminalClass, TerminalId, TerminalInfo, TerminalTable};
pub use version::{Version, VersionParseError};

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// Ordered set of terminals. Iteration order is insertion order, which keeps
/// completion lists and test expectations deterministic.
pub type TerminalSet = IndexSet<TerminalId, FxBuildHasher>;

/// Ordered set of leaf nodes (terminal-matching grammar nodes).
pub type LeafSet = IndexSet<NodeId, FxBuildHasher>;
