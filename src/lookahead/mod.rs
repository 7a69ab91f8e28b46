//! Lookahead caches and queries.
//!
//! Every grammar node owns a [`LookupCache`] holding the leaves and terminals
//! that can (possible) or must (required) start a match of the node. The
//! caches are computed once while the grammar is built and answer parser
//! questions such as "can this construct start here?" or "which keywords may
//! come next?" without walking the graph.
//!
//! ## Key Types
//!
//! - [`Lookup`] - Query handle for one node, from [`Grammar::lookup`](crate::grammar::Grammar::lookup)
//! - [`LookaheadContext`] - Version and branch filter for collection queries
//! - [`LookupCache`] - The memoized sets of one node
//!
//! ## Layers
//!
//! ```text
//! query      ← Lookup: membership, collection, landmarks
//!   │
//! index      ← registration worklist, derived terminal sets
//!   │
//! leaf / qualified / sequence / one_of / iteration
//!            ← per-kind contribution rules
//!   │
//! cache      ← LookupCache
//! ```

mod cache;
mod context;
pub(crate) mod index;
mod iteration;
mod leaf;
mod one_of;
mod qualified;
mod query;
mod sequence;

pub use cache::LookupCache;
pub use context::LookaheadContext;
pub use query::Lookup;

#[cfg(test)]
mod tests;
