//! Lookahead context
//!
//! A traversal-time filter deciding which child edges a query may follow.
//! It lets one grammar serve several dialects: edges gated on a newer version
//! or on a disabled branch are skipped without touching the grammar or its
//! caches.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::{NodeId, Version};
use crate::grammar::ChildRef;

/// Filter applied to child edges while collecting lookahead sets.
///
/// The default context is unrestricted: every edge is followed and the
/// collection queries are answered straight from the cached sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookaheadContext {
    /// Dialect version; `None` accepts every version gate
    version: Option<Version>,
    /// Enabled branches; `None` accepts every branch
    branches: Option<FxHashSet<SmolStr>>,
    /// Nodes never entered
    excluded: FxHashSet<NodeId>,
}

impl LookaheadContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip edges gated on a version newer than `version`
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Enable a branch. Once any branch is enabled, edges tagged with a
    /// branch that is not enabled are skipped.
    pub fn with_branch(mut self, branch: impl Into<SmolStr>) -> Self {
        self.branches
            .get_or_insert_with(FxHashSet::default)
            .insert(branch.into());
        self
    }

    /// Never enter `node`
    pub fn excluding(mut self, node: NodeId) -> Self {
        self.excluded.insert(node);
        self
    }

    pub fn is_branch_enabled(&self, branch: &str) -> bool {
        self.branches
            .as_ref()
            .is_none_or(|enabled| enabled.contains(branch))
    }

    pub fn is_excluded(&self, node: NodeId) -> bool {
        self.excluded.contains(&node)
    }

    /// True when [`check`](Self::check) accepts every edge
    pub fn is_unrestricted(&self) -> bool {
        self.version.is_none() && self.branches.is_none() && self.excluded.is_empty()
    }

    /// Whether a query may follow the edge to `child`
    pub fn check(&self, child: &ChildRef) -> bool {
        if self.is_excluded(child.node) {
            return false;
        }
        if let (Some(required), Some(version)) = (child.min_version, self.version) {
            if required > version {
                return false;
            }
        }
        match &child.branch {
            Some(branch) => self.is_branch_enabled(branch),
            None => true,
        }
    }
}
