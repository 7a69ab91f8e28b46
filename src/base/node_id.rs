use std::fmt;

/// Handle of a node in the grammar arena.
///
/// Node ids are only meaningful for the [`Grammar`](crate::grammar::Grammar)
/// (or builder) that issued them. They are cheap to copy and compare, which is
/// what lets the grammar graph contain cycles without owned recursive references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Id for a position in an arena the builder has already bounded
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(u32::try_from(index).is_ok());
        Self(index as u32)
    }

    /// Id for a new arena slot, `None` past `u32::MAX` nodes
    pub(crate) fn try_new(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
