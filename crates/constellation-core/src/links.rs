//! Committed links between bead pairs, unique as unordered pairs.

use fnv::FnvHashSet;

use crate::registry::NodeId;

#[inline]
fn key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Append-only link collection. `(a, b)` and `(b, a)` are the same link;
/// duplicates are rejected as a no-op, never an error.
#[derive(Debug, Default)]
pub struct LinkStore {
    keys: FnvHashSet<(NodeId, NodeId)>,
    // insertion order preserved for the renderer's line pass
    order: Vec<(NodeId, NodeId)>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, a: NodeId, b: NodeId) -> bool {
        self.keys.contains(&key(a, b))
    }

    /// Append a link. Returns false (and changes nothing) for duplicates or
    /// degenerate self-pairs.
    pub fn add(&mut self, a: NodeId, b: NodeId) -> bool {
        debug_assert_ne!(a, b, "a link must join two distinct beads");
        if a == b || !self.keys.insert(key(a, b)) {
            return false;
        }
        self.order.push((a, b));
        true
    }

    pub fn count(&self) -> usize {
        self.order.len()
    }

    /// Links in creation order, each pair as it was committed.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.order.iter().copied()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.order.clear();
    }
}
