//! Selection state machine with the two-at-a-time auto-commit rule.

use smallvec::SmallVec;

use crate::registry::NodeId;

/// What a single pick did to the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickOutcome {
    /// True when this pick completed a pair.
    pub linked: bool,
    /// The committed pair in insertion order, when `linked` is true.
    pub pair: Option<(NodeId, NodeId)>,
}

impl PickOutcome {
    const NONE: PickOutcome = PickOutcome {
        linked: false,
        pair: None,
    };
}

/// Ordered set of currently-selected beads, oldest first.
///
/// Cardinality is 0 or 1 between events; it reaches 2 only transiently while
/// a pick is being handled, at which point the pair auto-commits and the set
/// clears. Auto-commit is the sole policy here; there is no overflow
/// eviction because the set can never grow past 2.
#[derive(Debug, Default)]
pub struct SelectionMachine {
    selected: SmallVec<[NodeId; 2]>,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one pick.
    ///
    /// Picking an already-selected bead toggles it off and never links.
    /// Otherwise the bead is appended; when that makes two, the pair is
    /// reported in insertion order and the set clears.
    pub fn handle_pick(&mut self, id: NodeId) -> PickOutcome {
        if let Some(at) = self.selected.iter().position(|&s| s == id) {
            self.selected.remove(at);
            return PickOutcome::NONE;
        }

        self.selected.push(id);
        if self.selected.len() == 2 {
            let pair = (self.selected[0], self.selected[1]);
            self.selected.clear();
            return PickOutcome {
                linked: true,
                pair: Some(pair),
            };
        }
        PickOutcome::NONE
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    /// Currently-selected ids, oldest first.
    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
