//! Search nodes and the frontier ordering key.

use crate::priority::{Evaluation, PriorityKey};
use crate::state::SearchState;

/// An immutable search node in the frontier.
///
/// Ordering for frontier extraction uses `(priority, creation_order)`.
/// Lower is better; equal priorities are broken by older creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    /// Global counter for deterministic tie-breaking; doubles as node id.
    pub creation_order: u64,
    /// Parent node's creation order (`None` for root).
    pub parent: Option<u64>,
    /// Full immutable state at this node.
    pub state: SearchState,
    /// Sum of durations of the goals still outstanding.
    pub heuristic: f64,
    /// Lexicographic priority computed when the node was created.
    pub priority: PriorityKey,
}

impl SearchNode {
    #[must_use]
    pub fn new(
        creation_order: u64,
        parent: Option<u64>,
        state: SearchState,
        evaluation: Evaluation,
    ) -> Self {
        Self {
            creation_order,
            parent,
            state,
            heuristic: evaluation.heuristic,
            priority: evaluation.key,
        }
    }

    /// The key this node is ordered by in the frontier.
    #[must_use]
    pub fn frontier_key(&self) -> FrontierKey {
        FrontierKey {
            priority: self.priority,
            creation_order: self.creation_order,
        }
    }
}

/// The frontier ordering key: `(priority, creation_order)`.
///
/// `creation_order` is unique per search, so this is a strict total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub priority: PriorityKey,
    pub creation_order: u64,
}

impl From<&SearchNode> for FrontierKey {
    fn from(node: &SearchNode) -> Self {
        node.frontier_key()
    }
}
