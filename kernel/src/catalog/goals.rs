//! The ordered list of mandatory goal moves.

use super::move_id::MoveId;

/// Ordered, immutable list of goal moves.
///
/// Order is significant: an accepted plan contains the goals as an
/// order-preserving (not necessarily contiguous) subsequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoalList {
    goals: Vec<MoveId>,
}

impl GoalList {
    #[must_use]
    pub fn new(goals: Vec<MoveId>) -> Self {
        Self { goals }
    }

    /// Number of goals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// The next required goal once `completed` goals are satisfied.
    #[must_use]
    pub fn next_goal(&self, completed: usize) -> Option<&MoveId> {
        self.goals.get(completed)
    }

    /// `GoalList[0..completed]`, clamped to the list length.
    #[must_use]
    pub fn completed_prefix(&self, completed: usize) -> &[MoveId] {
        &self.goals[..completed.min(self.goals.len())]
    }

    /// The goals still outstanding after `completed` goals.
    #[must_use]
    pub fn remaining(&self, completed: usize) -> &[MoveId] {
        &self.goals[completed.min(self.goals.len())..]
    }

    /// Whether `completed` covers every goal.
    #[must_use]
    pub fn is_complete(&self, completed: usize) -> bool {
        completed >= self.goals.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoveId> {
        self.goals.iter()
    }

    /// Length of the longest goal prefix that appears in order in `sequence`.
    ///
    /// Greedy left-to-right scan; equals the incrementally maintained
    /// `goals_completed` of a search state built from the same sequence.
    #[must_use]
    pub fn matched_prefix(&self, sequence: &[MoveId]) -> usize {
        let mut matched = 0;
        for mv in sequence {
            if self.goals.get(matched) == Some(mv) {
                matched += 1;
            }
        }
        matched
    }
}

impl<'a> IntoIterator for &'a GoalList {
    type Item = &'a MoveId;
    type IntoIter = std::slice::Iter<'a, MoveId>;

    fn into_iter(self) -> Self::IntoIter {
        self.goals.iter()
    }
}

impl FromIterator<MoveId> for GoalList {
    fn from_iter<T: IntoIterator<Item = MoveId>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
