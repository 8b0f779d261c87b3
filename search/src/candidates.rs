//! Legal successor enumeration.

use std::collections::BTreeSet;

use choreo_kernel::catalog::{GoalList, MoveCatalog, MoveId};

use crate::policy::SearchPolicy;

/// Enumerates the moves that may legally follow the current one.
///
/// Borrows the immutable catalog and goal list for the duration of a search.
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator<'a> {
    catalog: &'a MoveCatalog,
    goals: &'a GoalList,
    max_consecutive_repeats: usize,
    allow_post_fill: bool,
}

impl<'a> CandidateGenerator<'a> {
    #[must_use]
    pub fn new(catalog: &'a MoveCatalog, goals: &'a GoalList, policy: &SearchPolicy) -> Self {
        Self {
            catalog,
            goals,
            max_consecutive_repeats: policy.max_consecutive_repeats,
            allow_post_fill: policy.allow_post_fill,
        }
    }

    /// Legal next moves, deduplicated and sorted by identifier.
    ///
    /// 1. Nothing once every goal is complete, unless post-fill is allowed.
    /// 2. The next goal, if `current` is one of its predecessors.
    /// 3. Every move with a predecessor entry containing `current` that is
    ///    not an already-completed goal.
    ///
    /// Any move whose addition would make the trailing run of identical
    /// moves exceed `max_consecutive_repeats` is excluded, goal or not.
    /// Guarding the goal transition too means no returned plan ever holds a
    /// run longer than the limit, even when the next goal repeats the
    /// current move.
    #[must_use]
    pub fn next_moves(
        &self,
        current: &MoveId,
        goals_completed: usize,
        sequence: &[MoveId],
    ) -> Vec<MoveId> {
        if self.goals.is_complete(goals_completed) && !self.allow_post_fill {
            return Vec::new();
        }

        let mut out: BTreeSet<MoveId> = BTreeSet::new();

        if let Some(goal) = self.goals.next_goal(goals_completed) {
            if self.catalog.can_follow(current, goal) && !self.repeats_exhausted(goal, sequence) {
                out.insert(goal.clone());
            }
        }

        let completed = self.goals.completed_prefix(goals_completed);
        for (mv, preds) in self.catalog.transitions() {
            if !preds.contains(current) || completed.contains(mv) {
                continue;
            }
            if self.repeats_exhausted(mv, sequence) {
                continue;
            }
            out.insert(mv.clone());
        }

        out.into_iter().collect()
    }

    /// Whether the last `max_consecutive_repeats` entries of `sequence` are all `mv`.
    fn repeats_exhausted(&self, mv: &MoveId, sequence: &[MoveId]) -> bool {
        let k = self.max_consecutive_repeats;
        sequence.len() >= k && sequence[sequence.len() - k..].iter().all(|m| m == mv)
    }
}
