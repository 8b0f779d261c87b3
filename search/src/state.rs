//! `SearchState`: one partial or complete plan.
//!
//! States are values: [`SearchState::extend`] returns a new state and never
//! touches the parent. `heuristic` and `priority` are not stored here; they
//! are derived by a [`crate::priority::PriorityFunction`].

use choreo_kernel::catalog::{GoalList, MoveCatalog, MoveId};
use choreo_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::policy::DedupKey;

/// A partial (or complete) move sequence with its incremental bookkeeping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    sequence: Vec<MoveId>,
    goals_completed: usize,
    total_time: f64,
    filler_count: usize,
}

impl SearchState {
    /// The empty plan: no moves, no goals, zero time.
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }

    /// Append `next`, producing a new state.
    ///
    /// `goals_completed` advances iff `next` is exactly the next required
    /// goal; otherwise the move counts as filler (including goals played
    /// out of turn).
    #[must_use]
    pub fn extend(&self, next: MoveId, goals: &GoalList, catalog: &MoveCatalog) -> Self {
        let total_time = self.total_time + catalog.duration(&next);
        let advances = goals.next_goal(self.goals_completed) == Some(&next);

        let mut sequence = Vec::with_capacity(self.sequence.len() + 1);
        sequence.extend_from_slice(&self.sequence);
        sequence.push(next);

        Self {
            sequence,
            goals_completed: self.goals_completed + usize::from(advances),
            total_time,
            filler_count: self.filler_count + usize::from(!advances),
        }
    }

    #[must_use]
    pub fn sequence(&self) -> &[MoveId] {
        &self.sequence
    }

    /// Count of the goal-list prefix satisfied in order.
    #[must_use]
    pub fn goals_completed(&self) -> usize {
        self.goals_completed
    }

    /// Exact (unrounded) sum of durations of `sequence`.
    #[must_use]
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Moves appended that were not the next required goal at the time.
    #[must_use]
    pub fn filler_count(&self) -> usize {
        self.filler_count
    }

    /// Number of moves taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The last move, or the `START` sentinel for the empty plan.
    #[must_use]
    pub fn current_move(&self) -> MoveId {
        self.sequence.last().cloned().unwrap_or_else(MoveId::start)
    }

    /// Whether every goal is complete (a terminal state).
    #[must_use]
    pub fn is_terminal(&self, goals: &GoalList) -> bool {
        goals.is_complete(self.goals_completed)
    }

    /// Identity bytes of this state under the given dedup key.
    ///
    /// Each identifier is length-prefixed so that distinct sequences can
    /// never share an encoding.
    #[must_use]
    pub fn identity_bytes(&self, dedup_key: DedupKey) -> Vec<u8> {
        let mut out = Vec::new();
        match dedup_key {
            DedupKey::FullPath => {
                out.push(b'P');
                push_len(&mut out, self.goals_completed);
                push_len(&mut out, self.sequence.len());
                for mv in &self.sequence {
                    push_id(&mut out, mv);
                }
            }
            DedupKey::CurrentMove => {
                out.push(b'C');
                push_id(&mut out, &self.current_move());
                push_len(&mut out, self.goals_completed);
                push_len(&mut out, self.filler_count);
            }
        }
        out
    }

    /// Visited-set fingerprint: `canonical_hash(SearchState, identity_bytes)`.
    #[must_use]
    pub fn fingerprint(&self, dedup_key: DedupKey) -> ContentHash {
        canonical_hash(HashDomain::SearchState, &self.identity_bytes(dedup_key))
    }
}

fn push_len(out: &mut Vec<u8>, n: usize) {
    out.extend_from_slice(&(n as u64).to_le_bytes());
}

fn push_id(out: &mut Vec<u8>, id: &MoveId) {
    push_len(out, id.as_str().len());
    out.extend_from_slice(id.as_str().as_bytes());
}
