//! Shared checks for the lock tests.
//!
//! Every plan the search returns must satisfy the same structural
//! properties regardless of catalog or profile; the tests call
//! [`assert_plan_invariants`] on every best plan and alternative.

use choreo_kernel::catalog::{GoalList, MoveCatalog, MoveId};
use choreo_search::policy::SearchPolicy;
use choreo_search::state::SearchState;

/// Longest run of identical consecutive moves in `sequence`.
#[must_use]
pub fn longest_run(sequence: &[MoveId]) -> usize {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<&MoveId> = None;
    for mv in sequence {
        run = if prev == Some(mv) { run + 1 } else { 1 };
        longest = longest.max(run);
        prev = Some(mv);
    }
    longest
}

/// Whether `goals` occur in `sequence` as an in-order subsequence.
#[must_use]
pub fn is_ordered_subsequence(goals: &GoalList, sequence: &[MoveId]) -> bool {
    let mut it = sequence.iter();
    goals.iter().all(|g| it.any(|m| m == g))
}

/// Panics with a description of the first violated property.
///
/// # Panics
///
/// If `state` is not a legal complete plan under `catalog`, `goals` and
/// `policy`.
pub fn assert_plan_invariants(
    catalog: &MoveCatalog,
    goals: &GoalList,
    policy: &SearchPolicy,
    state: &SearchState,
) {
    let seq = state.sequence();

    let mut prev = MoveId::start();
    for (i, mv) in seq.iter().enumerate() {
        assert!(
            catalog.can_follow(&prev, mv),
            "illegal transition {prev} → {mv} at index {i} in {seq:?}"
        );
        prev = mv.clone();
    }

    assert_eq!(state.goals_completed(), goals.len(), "incomplete plan {seq:?}");
    assert!(
        is_ordered_subsequence(goals, seq),
        "goals out of order in {seq:?}"
    );

    let sum: f64 = seq.iter().map(|m| catalog.duration(m)).sum();
    assert!(
        (state.total_time() - sum).abs() < 1e-9,
        "total_time {} != sum of durations {sum}",
        state.total_time()
    );

    assert!(
        seq.len() <= policy.max_steps,
        "plan of {} moves exceeds max_steps {}",
        seq.len(),
        policy.max_steps
    );
    assert!(
        longest_run(seq) <= policy.max_consecutive_repeats,
        "more than {} consecutive repeats in {seq:?}",
        policy.max_consecutive_repeats
    );

    assert_eq!(
        state.filler_count() + state.goals_completed(),
        seq.len(),
        "filler count does not account for every non-goal move"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<MoveId> {
        list.iter().copied().map(MoveId::from).collect()
    }

    #[test]
    fn longest_run_counts_trailing_and_inner_runs() {
        assert_eq!(longest_run(&[]), 0);
        assert_eq!(longest_run(&ids(&["A", "A", "B", "B", "B"])), 3);
        assert_eq!(longest_run(&ids(&["A", "A", "A", "B"])), 3);
        assert_eq!(longest_run(&ids(&["A", "B", "A"])), 1);
    }

    #[test]
    fn subsequence_scan_respects_order() {
        let goals = GoalList::new(ids(&["A", "C"]));
        assert!(is_ordered_subsequence(&goals, &ids(&["A", "B", "C"])));
        assert!(!is_ordered_subsequence(&goals, &ids(&["C", "B", "A"])));
    }
}
