//! End-to-end planning scenarios on small hand-built catalogs.
//!
//! Each scenario runs the public search entry point and, where a plan is
//! found, checks it with the shared invariant helper.

use std::collections::{BTreeMap, BTreeSet};

use choreo_kernel::catalog::{CatalogError, GoalList, MoveCatalog, MoveId};
use choreo_search::error::SearchError;
use choreo_search::graph::{PopOutcome, TerminationReason};
use choreo_search::policy::SearchPolicy;
use choreo_search::priority::PriorityMode;
use choreo_search::search::{search, PlanStatus, SearchOutcome};
use lock_tests::assert_plan_invariants;

fn ids(list: &[&str]) -> Vec<MoveId> {
    list.iter().copied().map(MoveId::from).collect()
}

fn catalog(default: f64, durations: &[(&str, f64)], edges: &[(&str, &[&str])]) -> MoveCatalog {
    let durations = durations
        .iter()
        .map(|&(m, d)| (MoveId::from(m), d))
        .collect::<BTreeMap<_, _>>();
    let predecessors = edges
        .iter()
        .map(|(m, preds)| (MoveId::from(*m), ids(preds).into_iter().collect()))
        .collect::<BTreeMap<_, BTreeSet<_>>>();
    MoveCatalog::new(default, durations, predecessors).unwrap()
}

fn run(cat: &MoveCatalog, goals: &GoalList, policy: &SearchPolicy) -> SearchOutcome {
    let priority = PriorityMode::GoalDominant.build(cat, goals);
    search(cat, goals, policy, priority.as_ref()).unwrap()
}

#[test]
fn two_goal_chain_yields_minimal_plan() {
    let cat = catalog(
        1.0,
        &[("A", 2.0), ("B", 3.0)],
        &[("A", &["START"]), ("B", &["A"])],
    );
    let goals = GoalList::new(ids(&["A", "B"]));
    let policy = SearchPolicy {
        max_expansions: 100,
        ..SearchPolicy::default()
    };

    let outcome = run(&cat, &goals, &policy);
    assert_eq!(outcome.status(), PlanStatus::Solved);
    let best = outcome.best.as_ref().unwrap();
    assert_eq!(best.state.sequence(), ids(&["A", "B"]).as_slice());
    assert!((best.state.total_time() - 5.0).abs() < 1e-12);
    assert_plan_invariants(&cat, &goals, &policy, &best.state);
}

#[test]
fn goal_with_empty_predecessor_set_is_no_solution() {
    let cat = catalog(1.0, &[], &[("A", &["START"]), ("B", &[])]);
    let goals = GoalList::new(ids(&["A", "B"]));
    let policy = SearchPolicy::default();

    let outcome = run(&cat, &goals, &policy);
    assert_eq!(outcome.status(), PlanStatus::NoSolutionFound);
    assert!(outcome.alternatives.is_empty());
    assert_eq!(outcome.termination_reason(), TerminationReason::FrontierExhausted);
    assert_eq!(outcome.solutions_found, 0);
}

#[test]
fn goal_without_predecessor_entry_is_rejected_before_search() {
    let cat = catalog(1.0, &[], &[("A", &["START"])]);
    let goals = GoalList::new(ids(&["A", "B"]));
    let priority = PriorityMode::GoalDominant.build(&cat, &goals);
    let err = search(&cat, &goals, &SearchPolicy::default(), priority.as_ref()).unwrap_err();
    assert!(matches!(
        err,
        SearchError::Configuration(CatalogError::GoalsWithoutPredecessors { .. })
    ));
}

#[test]
fn self_loop_is_cut_by_repeat_limit() {
    let cat = catalog(1.0, &[], &[("L", &["START", "L"]), ("G", &["X"])]);
    let goals = GoalList::new(ids(&["G"]));
    let policy = SearchPolicy {
        max_expansions: 100,
        max_consecutive_repeats: 1,
        ..SearchPolicy::default()
    };

    let outcome = run(&cat, &goals, &policy);
    assert_eq!(outcome.status(), PlanStatus::NoSolutionFound);
    assert_eq!(outcome.termination_reason(), TerminationReason::FrontierExhausted);
    assert!(outcome.expansions() <= policy.max_expansions);

    // Root → L, then L has no legal successor.
    assert_eq!(outcome.expansions(), 2);
    let last = outcome.graph.pops.last().unwrap();
    assert_eq!(last.depth, 1);
    assert!(matches!(&last.outcome, PopOutcome::Expanded { children } if children.is_empty()));
}

#[test]
fn self_loop_with_larger_limit_stays_bounded() {
    let cat = catalog(1.0, &[], &[("L", &["START", "L"]), ("G", &["X"])]);
    let goals = GoalList::new(ids(&["G"]));
    let policy = SearchPolicy {
        max_expansions: 100,
        max_consecutive_repeats: 3,
        ..SearchPolicy::default()
    };

    let outcome = run(&cat, &goals, &policy);
    assert_eq!(outcome.status(), PlanStatus::NoSolutionFound);
    // Root, L, LL, LLL.
    assert_eq!(outcome.expansions(), 4);
}

#[test]
fn filler_bridges_goals() {
    // B is only reachable through the filler move F.
    let cat = catalog(
        1.0,
        &[("A", 1.0), ("F", 0.5), ("B", 1.0)],
        &[("A", &["START"]), ("F", &["A"]), ("B", &["F"])],
    );
    let goals = GoalList::new(ids(&["A", "B"]));
    let policy = SearchPolicy::default();

    let outcome = run(&cat, &goals, &policy);
    let best = outcome.best.as_ref().unwrap();
    assert_eq!(best.state.sequence(), ids(&["A", "F", "B"]).as_slice());
    assert_eq!(best.state.filler_count(), 1);
    assert_plan_invariants(&cat, &goals, &policy, &best.state);
}

#[test]
fn goal_dominant_prefers_cheaper_bridge() {
    let cat = catalog(
        1.0,
        &[("A", 1.0), ("Slow", 4.0), ("Fast", 0.5), ("B", 1.0)],
        &[
            ("A", &["START"]),
            ("Slow", &["A"]),
            ("Fast", &["A"]),
            ("B", &["Slow", "Fast"]),
        ],
    );
    let goals = GoalList::new(ids(&["A", "B"]));
    let policy = SearchPolicy::default();

    let outcome = run(&cat, &goals, &policy);
    let best = outcome.best.as_ref().unwrap();
    assert_eq!(best.state.sequence(), ids(&["A", "Fast", "B"]).as_slice());
    for alt in &outcome.alternatives {
        assert_plan_invariants(&cat, &goals, &policy, &alt.state);
        assert!(alt.priority >= best.priority);
    }
}

#[test]
fn tiered_mode_pads_into_window() {
    let cat = catalog(
        1.0,
        &[("F", 2.0)],
        &[("A", &["START"]), ("B", &["A", "F"]), ("F", &["A", "F"])],
    );
    let goals = GoalList::new(ids(&["A", "B"]));
    let policy = SearchPolicy::default();
    let priority = PriorityMode::Tiered {
        min_time: 6.0,
        max_time: 8.0,
        min_filler: 2,
    }
    .build(&cat, &goals);

    let outcome = search(&cat, &goals, &policy, priority.as_ref()).unwrap();
    assert_eq!(outcome.termination_reason(), TerminationReason::FrontierExhausted);
    assert_eq!(outcome.solutions_found, 4);

    let best = outcome.best.as_ref().unwrap();
    assert_eq!(best.state.sequence(), ids(&["A", "F", "F", "B"]).as_slice());
    assert_eq!(best.state.filler_count(), 2);
    assert!((best.state.total_time() - 6.0).abs() < 1e-12);

    // AFFB and AFFFB tie on (0, 0, 0); the earlier-created one ranks first.
    let lens: Vec<usize> = outcome.alternatives.iter().map(|n| n.state.len()).collect();
    assert_eq!(lens, [4, 5, 3, 2]);
    for alt in &outcome.alternatives {
        assert_plan_invariants(&cat, &goals, &policy, &alt.state);
    }
}
