//! Shared helpers for choreo benchmark suites.

use std::collections::{BTreeMap, BTreeSet};

use choreo_harness::config::Profile;
use choreo_kernel::catalog::{GoalList, MoveCatalog, MoveId};
use choreo_search::policy::SearchPolicy;
use choreo_search::priority::PriorityFunction;
use choreo_search::search::{search, SearchOutcome};

/// Prepared inputs for calling `search()` directly, bypassing profile
/// parsing and report building.
pub struct SearchSetup {
    pub catalog: MoveCatalog,
    pub goals: GoalList,
    pub policy: SearchPolicy,
    pub priority: Box<dyn PriorityFunction>,
}

/// Build the search inputs once for a built-in profile.
///
/// # Panics
///
/// Panics if the profile is unknown or invalid. Benchmark setup failures
/// are fatal.
#[must_use]
pub fn prepare_profile(name: &str, max_expansions: u64) -> SearchSetup {
    let profile = Profile::builtin(name).expect("built-in profile");
    let catalog = profile.catalog().expect("catalog");
    let goals = profile.goal_list();
    let policy = SearchPolicy {
        max_expansions,
        ..profile.search_policy()
    };
    let priority = profile
        .priority_mode()
        .expect("priority mode")
        .build(&catalog, &goals);
    SearchSetup {
        catalog,
        goals,
        policy,
        priority,
    }
}

/// Run `search()` with prepared setup.
///
/// # Panics
///
/// Panics if the search rejects the setup.
#[must_use]
pub fn run_search_only(setup: &SearchSetup) -> SearchOutcome {
    search(
        &setup.catalog,
        &setup.goals,
        &setup.policy,
        setup.priority.as_ref(),
    )
    .expect("search")
}

/// Dense synthetic catalog: `width` moves, each may follow `START` and
/// every move (itself included). Goals are the first `goal_count` moves.
///
/// # Panics
///
/// Panics if `goal_count > width`.
#[must_use]
pub fn dense_catalog(width: usize, goal_count: usize) -> (MoveCatalog, GoalList) {
    assert!(goal_count <= width, "more goals than moves");
    let ids: Vec<MoveId> = (0..width).map(|i| MoveId::new(format!("M{i:03}"))).collect();
    let mut preds: BTreeSet<MoveId> = ids.iter().cloned().collect();
    preds.insert(MoveId::start());

    let durations = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), 1.0 + f64::from(u32::try_from(i % 7).unwrap_or(0)) * 0.25))
        .collect::<BTreeMap<_, _>>();
    let predecessors = ids
        .iter()
        .map(|id| (id.clone(), preds.clone()))
        .collect::<BTreeMap<_, _>>();

    let catalog = MoveCatalog::new(2.0, durations, predecessors).expect("catalog");
    let goals = ids.into_iter().take(goal_count).collect();
    (catalog, goals)
}
