//! Randomized catalogs: every plan the search returns is legal, and
//! rankings and digests are stable.

use std::collections::{BTreeMap, BTreeSet};

use choreo_kernel::catalog::{GoalList, MoveCatalog, MoveId};
use choreo_search::graph::TerminationReason;
use choreo_search::policy::{DedupKey, SearchPolicy};
use choreo_search::priority::PriorityMode;
use choreo_search::search::search;
use lock_tests::assert_plan_invariants;
use proptest::prelude::*;

const MAX_MOVES: usize = 6;

#[derive(Debug, Clone)]
struct Scenario {
    catalog: MoveCatalog,
    goals: GoalList,
    policy: SearchPolicy,
    tiered: bool,
}

fn move_name(i: usize) -> MoveId {
    MoveId::new(format!("M{i}"))
}

fn scenario() -> impl Strategy<Value = Scenario> {
    (2..=MAX_MOVES)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(1u32..=40, n),
                // Row i: may move i follow START (index n) or move j?
                prop::collection::vec(prop::collection::vec(any::<bool>(), n + 1), n),
                prop::collection::vec(0..n, 1..=3),
                1usize..=3,
                any::<bool>(),
                any::<bool>(),
            )
        })
        .prop_map(|(tenths, edges, goal_idx, repeats, tiered, coarse)| {
            let n = tenths.len();
            let durations: BTreeMap<MoveId, f64> = tenths
                .iter()
                .enumerate()
                .map(|(i, &t)| (move_name(i), f64::from(t) / 10.0))
                .collect();
            let predecessors: BTreeMap<MoveId, BTreeSet<MoveId>> = edges
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let preds = row
                        .iter()
                        .enumerate()
                        .filter(|&(_, &on)| on)
                        .map(|(j, _)| if j == n { MoveId::start() } else { move_name(j) })
                        .collect();
                    (move_name(i), preds)
                })
                .collect();
            Scenario {
                catalog: MoveCatalog::new(1.0, durations, predecessors).unwrap(),
                goals: goal_idx.into_iter().map(move_name).collect(),
                policy: SearchPolicy {
                    max_expansions: 300,
                    max_steps: 8,
                    max_consecutive_repeats: repeats,
                    allow_post_fill: true,
                    keep_top_k: 4,
                    dedup_key: if coarse {
                        DedupKey::CurrentMove
                    } else {
                        DedupKey::FullPath
                    },
                },
                tiered,
            }
        })
}

fn mode(s: &Scenario) -> PriorityMode {
    if s.tiered {
        PriorityMode::Tiered {
            min_time: 3.0,
            max_time: 6.0,
            min_filler: 1,
        }
    } else {
        PriorityMode::GoalDominant
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_returned_plan_is_legal(s in scenario()) {
        let priority = mode(&s).build(&s.catalog, &s.goals);
        let outcome = search(&s.catalog, &s.goals, &s.policy, priority.as_ref()).unwrap();

        prop_assert!(outcome.expansions() <= s.policy.max_expansions);
        if outcome.termination_reason() == TerminationReason::ExpansionBudgetExceeded {
            prop_assert_eq!(outcome.expansions(), s.policy.max_expansions);
        }

        match &outcome.best {
            None => {
                prop_assert_eq!(outcome.solutions_found, 0);
                prop_assert!(outcome.alternatives.is_empty());
            }
            Some(best) => {
                assert_plan_invariants(&s.catalog, &s.goals, &s.policy, &best.state);
                for alt in &outcome.alternatives {
                    assert_plan_invariants(&s.catalog, &s.goals, &s.policy, &alt.state);
                    prop_assert!(alt.priority >= best.priority);
                }
                prop_assert!(outcome.alternatives.len() <= s.policy.keep_top_k);
                let keys: Vec<_> = outcome.alternatives.iter().map(|n| n.frontier_key()).collect();
                prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }

    #[test]
    fn search_is_repeatable(s in scenario()) {
        let priority = mode(&s).build(&s.catalog, &s.goals);
        let a = search(&s.catalog, &s.goals, &s.policy, priority.as_ref()).unwrap();
        let b = search(&s.catalog, &s.goals, &s.policy, priority.as_ref()).unwrap();
        prop_assert_eq!(a.graph.digest().unwrap(), b.graph.digest().unwrap());
        prop_assert_eq!(
            a.best.map(|n| n.state.sequence().to_vec()),
            b.best.map(|n| n.state.sequence().to_vec())
        );
    }
}
