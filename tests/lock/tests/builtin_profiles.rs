//! Built-in profile lock tests: every returned plan is legal, and the
//! report's checks agree with the profile's requirements.

use choreo_harness::config::{Profile, BUILTIN_PROFILES};
use choreo_harness::runner::{run, run_profile, PlanRun};
use choreo_search::graph::TerminationReason;
use choreo_search::search::PlanStatus;
use lock_tests::assert_plan_invariants;

fn planned(name: &str) -> PlanRun {
    run(name).unwrap()
}

fn check_all_plans(plan: &PlanRun) {
    let catalog = plan.profile.catalog().unwrap();
    let goals = plan.profile.goal_list();
    let policy = plan.profile.search_policy();
    let best = plan.outcome.best.as_ref().expect("built-in profile solves");
    assert_plan_invariants(&catalog, &goals, &policy, &best.state);
    for alt in &plan.outcome.alternatives {
        assert_plan_invariants(&catalog, &goals, &policy, &alt.state);
        assert!(alt.priority >= best.priority);
    }
}

#[test]
fn every_builtin_profile_solves_with_legal_plans() {
    for name in BUILTIN_PROFILES {
        let plan = planned(name);
        assert_eq!(plan.report.status, PlanStatus::Solved, "{name}");
        check_all_plans(&plan);

        let best = plan.report.best.as_ref().unwrap();
        assert!(best.audit.passed(), "{name}: {:?}", best.audit);
        assert_eq!(best.record.goals_completed, plan.profile.goals.len());
        assert_eq!(plan.report.alternatives.len(), plan.profile.budget.keep_top_k);
    }
}

#[test]
fn classic_best_plan_is_the_bare_goal_sequence() {
    let plan = planned("classic");
    let best = plan.report.best.as_ref().unwrap();
    assert_eq!(best.record.sequence, plan.profile.goals);
    assert_eq!(best.record.filler_moves, 0);

    let catalog = plan.profile.catalog().unwrap();
    let goal_time: f64 = plan
        .profile
        .goal_list()
        .iter()
        .map(|g| catalog.duration(g))
        .sum();
    assert!((best.record.total_time - (goal_time * 100.0).round() / 100.0).abs() < 1e-9);
    assert!(best.audit.time_window.is_none());
    assert!(best.audit.filler.is_none());
}

#[test]
fn ranged_best_plan_meets_filler_and_window() {
    let plan = planned("ranged");
    let best = plan.report.best.as_ref().unwrap();
    let filler = best.audit.filler.unwrap();
    assert!(filler.actual >= 5, "{filler:?}");
    let window = best.audit.time_window.unwrap();
    assert!(window.passed(), "{window:?}");
    assert!((100.0..=125.0).contains(&best.record.total_time));
}

#[test]
fn builtin_profiles_spend_the_whole_budget() {
    for name in BUILTIN_PROFILES {
        let plan = planned(name);
        assert_eq!(
            plan.report.termination,
            TerminationReason::ExpansionBudgetExceeded,
            "{name}"
        );
        assert_eq!(plan.report.expansions, plan.profile.budget.max_expansions);
    }
}

#[test]
fn tighter_repeat_limit_still_holds_in_every_plan() {
    let mut profile = Profile::builtin("ranged").unwrap();
    profile.budget.max_consecutive_repeats = 1;
    profile.budget.max_expansions = 2_000;
    let plan = run_profile(profile).unwrap();
    if plan.outcome.is_solved() {
        check_all_plans(&plan);
    }
}

#[test]
fn report_renders_best_and_alternatives() {
    let plan = planned("classic");
    let text = plan.report.render();
    assert!(text.contains("=== Best plan ==="));
    assert!(text.contains("Sequence: StandInit → Hello → BlowKisses"));
    assert!(text.contains("Goals completed: 11/11"));
    assert!(text.contains("✅ Goal order respected"));
    assert!(text.contains("=== Alternative 5 ==="));
}
