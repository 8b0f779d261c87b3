//! Plan records, verification checks and console rendering.
//!
//! [`PlanRecord`] is the persisted output shape. [`PlanAudit`] re-checks a
//! finished plan independently of the search's bookkeeping. [`PlanReport`]
//! bundles both for the best plan and its alternatives.

use std::fmt::Write as _;

use choreo_kernel::catalog::{GoalList, MoveId};
use choreo_kernel::proof::canon::{
    canonical_json_bytes, canonical_json_hash, seconds_to_millis, CanonError,
};
use choreo_kernel::proof::hash::{ContentHash, HashDomain};
use choreo_search::graph::TerminationReason;
use choreo_search::search::{PlanStatus, SearchOutcome};
use choreo_search::state::SearchState;
use serde::{Deserialize, Serialize};

use crate::config::Profile;

/// Output record for one plan.
///
/// `total_time` and `time_difference` are rounded to two decimals; the
/// search itself always works on exact sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub total_time: f64,
    pub sequence: Vec<String>,
    pub goals_completed: usize,
    pub target_time: f64,
    pub time_difference: f64,
    pub filler_moves: usize,
}

impl PlanRecord {
    #[must_use]
    pub fn from_state(state: &SearchState, target_time: f64) -> Self {
        Self {
            total_time: round2(state.total_time()),
            sequence: state.sequence().iter().map(ToString::to_string).collect(),
            goals_completed: state.goals_completed(),
            target_time,
            time_difference: round2((state.total_time() - target_time).abs()),
            filler_moves: state.filler_count(),
        }
    }

    /// Pretty JSON as written to disk.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Canonical JSON projection with times as integer milliseconds.
    #[must_use]
    pub fn canonical_value(&self) -> serde_json::Value {
        serde_json::json!({
            "filler_moves": self.filler_moves,
            "goals_completed": self.goals_completed,
            "schema_version": "plan.v1",
            "sequence": self.sequence,
            "target_time_ms": seconds_to_millis(self.target_time),
            "time_difference_ms": seconds_to_millis(self.time_difference),
            "total_time_ms": seconds_to_millis(self.total_time),
        })
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.canonical_value())
    }

    /// Content digest of [`canonical_bytes`](Self::canonical_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        canonical_json_hash(HashDomain::PlanRecord, &self.canonical_value())
    }
}

/// Two-decimal rounding, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Filler requirement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillerCheck {
    pub required: usize,
    pub actual: usize,
}

impl FillerCheck {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.actual >= self.required
    }
}

/// Time-window check on the exact total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowCheck {
    pub min_time: f64,
    pub max_time: f64,
    pub total_time: f64,
}

impl WindowCheck {
    #[must_use]
    pub fn passed(&self) -> bool {
        (self.min_time..=self.max_time).contains(&self.total_time)
    }
}

/// Independent verification of a finished plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanAudit {
    /// Every goal appears, in order, as a subsequence of the plan.
    pub goal_order_ok: bool,
    /// Goals that do not occur anywhere in the plan.
    pub missing_goals: Vec<String>,
    pub filler: Option<FillerCheck>,
    pub time_window: Option<WindowCheck>,
}

impl PlanAudit {
    #[must_use]
    pub fn of(
        state: &SearchState,
        goals: &GoalList,
        min_filler: Option<usize>,
        window: Option<(f64, f64)>,
    ) -> Self {
        let sequence = state.sequence();
        let missing_goals = goals
            .iter()
            .filter(|g| !sequence.contains(g))
            .map(ToString::to_string)
            .collect();
        Self {
            goal_order_ok: goals.matched_prefix(sequence) == goals.len(),
            missing_goals,
            filler: min_filler.map(|required| FillerCheck {
                required,
                actual: state.filler_count(),
            }),
            time_window: window.map(|(min_time, max_time)| WindowCheck {
                min_time,
                max_time,
                total_time: state.total_time(),
            }),
        }
    }

    /// Whether every applicable check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.goal_order_ok
            && self.missing_goals.is_empty()
            && self.filler.iter().all(FillerCheck::passed)
            && self.time_window.iter().all(WindowCheck::passed)
    }
}

/// One rendered plan: its record plus its audit.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    pub record: PlanRecord,
    pub audit: PlanAudit,
}

impl PlanEntry {
    #[must_use]
    pub fn new(state: &SearchState, goals: &GoalList, profile: &Profile) -> Self {
        Self {
            record: PlanRecord::from_state(state, profile.timing.target_time),
            audit: PlanAudit::of(state, goals, profile.min_filler(), profile.time_window()),
        }
    }

    /// The plan as move identifiers.
    #[must_use]
    pub fn moves(&self) -> Vec<MoveId> {
        self.record.sequence.iter().map(MoveId::new).collect()
    }
}

/// Everything the console shows after one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanReport {
    pub profile: String,
    pub goal_count: usize,
    pub target_time: f64,
    pub status: PlanStatus,
    pub best: Option<PlanEntry>,
    pub alternatives: Vec<PlanEntry>,
    pub solutions_found: u64,
    pub expansions: u64,
    pub termination: TerminationReason,
}

impl PlanReport {
    #[must_use]
    pub fn from_outcome(profile: &Profile, goals: &GoalList, outcome: &SearchOutcome) -> Self {
        let entry = |state: &SearchState| PlanEntry::new(state, goals, profile);
        Self {
            profile: profile.name.clone(),
            goal_count: goals.len(),
            target_time: profile.timing.target_time,
            status: outcome.status(),
            best: outcome.best.as_ref().map(|n| entry(&n.state)),
            alternatives: outcome.alternatives.iter().map(|n| entry(&n.state)).collect(),
            solutions_found: outcome.solutions_found,
            expansions: outcome.expansions(),
            termination: outcome.termination_reason(),
        }
    }

    /// Human-readable console report.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Choreography planner: profile {} ===", self.profile);
        let _ = writeln!(out, "Goals to complete: {}", self.goal_count);
        let _ = writeln!(out, "Target time: {:.2}s", self.target_time);
        let _ = writeln!(
            out,
            "Expansions: {} ({}), solutions found: {}",
            self.expansions, self.termination, self.solutions_found
        );

        let Some(best) = &self.best else {
            out.push_str(&render_no_solution());
            return out;
        };

        out.push('\n');
        out.push_str(&render_entry("Best plan", best, self.goal_count));

        if !self.alternatives.is_empty() {
            let _ = writeln!(out, "\n=== Top {} alternatives ===", self.alternatives.len());
            for (i, alt) in self.alternatives.iter().enumerate() {
                out.push('\n');
                out.push_str(&render_entry(
                    &format!("Alternative {}", i + 1),
                    alt,
                    self.goal_count,
                ));
            }
        }
        out
    }
}

/// Render one plan with its checks.
#[must_use]
pub fn render_entry(title: &str, entry: &PlanEntry, goal_count: usize) -> String {
    let r = &entry.record;
    let a = &entry.audit;
    let mut out = String::new();
    let _ = writeln!(out, "=== {title} ===");
    let _ = writeln!(out, "Sequence: {}", r.sequence.join(" → "));
    let _ = writeln!(out, "Total time: {:.2}s", r.total_time);
    let _ = writeln!(out, "Target: {:.2}s", r.target_time);
    let _ = writeln!(out, "Difference: {:.2}s", r.time_difference);
    let _ = writeln!(out, "Goals completed: {}/{goal_count}", r.goals_completed);
    let _ = writeln!(out, "Filler moves: {}", r.filler_moves);
    for goal in &a.missing_goals {
        let _ = writeln!(out, "⚠️  Missing goal: {goal}");
    }
    if a.goal_order_ok {
        out.push_str("✅ Goal order respected\n");
    } else {
        out.push_str("❌ Goal order NOT respected\n");
    }
    if let Some(f) = a.filler {
        if f.passed() {
            let _ = writeln!(out, "✅ Filler requirement met (>= {})", f.required);
        } else {
            let _ = writeln!(
                out,
                "❌ Filler requirement NOT met ({} < {})",
                f.actual, f.required
            );
        }
    }
    if let Some(w) = a.time_window {
        let verdict = if w.passed() { "✅ Total time within" } else { "❌ Total time outside" };
        let _ = writeln!(out, "{verdict} [{:.2}, {:.2}]s", w.min_time, w.max_time);
    }
    out
}

/// Remediation hints for a search that found nothing.
#[must_use]
pub fn render_no_solution() -> String {
    [
        "❌ No solution found!",
        "Suggestions:",
        "- Check that every goal has valid predecessors",
        "- Raise budget.max_expansions or budget.max_steps",
        "- Check the connectivity of the move graph",
        "",
    ]
    .join("\n")
}
