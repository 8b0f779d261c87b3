//! Frontier ordering: lexicographic priority keys and the functions that
//! compute them.
//!
//! A [`PriorityKey`] is an ordered tuple `(goal_tier, filler_tier, time_tier)`
//! compared lexicographically, so no amount of time penalty can outweigh a
//! single outstanding goal. Ties between equal keys are broken by the
//! frontier's insertion counter, never by comparing sequences.

use std::cmp::Ordering;

use choreo_kernel::catalog::{GoalList, MoveCatalog};
use choreo_kernel::proof::canon::seconds_to_millis;
use ordered_float::OrderedFloat;

use crate::state::SearchState;

/// Lexicographic cost of a state. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PriorityKey {
    /// Goals still outstanding.
    pub goal_tier: usize,
    /// Filler moves still owed once every goal is complete (0 before that).
    pub filler_tier: usize,
    /// Time cost: `total + heuristic`, or its distance outside a window.
    pub time_tier: OrderedFloat<f64>,
}

impl PriorityKey {
    #[must_use]
    pub fn new(goal_tier: usize, filler_tier: usize, time_tier: f64) -> Self {
        Self {
            goal_tier,
            filler_tier,
            time_tier: OrderedFloat(time_tier),
        }
    }

    /// Canonical JSON projection (time tier as integer milliseconds).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "filler_tier": self.filler_tier,
            "goal_tier": self.goal_tier,
            "time_tier_ms": seconds_to_millis(self.time_tier.into_inner()),
        })
    }
}

/// Result of scoring one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Sum of durations of the outstanding goals.
    pub heuristic: f64,
    pub key: PriorityKey,
}

/// Trait for state scoring.
///
/// Implementations must be pure: equal states always yield equal keys.
pub trait PriorityFunction: Send + Sync {
    /// Score a state.
    fn evaluate(&self, state: &SearchState) -> Evaluation;

    /// Integer-only JSON description, committed into the search graph.
    fn descriptor(&self) -> serde_json::Value;
}

/// Precomputed `Σ duration(g)` over `goals[k..]` for every `k`.
#[derive(Debug, Clone, PartialEq)]
struct RemainingGoalTime {
    table: Vec<f64>,
}

impl RemainingGoalTime {
    fn new(catalog: &MoveCatalog, goals: &GoalList) -> Self {
        // Summed front-to-back per suffix so values match a direct sum exactly.
        let table = (0..=goals.len())
            .map(|k| goals.remaining(k).iter().map(|g| catalog.duration(g)).sum())
            .collect();
        Self { table }
    }

    fn at(&self, goals_completed: usize) -> f64 {
        self.table
            .get(goals_completed)
            .copied()
            .unwrap_or_default()
    }

    fn goal_count(&self) -> usize {
        self.table.len().saturating_sub(1)
    }
}

/// `(goals_remaining, 0, total_time + heuristic)`.
///
/// Completes goals first, then prefers the shortest plan.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDominant {
    remaining: RemainingGoalTime,
}

impl GoalDominant {
    #[must_use]
    pub fn new(catalog: &MoveCatalog, goals: &GoalList) -> Self {
        Self {
            remaining: RemainingGoalTime::new(catalog, goals),
        }
    }
}

impl PriorityFunction for GoalDominant {
    fn evaluate(&self, state: &SearchState) -> Evaluation {
        let heuristic = self.remaining.at(state.goals_completed());
        let goals_remaining = self
            .remaining
            .goal_count()
            .saturating_sub(state.goals_completed());
        Evaluation {
            heuristic,
            key: PriorityKey::new(goals_remaining, 0, state.total_time() + heuristic),
        }
    }

    fn descriptor(&self) -> serde_json::Value {
        serde_json::json!({"mode": "goal_dominant"})
    }
}

/// `(goals_remaining, filler_deficit, time_distance)`.
///
/// Completes goals first, then pads with filler moves up to `min_filler`,
/// then steers the estimated final time into `[min_time, max_time]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TieredWindow {
    remaining: RemainingGoalTime,
    min_time: f64,
    max_time: f64,
    min_filler: usize,
}

impl TieredWindow {
    #[must_use]
    pub fn new(
        catalog: &MoveCatalog,
        goals: &GoalList,
        min_time: f64,
        max_time: f64,
        min_filler: usize,
    ) -> Self {
        Self {
            remaining: RemainingGoalTime::new(catalog, goals),
            min_time,
            max_time,
            min_filler,
        }
    }

    /// Distance of `estimate` outside `[min_time, max_time]`; 0 inside.
    #[must_use]
    pub fn window_distance(&self, estimate: f64) -> f64 {
        match (
            estimate.partial_cmp(&self.min_time),
            estimate.partial_cmp(&self.max_time),
        ) {
            (Some(Ordering::Less), _) => self.min_time - estimate,
            (_, Some(Ordering::Greater)) => estimate - self.max_time,
            _ => 0.0,
        }
    }
}

impl PriorityFunction for TieredWindow {
    fn evaluate(&self, state: &SearchState) -> Evaluation {
        let heuristic = self.remaining.at(state.goals_completed());
        let goals_remaining = self
            .remaining
            .goal_count()
            .saturating_sub(state.goals_completed());
        let filler_deficit = if goals_remaining == 0 {
            self.min_filler.saturating_sub(state.filler_count())
        } else {
            0
        };
        let distance = self.window_distance(state.total_time() + heuristic);
        Evaluation {
            heuristic,
            key: PriorityKey::new(goals_remaining, filler_deficit, distance),
        }
    }

    fn descriptor(&self) -> serde_json::Value {
        serde_json::json!({
            "max_time_ms": seconds_to_millis(self.max_time),
            "min_filler": self.min_filler,
            "min_time_ms": seconds_to_millis(self.min_time),
            "mode": "tiered",
        })
    }
}

/// Configuration-level selector for the priority function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriorityMode {
    GoalDominant,
    Tiered {
        min_time: f64,
        max_time: f64,
        min_filler: usize,
    },
}

impl PriorityMode {
    /// Build the priority function for a catalog and goal list.
    #[must_use]
    pub fn build(&self, catalog: &MoveCatalog, goals: &GoalList) -> Box<dyn PriorityFunction> {
        match *self {
            Self::GoalDominant => Box::new(GoalDominant::new(catalog, goals)),
            Self::Tiered {
                min_time,
                max_time,
                min_filler,
            } => Box::new(TieredWindow::new(
                catalog, goals, min_time, max_time, min_filler,
            )),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoalDominant => "goal_dominant",
            Self::Tiered { .. } => "tiered",
        }
    }
}
