//! Search entry point and expansion loop.

use choreo_kernel::catalog::{GoalList, MoveCatalog};

use crate::candidates::CandidateGenerator;
use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::graph::{PopEvent, PopOutcome, SearchGraph, SearchGraphMetadata, TerminationReason};
use crate::node::SearchNode;
use crate::policy::SearchPolicy;
use crate::priority::PriorityFunction;
use crate::state::SearchState;

/// Whether the search produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    Solved,
    /// Budgets or the frontier ran out before any terminal state was popped.
    /// A valid negative result, not an error.
    NoSolutionFound,
}

/// Result of a search execution.
///
/// Always contains a complete [`SearchGraph`] audit trail regardless of how
/// the search terminated.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The lowest-priority solution (earliest discovered on ties).
    pub best: Option<SearchNode>,
    /// Up to `keep_top_k` solutions sorted by priority, best included.
    /// Empty unless more than one solution was found.
    pub alternatives: Vec<SearchNode>,
    /// Number of terminal states popped.
    pub solutions_found: u64,
    /// The complete search audit trail.
    pub graph: SearchGraph,
}

impl SearchOutcome {
    #[must_use]
    pub fn status(&self) -> PlanStatus {
        if self.best.is_some() {
            PlanStatus::Solved
        } else {
            PlanStatus::NoSolutionFound
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status() == PlanStatus::Solved
    }

    #[must_use]
    pub fn termination_reason(&self) -> TerminationReason {
        self.graph.metadata.termination_reason
    }

    /// Number of expansions performed.
    #[must_use]
    pub fn expansions(&self) -> u64 {
        self.graph.metadata.total_expansions
    }
}

#[derive(Debug, Default)]
struct Counters {
    pops: u64,
    expansions: u64,
    candidates_generated: u64,
    duplicates_discarded: u64,
    step_limit_discards: u64,
    dead_ends: u64,
}

/// Run best-first search from the empty plan.
///
/// The loop pops the lowest-priority state until the frontier is empty or
/// the expansion budget is spent. Terminal states are collected as
/// solutions and never expanded; states at `max_steps` are discarded.
///
/// # Errors
///
/// Pre-flight only:
/// - [`SearchError::InvalidPolicy`] if the policy fails validation.
/// - [`SearchError::Configuration`] if a goal has no predecessor entry.
///
/// No `SearchGraph` is produced in these cases because no search steps
/// were taken. Every runtime termination, including "no solution", returns
/// `Ok`.
#[allow(clippy::too_many_lines)]
pub fn search(
    catalog: &MoveCatalog,
    goals: &GoalList,
    policy: &SearchPolicy,
    priority: &dyn PriorityFunction,
) -> Result<SearchOutcome, SearchError> {
    policy.validate()?;
    catalog.require_goals(goals)?;
    let catalog_digest = catalog.digest(goals)?;
    let policy_digest = policy.digest().ok_or_else(|| SearchError::InvalidPolicy {
        detail: "policy is not canonicalizable".into(),
    })?;

    tracing::info!(
        goals = goals.len(),
        moves = catalog.len(),
        max_expansions = policy.max_expansions,
        max_steps = policy.max_steps,
        dedup_key = policy.dedup_key.as_str(),
        catalog_digest = %catalog_digest,
        "search started"
    );

    let generator = CandidateGenerator::new(catalog, goals, policy);
    let mut frontier = BestFirstFrontier::new();
    let mut pops: Vec<PopEvent> = Vec::new();
    let mut solutions: Vec<SearchNode> = Vec::new();
    let mut best: Option<usize> = None;
    let mut counters = Counters::default();
    let mut next_creation_order: u64 = 0;

    let root_state = SearchState::initial();
    let root_fp_hex = root_state
        .fingerprint(policy.dedup_key)
        .hex_digest()
        .to_string();
    let root_eval = priority.evaluate(&root_state);
    frontier.push(SearchNode::new(next_creation_order, None, root_state, root_eval));
    next_creation_order += 1;

    let termination_reason;

    loop {
        if frontier.is_empty() {
            termination_reason = TerminationReason::FrontierExhausted;
            break;
        }
        if counters.expansions >= policy.max_expansions {
            termination_reason = TerminationReason::ExpansionBudgetExceeded;
            break;
        }

        // Frontier was checked non-empty above
        let Some(current) = frontier.pop() else {
            termination_reason = TerminationReason::FrontierInvariantViolation;
            break;
        };
        let pop_order = counters.pops;
        counters.pops += 1;

        let fp_hex = current
            .state
            .fingerprint(policy.dedup_key)
            .hex_digest()
            .to_string();

        tracing::trace!(
            pop_order,
            node = current.creation_order,
            depth = current.state.len(),
            goals_completed = current.state.goals_completed(),
            total_time = current.state.total_time(),
            "pop"
        );

        let outcome = if !frontier.mark_visited(&fp_hex) {
            counters.duplicates_discarded += 1;
            PopOutcome::DuplicateDiscarded
        } else if current.state.is_terminal(goals) {
            let index = solutions.len() as u64;
            let improves = match best {
                Some(b) => current.priority < solutions[b].priority,
                None => true,
            };
            tracing::debug!(
                solution = index,
                node = current.creation_order,
                moves = current.state.len(),
                total_time = current.state.total_time(),
                improves,
                "solution found"
            );
            if improves {
                best = Some(solutions.len());
            }
            solutions.push(current.clone());
            PopOutcome::SolutionRecorded { index }
        } else if current.state.len() >= policy.max_steps {
            counters.step_limit_discards += 1;
            counters.dead_ends += 1;
            PopOutcome::StepLimitDiscarded
        } else {
            let state = &current.state;
            let candidates =
                generator.next_moves(&state.current_move(), state.goals_completed(), state.sequence());
            counters.candidates_generated += candidates.len() as u64;

            let mut children = Vec::with_capacity(candidates.len());
            for mv in candidates {
                let child_state = state.extend(mv, goals, catalog);
                let eval = priority.evaluate(&child_state);
                children.push(next_creation_order);
                frontier.push(SearchNode::new(
                    next_creation_order,
                    Some(current.creation_order),
                    child_state,
                    eval,
                ));
                next_creation_order += 1;
            }
            if children.is_empty() {
                counters.dead_ends += 1;
            }
            counters.expansions += 1;
            PopOutcome::Expanded { children }
        };

        pops.push(PopEvent {
            pop_order,
            node: current.creation_order,
            parent: current.parent,
            state_fingerprint: fp_hex,
            pop_key: current.priority,
            depth: current.state.len(),
            goals_completed: current.state.goals_completed(),
            outcome,
        });
    }

    let solutions_found = solutions.len() as u64;
    let best_node = best.map(|b| solutions[b].clone());
    let alternatives = rank_alternatives(solutions, policy.keep_top_k);

    tracing::info!(
        termination = %termination_reason,
        expansions = counters.expansions,
        pops = counters.pops,
        solutions = solutions_found,
        frontier_high_water = frontier.high_water(),
        solved = best_node.is_some(),
        "search finished"
    );

    let graph = SearchGraph {
        pops,
        metadata: SearchGraphMetadata {
            catalog_digest: catalog_digest.as_str().to_string(),
            policy_digest: policy_digest.as_str().to_string(),
            priority: priority.descriptor(),
            root_state_fingerprint: root_fp_hex,
            total_pops: counters.pops,
            total_expansions: counters.expansions,
            total_candidates_generated: counters.candidates_generated,
            total_duplicates_discarded: counters.duplicates_discarded,
            total_step_limit_discards: counters.step_limit_discards,
            total_dead_ends: counters.dead_ends,
            solutions_found,
            termination_reason,
            frontier_high_water: frontier.high_water(),
            dedup_key: policy.dedup_key,
        },
    };

    Ok(SearchOutcome {
        best: best_node,
        alternatives,
        solutions_found,
        graph,
    })
}

/// Stable sort by priority, truncated to `keep_top_k`.
///
/// Equal priorities keep discovery order. A single solution yields no
/// alternatives.
fn rank_alternatives(mut solutions: Vec<SearchNode>, keep_top_k: usize) -> Vec<SearchNode> {
    if solutions.len() <= 1 {
        return Vec::new();
    }
    solutions.sort_by_key(|n| n.priority);
    solutions.truncate(keep_top_k);
    solutions
}
