//! `SearchGraph`: frontier-pop audit log.
//!
//! The normative decision surface is the ordered list of [`PopEvent`]
//! entries, one per frontier pop, whatever happened to the popped state.
//! Metadata binds the log to the catalog, policy and priority function it
//! was produced under.

use choreo_kernel::proof::canon::{canonical_json_bytes, canonical_json_hash, CanonError};
use choreo_kernel::proof::hash::{ContentHash, HashDomain};

use crate::policy::DedupKey;
use crate::priority::PriorityKey;

/// The complete search audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGraph {
    /// Ordered pop events (normative decision surface).
    pub pops: Vec<PopEvent>,
    /// Aggregate metadata with snapshot bindings.
    pub metadata: SearchGraphMetadata,
}

/// A single frontier pop and what the engine did with it.
#[derive(Debug, Clone, PartialEq)]
pub struct PopEvent {
    /// Total order of frontier pops.
    pub pop_order: u64,
    /// Creation order of the popped node.
    pub node: u64,
    /// Creation order of its parent (`None` for root).
    pub parent: Option<u64>,
    /// Hex fingerprint of the popped state under the dedup key.
    pub state_fingerprint: String,
    /// The priority at time of pop.
    pub pop_key: PriorityKey,
    /// Length of the popped sequence.
    pub depth: usize,
    pub goals_completed: usize,
    pub outcome: PopOutcome,
}

/// What happened to a popped state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcome {
    /// Visited key already present; discarded without counting an expansion.
    DuplicateDiscarded,
    /// All goals complete; recorded as the `index`-th solution, not expanded.
    SolutionRecorded { index: u64 },
    /// Sequence reached `max_steps`; discarded as a dead end.
    StepLimitDiscarded,
    /// Expanded; `children` lists the creation orders of pushed successors
    /// (empty for a dead end).
    Expanded { children: Vec<u64> },
}

/// Aggregate metadata with snapshot bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGraphMetadata {
    // Snapshot bindings
    pub catalog_digest: String,
    pub policy_digest: String,
    pub priority: serde_json::Value,
    pub root_state_fingerprint: String,

    // Counters
    pub total_pops: u64,
    pub total_expansions: u64,
    pub total_candidates_generated: u64,
    pub total_duplicates_discarded: u64,
    pub total_step_limit_discards: u64,
    pub total_dead_ends: u64,
    pub solutions_found: u64,
    pub termination_reason: TerminationReason,
    pub frontier_high_water: u64,

    // Policy echo
    pub dedup_key: DedupKey,
}

/// Why the search terminated.
///
/// Finding solutions never terminates the loop: the engine keeps
/// collecting them until one of these holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Frontier emptied.
    FrontierExhausted,
    /// `max_expansions` budget was hit.
    ExpansionBudgetExceeded,
    /// The frontier reported non-empty but yielded nothing.
    FrontierInvariantViolation,
}

impl TerminationReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::FrontierInvariantViolation => "frontier_invariant_violation",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraph {
    /// Serialize the graph to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails (a float slipped into
    /// the priority descriptor).
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest of the canonical JSON.
    ///
    /// # Errors
    ///
    /// See [`to_canonical_json_bytes`](Self::to_canonical_json_bytes).
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        canonical_json_hash(HashDomain::SearchGraph, &self.to_json_value())
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "metadata": metadata_to_json(&self.metadata),
            "pops": self.pops.iter().map(pop_event_to_json).collect::<Vec<_>>(),
            "schema_version": "search_graph.v1",
        })
    }
}

fn pop_event_to_json(e: &PopEvent) -> serde_json::Value {
    serde_json::json!({
        "depth": e.depth,
        "goals_completed": e.goals_completed,
        "node": e.node,
        "outcome": outcome_to_json(&e.outcome),
        "parent": e.parent,
        "pop_key": e.pop_key.to_json(),
        "pop_order": e.pop_order,
        "state_fingerprint": e.state_fingerprint,
    })
}

fn outcome_to_json(o: &PopOutcome) -> serde_json::Value {
    match o {
        PopOutcome::DuplicateDiscarded => serde_json::json!({"type": "duplicate_discarded"}),
        PopOutcome::SolutionRecorded { index } => {
            serde_json::json!({"index": index, "type": "solution_recorded"})
        }
        PopOutcome::StepLimitDiscarded => serde_json::json!({"type": "step_limit_discarded"}),
        PopOutcome::Expanded { children } => {
            serde_json::json!({"children": children, "type": "expanded"})
        }
    }
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "catalog_digest": m.catalog_digest,
        "dedup_key": m.dedup_key.as_str(),
        "frontier_high_water": m.frontier_high_water,
        "policy_digest": m.policy_digest,
        "priority": m.priority,
        "root_state_fingerprint": m.root_state_fingerprint,
        "solutions_found": m.solutions_found,
        "termination_reason": {"type": m.termination_reason.as_str()},
        "total_candidates_generated": m.total_candidates_generated,
        "total_dead_ends": m.total_dead_ends,
        "total_duplicates_discarded": m.total_duplicates_discarded,
        "total_expansions": m.total_expansions,
        "total_pops": m.total_pops,
        "total_step_limit_discards": m.total_step_limit_discards,
    })
}
