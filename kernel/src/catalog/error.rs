//! Catalog construction and lookup errors.

use super::move_id::MoveId;

/// Error type for catalog construction, lookup and goal validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// A move has no predecessor entry, so it can never be the target of a transition.
    #[error("unknown move `{id}`: no predecessor entry in the catalog")]
    UnknownMove { id: MoveId },
    /// A configured duration is negative, NaN or infinite.
    #[error("invalid duration {duration} for `{id}`: must be finite and >= 0")]
    InvalidDuration { id: MoveId, duration: f64 },
    /// The `START` sentinel was given its own catalog entry.
    #[error("`START` is reserved as the sequence-begin sentinel and cannot be a move")]
    ReservedIdentifier,
    /// Mandatory goals without predecessor entries (fail fast, no partial run).
    #[error("goals without predecessor entries: {}", join_ids(.goals))]
    GoalsWithoutPredecessors { goals: Vec<MoveId> },
    /// Canonical serialization of the catalog snapshot failed.
    #[error("catalog canonicalization failed: {detail}")]
    Canonicalization { detail: String },
}

fn join_ids(ids: &[MoveId]) -> String {
    ids.iter()
        .map(MoveId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
