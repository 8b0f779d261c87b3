//! `MoveCatalog`: immutable duration and precedence lookup.
//!
//! Durations and predecessor sets are independent tables, as in the
//! configuration they come from: a move may have a duration without a
//! predecessor entry (it can never be reached) and a predecessor entry
//! without a duration (it falls back to the default duration).
//!
//! Both tables are `BTreeMap`s so every enumeration is lexicographic by
//! move identifier.

use std::collections::{BTreeMap, BTreeSet};

use super::error::CatalogError;
use super::goals::GoalList;
use super::move_id::{MoveId, START};
use crate::proof::canon::{canonical_json_bytes, seconds_to_millis};
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Immutable move catalog, loaded once and shared by reference with the search.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveCatalog {
    default_duration: f64,
    durations: BTreeMap<MoveId, f64>,
    predecessors: BTreeMap<MoveId, BTreeSet<MoveId>>,
}

impl MoveCatalog {
    /// Build a catalog from its duration and predecessor tables.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidDuration`] if the default or any configured
    ///   duration is negative or not finite.
    /// - [`CatalogError::ReservedIdentifier`] if `START` appears as a key.
    pub fn new(
        default_duration: f64,
        durations: BTreeMap<MoveId, f64>,
        predecessors: BTreeMap<MoveId, BTreeSet<MoveId>>,
    ) -> Result<Self, CatalogError> {
        check_duration(&MoveId::new("<default>"), default_duration)?;
        for (id, &duration) in &durations {
            if id.is_start() {
                return Err(CatalogError::ReservedIdentifier);
            }
            check_duration(id, duration)?;
        }
        if predecessors.contains_key(START) {
            return Err(CatalogError::ReservedIdentifier);
        }
        Ok(Self {
            default_duration,
            durations,
            predecessors,
        })
    }

    /// Duration used for moves without a configured entry.
    #[must_use]
    pub fn default_duration(&self) -> f64 {
        self.default_duration
    }

    /// Configured duration of `id`, or the default duration.
    ///
    /// Never fails: a missing entry is recovered silently.
    #[must_use]
    pub fn duration(&self, id: &MoveId) -> f64 {
        match self.durations.get(id) {
            Some(&d) => d,
            None => {
                tracing::trace!(move_id = %id, "no duration entry, using default");
                self.default_duration
            }
        }
    }

    /// Predecessor set of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownMove`] if `id` has no predecessor entry.
    pub fn predecessors_of(&self, id: &MoveId) -> Result<&BTreeSet<MoveId>, CatalogError> {
        self.predecessors
            .get(id)
            .ok_or_else(|| CatalogError::UnknownMove { id: id.clone() })
    }

    /// Whether `next` may directly follow `prev`.
    ///
    /// `false` when `next` has no predecessor entry.
    #[must_use]
    pub fn can_follow(&self, prev: &MoveId, next: &MoveId) -> bool {
        self.predecessors
            .get(next)
            .is_some_and(|preds| preds.contains(prev))
    }

    /// All moves that can be the target of a transition, with their
    /// predecessor sets, in lexicographic order.
    pub fn transitions(&self) -> impl Iterator<Item = (&MoveId, &BTreeSet<MoveId>)> {
        self.predecessors.iter()
    }

    /// Number of moves with a predecessor entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// Goals lacking a predecessor entry, in goal-list order (deduplicated).
    ///
    /// A non-empty result means the search must not run.
    #[must_use]
    pub fn validate(&self, goals: &GoalList) -> Vec<MoveId> {
        let mut seen = BTreeSet::new();
        goals
            .iter()
            .filter(|g| !self.predecessors.contains_key(*g))
            .filter(|g| seen.insert((*g).clone()))
            .cloned()
            .collect()
    }

    /// [`validate`](Self::validate) as a fail-fast check.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::GoalsWithoutPredecessors`] listing every
    /// offending goal.
    pub fn require_goals(&self, goals: &GoalList) -> Result<(), CatalogError> {
        let missing = self.validate(goals);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::GoalsWithoutPredecessors { goals: missing })
        }
    }

    /// Canonical JSON snapshot of the catalog and goal list.
    ///
    /// Durations are committed as integer milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Canonicalization`] if serialization fails.
    pub fn canonical_bytes(&self, goals: &GoalList) -> Result<Vec<u8>, CatalogError> {
        let durations: serde_json::Map<String, serde_json::Value> = self
            .durations
            .iter()
            .map(|(id, &d)| (id.to_string(), seconds_to_millis(d).into()))
            .collect();
        let predecessors: serde_json::Map<String, serde_json::Value> = self
            .predecessors
            .iter()
            .map(|(id, preds)| {
                let list: Vec<&str> = preds.iter().map(MoveId::as_str).collect();
                (id.to_string(), serde_json::json!(list))
            })
            .collect();
        let goal_list: Vec<&str> = goals.iter().map(MoveId::as_str).collect();

        let value = serde_json::json!({
            "default_duration_ms": seconds_to_millis(self.default_duration),
            "durations_ms": durations,
            "goals": goal_list,
            "predecessors": predecessors,
            "schema_version": "catalog.v1",
        });
        canonical_json_bytes(&value).map_err(|e| CatalogError::Canonicalization {
            detail: e.to_string(),
        })
    }

    /// Content digest of [`canonical_bytes`](Self::canonical_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Canonicalization`] if serialization fails.
    pub fn digest(&self, goals: &GoalList) -> Result<ContentHash, CatalogError> {
        let bytes = self.canonical_bytes(goals)?;
        Ok(canonical_hash(HashDomain::CatalogSnapshot, &bytes))
    }
}

fn check_duration(id: &MoveId, duration: f64) -> Result<(), CatalogError> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidDuration {
            id: id.clone(),
            duration,
        })
    }
}
