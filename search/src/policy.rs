//! Search policy: budgets, candidate-generation knobs and dedup configuration.

use choreo_kernel::proof::canon::canonical_json_hash;
use choreo_kernel::proof::hash::{ContentHash, HashDomain};

use crate::error::SearchError;

/// Search budgets and generator configuration.
///
/// Defaults reproduce the planner's stock constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on state expansions (`MAX_EXPANSIONS`).
    pub max_expansions: u64,
    /// Sequences of this length are never expanded (`MAX_STEPS`).
    pub max_steps: usize,
    /// Longest allowed run of one identical move (`MAX_CONSECUTIVE_REPEATS`).
    pub max_consecutive_repeats: usize,
    /// Whether fillers may be offered once every goal is complete (`ALLOW_POST_FILL`).
    pub allow_post_fill: bool,
    /// Number of ranked alternatives to keep (`KEEP_TOP_K`).
    pub keep_top_k: usize,
    /// Visited-set key granularity.
    pub dedup_key: DedupKey,
}

impl SearchPolicy {
    /// Validate value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_consecutive_repeats`
    /// is zero (no move could ever be appended).
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_consecutive_repeats == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_consecutive_repeats must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// JSON projection committed into the search graph metadata.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "allow_post_fill": self.allow_post_fill,
            "dedup_key": self.dedup_key.as_str(),
            "keep_top_k": self.keep_top_k,
            "max_consecutive_repeats": self.max_consecutive_repeats,
            "max_expansions": self.max_expansions,
            "max_steps": self.max_steps,
        })
    }

    /// Content digest of [`to_json`](Self::to_json).
    ///
    /// `None` only if canonicalization fails, which cannot happen for the
    /// integer/bool/string projection above.
    #[must_use]
    pub fn digest(&self) -> Option<ContentHash> {
        canonical_json_hash(HashDomain::SearchPolicy, &self.to_json()).ok()
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_expansions: 10_000,
            max_steps: 50,
            max_consecutive_repeats: 3,
            allow_post_fill: true,
            keep_top_k: 5,
            dedup_key: DedupKey::FullPath,
        }
    }
}

/// Visited-set key policy: which states count as "the same" for dedup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupKey {
    /// `(sequence, goals_completed)`: distinct paths are never merged, which
    /// preserves path diversity in the alternatives list. Default.
    #[default]
    FullPath,
    /// `(current_move, goals_completed, filler_count)`: canonical key that
    /// merges structurally equivalent states reached by different paths.
    CurrentMove,
}

impl DedupKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullPath => "full_path",
            Self::CurrentMove => "current_move",
        }
    }
}
