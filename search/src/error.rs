//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (frontier exhaustion, budget exhaustion, "no solution") are expressed via
//! [`crate::graph::TerminationReason`] and always produce a `SearchGraph`
//! audit trail.

use choreo_kernel::catalog::CatalogError;

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before search execution begins. No
/// `SearchGraph` is produced because no search steps were taken.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The catalog cannot support the goal list (e.g. a goal without a
    /// predecessor entry). Fatal: the search does not run.
    #[error("configuration error: {0}")]
    Configuration(#[from] CatalogError),
    /// A policy value is outside its supported range.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}
