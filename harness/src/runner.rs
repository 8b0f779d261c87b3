//! Harness runner: profile → catalog → search → report.
//!
//! # Pipeline
//!
//! ```text
//! Profile::resolve() → catalog() / goal_list() / search_policy()
//!   → priority_mode().build() → search()
//!   → PlanReport::from_outcome() → graph digest
//! ```

use choreo_kernel::proof::canon::CanonError;
use choreo_kernel::proof::hash::ContentHash;
use choreo_search::error::SearchError;
use choreo_search::search::{search, SearchOutcome};

use crate::config::{ConfigError, Profile};
use crate::report::PlanReport;

/// Error during a planning run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("search refused to start: {0}")]
    Search(#[from] SearchError),
    #[error("cannot hash search graph: {0}")]
    Canon(#[from] CanonError),
}

/// Outputs of one planning run.
#[derive(Debug, Clone)]
pub struct PlanRun {
    pub profile: Profile,
    pub report: PlanReport,
    pub outcome: SearchOutcome,
    /// Digest of the normalized profile the run used.
    pub profile_digest: ContentHash,
    /// Digest of the canonical search graph.
    pub graph_digest: ContentHash,
}

/// Plan with an already-loaded profile.
///
/// # Errors
///
/// [`RunError::Config`] if the catalog or priority cannot be built,
/// [`RunError::Search`] for pre-flight search failures.
pub fn run_profile(profile: Profile) -> Result<PlanRun, RunError> {
    let catalog = profile.catalog()?;
    let goals = profile.goal_list();
    let policy = profile.search_policy();
    let mode = profile.priority_mode()?;
    let priority = mode.build(&catalog, &goals);
    let profile_digest = profile.digest()?;

    tracing::info!(
        profile = %profile.name,
        profile_digest = %profile_digest,
        priority = mode.as_str(),
        goals = goals.len(),
        moves = catalog.len(),
        "planning"
    );

    let outcome = search(&catalog, &goals, &policy, priority.as_ref())?;
    let report = PlanReport::from_outcome(&profile, &goals, &outcome);
    let graph_digest = outcome.graph.digest()?;

    tracing::info!(
        status = ?report.status,
        expansions = report.expansions,
        graph_digest = %graph_digest,
        "planning finished"
    );

    Ok(PlanRun {
        profile,
        report,
        outcome,
        profile_digest,
        graph_digest,
    })
}

/// Resolve `name_or_path` (built-in name or TOML path) and plan with it.
///
/// # Errors
///
/// As [`Profile::resolve`] and [`run_profile`].
pub fn run(name_or_path: &str) -> Result<PlanRun, RunError> {
    run_profile(Profile::resolve(name_or_path)?)
}
