//! Planner profiles: TOML documents describing a catalog, a goal list and
//! every search constant.
//!
//! Two profiles are built in (`classic` and `ranged`); any other profile is
//! read from a file path.
//!
//! ```toml
//! name = "demo"
//! goals = ["A", "B"]
//!
//! [timing]
//! target_time = 5.0
//! default_duration = 3.0
//!
//! [moves.A]
//! duration = 2.0
//! predecessors = ["START"]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use choreo_kernel::catalog::{CatalogError, GoalList, MoveCatalog, MoveId};
use choreo_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use choreo_search::policy::{DedupKey, SearchPolicy};
use choreo_search::priority::PriorityMode;
use serde::{Deserialize, Serialize};

const CLASSIC_TOML: &str = include_str!("../profiles/classic.toml");
const RANGED_TOML: &str = include_str!("../profiles/ranged.toml");

/// Names accepted by [`Profile::builtin`].
pub const BUILTIN_PROFILES: &[&str] = &["classic", "ranged"];

/// Profile used when none is named.
pub const DEFAULT_PROFILE: &str = "ranged";

/// Error loading or validating a profile.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed profile: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize profile: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unknown built-in profile {name:?} (expected one of: classic, ranged)")]
    UnknownProfile { name: String },
    #[error("invalid profile: {detail}")]
    Invalid { detail: String },
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// A complete planner profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    /// Mandatory goals, in required order.
    pub goals: Vec<String>,
    pub timing: TimingConfig,
    #[serde(default)]
    pub budget: BudgetConfig,
    #[serde(default)]
    pub priority: PriorityConfig,
    #[serde(default)]
    pub search: SearchConfig,
    /// Per-move duration and predecessor entries.
    #[serde(default)]
    pub moves: BTreeMap<String, MoveConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Seconds the plan should approach; reported, not searched on.
    pub target_time: f64,
    /// Lower bound of the acceptable window (tiered profiles).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_time: Option<f64>,
    /// Upper bound of the acceptable window (tiered profiles).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time: Option<f64>,
    /// Duration of moves without an explicit entry.
    pub default_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BudgetConfig {
    pub max_expansions: u64,
    pub max_steps: usize,
    pub max_consecutive_repeats: usize,
    pub allow_post_fill: bool,
    pub keep_top_k: usize,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        let policy = SearchPolicy::default();
        Self {
            max_expansions: policy.max_expansions,
            max_steps: policy.max_steps,
            max_consecutive_repeats: policy.max_consecutive_repeats,
            allow_post_fill: policy.allow_post_fill,
            keep_top_k: policy.keep_top_k,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityKind {
    #[default]
    GoalDominant,
    Tiered,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriorityConfig {
    pub mode: PriorityKind,
    /// Filler moves required once every goal is complete (tiered only).
    pub min_filler: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupConfig {
    #[default]
    FullPath,
    CurrentMove,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub dedup: DedupConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoveConfig {
    /// Seconds; falls back to `timing.default_duration`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Moves allowed directly before this one (`START` = may open the plan).
    /// Absent means the move can never be the target of a transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predecessors: Option<Vec<String>>,
}

impl Profile {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys, or any
    /// [`validate`](Self::validate) failure.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let profile: Self = toml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read a profile file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), profile = %profile.name, "profile loaded");
        Ok(profile)
    }

    /// One of the embedded profiles.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownProfile`] for any name outside
    /// [`BUILTIN_PROFILES`].
    pub fn builtin(name: &str) -> Result<Self, ConfigError> {
        let text = match name {
            "classic" => CLASSIC_TOML,
            "ranged" => RANGED_TOML,
            _ => {
                return Err(ConfigError::UnknownProfile {
                    name: name.to_string(),
                })
            }
        };
        let profile = Self::from_toml_str(text)?;
        tracing::info!(profile = %profile.name, "built-in profile loaded");
        Ok(profile)
    }

    /// A built-in profile name, or else a path to a TOML file.
    ///
    /// # Errors
    ///
    /// As [`builtin`](Self::builtin) or [`load`](Self::load).
    pub fn resolve(name_or_path: &str) -> Result<Self, ConfigError> {
        if BUILTIN_PROFILES.contains(&name_or_path) {
            Self::builtin(name_or_path)
        } else {
            Self::load(Path::new(name_or_path))
        }
    }

    /// Serialize back to TOML.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Serialize`] if TOML serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Digest of the profile's normalized TOML form.
    ///
    /// Comments and key order in the source file do not affect it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Serialize`] if TOML serialization fails.
    pub fn digest(&self) -> Result<ContentHash, ConfigError> {
        let text = self.to_toml_string()?;
        Ok(canonical_hash(HashDomain::ProfileSnapshot, text.as_bytes()))
    }

    /// Check value ranges and that the catalog can be built.
    ///
    /// Goals without predecessor entries are NOT rejected here; the search
    /// reports them as a configuration error before it starts.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] or [`ConfigError::Catalog`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.goals.is_empty() {
            return Err(invalid("goals must not be empty"));
        }
        if self.budget.max_consecutive_repeats == 0 {
            return Err(invalid("budget.max_consecutive_repeats must be at least 1"));
        }
        let t = &self.timing;
        if !(t.target_time.is_finite() && t.target_time >= 0.0) {
            return Err(invalid("timing.target_time must be a non-negative number"));
        }
        match (t.min_time, t.max_time) {
            (Some(min), Some(max)) if !(min.is_finite() && max.is_finite() && min <= max) => {
                return Err(invalid(&format!(
                    "timing.min_time ({min}) must not exceed timing.max_time ({max})"
                )));
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(invalid("timing.min_time and timing.max_time go together"));
            }
            _ => {}
        }
        if self.priority.mode == PriorityKind::Tiered && self.time_window().is_none() {
            return Err(invalid("tiered priority requires timing.min_time and timing.max_time"));
        }
        self.catalog()?;
        Ok(())
    }

    #[must_use]
    pub fn goal_list(&self) -> GoalList {
        self.goals.iter().map(|g| MoveId::new(g.as_str())).collect()
    }

    /// Build the immutable move catalog.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Catalog`] for invalid durations or a `START` entry.
    pub fn catalog(&self) -> Result<MoveCatalog, ConfigError> {
        let mut durations = BTreeMap::new();
        let mut predecessors = BTreeMap::new();
        for (name, entry) in &self.moves {
            let id = MoveId::new(name.as_str());
            if let Some(d) = entry.duration {
                durations.insert(id.clone(), d);
            }
            if let Some(preds) = &entry.predecessors {
                let set: BTreeSet<MoveId> = preds.iter().map(|p| MoveId::new(p.as_str())).collect();
                predecessors.insert(id, set);
            }
        }
        Ok(MoveCatalog::new(
            self.timing.default_duration,
            durations,
            predecessors,
        )?)
    }

    #[must_use]
    pub fn search_policy(&self) -> SearchPolicy {
        SearchPolicy {
            max_expansions: self.budget.max_expansions,
            max_steps: self.budget.max_steps,
            max_consecutive_repeats: self.budget.max_consecutive_repeats,
            allow_post_fill: self.budget.allow_post_fill,
            keep_top_k: self.budget.keep_top_k,
            dedup_key: match self.search.dedup {
                DedupConfig::FullPath => DedupKey::FullPath,
                DedupConfig::CurrentMove => DedupKey::CurrentMove,
            },
        }
    }

    /// The configured priority function selector.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] for a tiered profile without a time window.
    pub fn priority_mode(&self) -> Result<PriorityMode, ConfigError> {
        match self.priority.mode {
            PriorityKind::GoalDominant => Ok(PriorityMode::GoalDominant),
            PriorityKind::Tiered => {
                let (min_time, max_time) = self.time_window().ok_or_else(|| {
                    invalid("tiered priority requires timing.min_time and timing.max_time")
                })?;
                Ok(PriorityMode::Tiered {
                    min_time,
                    max_time,
                    min_filler: self.priority.min_filler,
                })
            }
        }
    }

    /// `(min_time, max_time)` when both are configured.
    #[must_use]
    pub fn time_window(&self) -> Option<(f64, f64)> {
        self.timing.min_time.zip(self.timing.max_time)
    }

    /// Filler moves a plan must contain, if the profile requires any.
    #[must_use]
    pub fn min_filler(&self) -> Option<usize> {
        match self.priority.mode {
            PriorityKind::Tiered => Some(self.priority.min_filler),
            PriorityKind::GoalDominant => None,
        }
    }
}

fn invalid(detail: &str) -> ConfigError {
    ConfigError::Invalid {
        detail: detail.to_string(),
    }
}
