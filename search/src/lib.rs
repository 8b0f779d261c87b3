//! Choreo Search: deterministic best-first planning with an auditable pop log.
//!
//! This crate provides the search layer of the choreography planner. It
//! depends only on `choreo_kernel`; it does NOT depend on `choreo_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! choreo_kernel  ←  choreo_search  ←  choreo_harness
//! (catalog, hash)   (frontier, loop)   (config, report, execution)
//! ```
//!
//! # Key types
//!
//! - [`state::SearchState`]: immutable partial plan
//! - [`candidates::CandidateGenerator`]: legal successor enumeration
//! - [`priority::PriorityFunction`]: trait for state scoring; the goal-dominant
//!   and tiered-window forms ship with the crate
//! - [`search::search`]: the best-first loop
//! - [`graph::SearchGraph`]: pop-event audit log
//! - [`policy::SearchPolicy`]: budgets and dedup configuration

#![forbid(unsafe_code)]

pub mod candidates;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod policy;
pub mod priority;
pub mod search;
pub mod state;
