//! Choreo Kernel: the immutable data layer of the choreography planner.
//!
//! # API Surface
//!
//! - [`catalog::MoveCatalog`] -- move durations and predecessor sets
//! - [`catalog::GoalList`] -- the ordered mandatory goals
//! - [`proof::canon::canonical_json_bytes`] / [`proof::hash::canonical_hash`] --
//!   the single canonicalization and hashing implementation
//!
//! # Module Dependency Direction
//!
//! `proof` ← `catalog`
//!
//! One-way only. `proof` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod proof;
