//! Choreo Harness: profile-level orchestration around the search.
//!
//! The harness loads a profile, builds the catalog and policy, runs the
//! search and turns the outcome into a report, a saved plan and, on
//! request, a performance on the robot.
//!
//! The harness does NOT implement search logic; it delegates to
//! `choreo_search`. Profiles provide data only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod execution;
pub mod plan_dir;
pub mod report;
pub mod runner;
