//! Application layer - Offline and online phase workflows
//!
//! This module coordinates domain and infrastructure layers to implement the
//! table generation, search and coverage-measurement use cases.

pub mod coverage;
pub mod generator;
pub mod searcher;
