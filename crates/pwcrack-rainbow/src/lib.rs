//! pwcrack-rainbow - Rainbow table engine for fixed-length password recovery
//!
//! This crate provides functionality to:
//! - Plan and generate rainbow tables over a 64-symbol password alphabet
//! - Finalize tables (endpoint sort + deduplication) and persist them as text
//! - Recover a password from a digest using one or more finalized tables

pub mod constants;
pub mod error;
pub mod domain;
pub mod infra;
pub mod app;

// Re-export commonly used types
pub use app::generator::{generate_table, generate_table_parallel, offline};
pub use app::searcher::online_search;
pub use domain::alphabet::{Password, startpoint_of};
pub use domain::chain::{Chain, compute_chain, verify_chain};
pub use domain::hash::{Digest, HashKind, HashPrimitive, reduce_digest};
pub use domain::params::TableParams;
pub use domain::table::RainbowTable;
pub use error::RainbowError;
