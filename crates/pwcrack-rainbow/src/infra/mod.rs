//! Infrastructure layer - Table finalization and file persistence
//!
//! This module handles the one-shot sort/deduplication pass and the on-disk
//! table format.

pub mod table_io;
pub mod table_sort;
