//! Table finalization
//!
//! Sorts a generated table by endpoint and removes duplicate endpoints,
//! keeping the first occurrence. Performed exactly once per table, after
//! generation and before search or persistence.
//!
//! Only byte-identical endpoints are collapsed; chains that merge at an
//! earlier column and still render distinct endpoints survive as separate
//! rows.

use rayon::prelude::*;

use crate::domain::table::RainbowTable;

/// Sort the table's chains by endpoint in alphabet order.
pub fn sort_table_parallel(table: &mut RainbowTable) {
    table
        .chains_mut()
        .par_sort_unstable_by(|a, b| a.endpoint.cmp(&b.endpoint));
}

/// Remove adjacent chains sharing an endpoint, keeping the first.
///
/// Expects the sorted order produced by [`sort_table_parallel`].
pub fn deduplicate_table(table: &mut RainbowTable) {
    table.chains_mut().dedup_by(|a, b| a.endpoint == b.endpoint);
}

/// Finalize a table: sort by endpoint, then deduplicate.
pub fn finalize_table(table: &mut RainbowTable) {
    sort_table_parallel(table);
    deduplicate_table(table);
}
