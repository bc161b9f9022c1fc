//! Offline phase - table generation
//!
//! Builds a table's chains from sequential startpoint counters. Rows depend
//! only on their own startpoint and the shared read-only parameters, so the
//! sequential and rayon-parallel variants produce identical tables.

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::alphabet::startpoint_of;
use crate::domain::chain::compute_chain;
use crate::domain::hash::HashPrimitive;
use crate::domain::params::TableParams;
use crate::domain::table::RainbowTable;
use crate::error::RainbowError;
use crate::infra::table_sort::finalize_table;

/// Generate one table's raw chain set.
///
/// Row `i` starts from the fixed-length rendering of counter `i`; the table
/// index parameterizes the reduction family so tables stay decorrelated.
/// The result is unsorted; run the finalizer before searching or storing.
pub fn generate_table<H: HashPrimitive>(
    params: &TableParams,
    hasher: &H,
    table_index: u32,
) -> Result<RainbowTable, RainbowError> {
    generate_table_with_progress(params, hasher, table_index, |_, _| {})
}

/// Generate a table, reporting progress every 1000 rows and on completion.
pub fn generate_table_with_progress<H, F>(
    params: &TableParams,
    hasher: &H,
    table_index: u32,
    mut on_progress: F,
) -> Result<RainbowTable, RainbowError>
where
    H: HashPrimitive,
    F: FnMut(usize, usize),
{
    ensure_digest_width(params, hasher)?;

    let chain_count = params.chain_count();
    let mut table = RainbowTable::with_capacity(table_index, chain_count)?;

    for row in 0..chain_count {
        let startpoint = startpoint_of(row as u64, params.password_length());
        table.push(compute_chain(startpoint, params, hasher, table_index));

        if row.is_multiple_of(1000) {
            on_progress(row, chain_count);
        }
    }

    on_progress(chain_count, chain_count);
    Ok(table)
}

/// Generate a table with rows computed in parallel.
///
/// Produces the same table as [`generate_table`]; rows are collected back
/// in counter order.
pub fn generate_table_parallel<H: HashPrimitive>(
    params: &TableParams,
    hasher: &H,
    table_index: u32,
) -> Result<RainbowTable, RainbowError> {
    ensure_digest_width(params, hasher)?;

    let chain_count = params.chain_count();
    let mut chains = Vec::new();
    chains
        .try_reserve_exact(chain_count)
        .map_err(|_| RainbowError::Allocation {
            chains: chain_count,
        })?;

    (0..chain_count)
        .into_par_iter()
        .map(|row| {
            let startpoint = startpoint_of(row as u64, params.password_length());
            compute_chain(startpoint, params, hasher, table_index)
        })
        .collect_into_vec(&mut chains);

    Ok(RainbowTable::from_parts(table_index, chains))
}

/// Parallel generation with a progress callback.
///
/// The callback observes a row counter, not row order; it fires roughly
/// every 1000 completed rows and once at completion.
pub fn generate_table_parallel_with_progress<H, F>(
    params: &TableParams,
    hasher: &H,
    table_index: u32,
    on_progress: F,
) -> Result<RainbowTable, RainbowError>
where
    H: HashPrimitive,
    F: Fn(usize, usize) + Sync,
{
    ensure_digest_width(params, hasher)?;

    let chain_count = params.chain_count();
    let mut chains = Vec::new();
    chains
        .try_reserve_exact(chain_count)
        .map_err(|_| RainbowError::Allocation {
            chains: chain_count,
        })?;

    let completed = AtomicUsize::new(0);
    (0..chain_count)
        .into_par_iter()
        .map(|row| {
            let startpoint = startpoint_of(row as u64, params.password_length());
            let chain = compute_chain(startpoint, params, hasher, table_index);

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if done.is_multiple_of(1000) || done == chain_count {
                on_progress(done, chain_count);
            }
            chain
        })
        .collect_into_vec(&mut chains);

    Ok(RainbowTable::from_parts(table_index, chains))
}

/// Offline phase: generate and finalize every table of the run.
///
/// Tables get indices `0..table_count`, each with its own reduction family.
pub fn offline<H: HashPrimitive>(
    params: &TableParams,
    hasher: &H,
) -> Result<Vec<RainbowTable>, RainbowError> {
    let mut tables = Vec::with_capacity(params.table_count() as usize);

    for table_index in 0..params.table_count() {
        let mut table = generate_table_parallel(params, hasher, table_index)?;
        finalize_table(&mut table);
        tables.push(table);
    }

    Ok(tables)
}

fn ensure_digest_width<H: HashPrimitive>(
    params: &TableParams,
    hasher: &H,
) -> Result<(), RainbowError> {
    let needed = params.counter_width();
    let found = hasher.digest_len();

    if found < needed {
        return Err(RainbowError::DigestTooShort { needed, found });
    }
    Ok(())
}
