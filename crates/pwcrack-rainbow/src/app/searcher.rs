//! Online phase - password recovery
//!
//! Recovers the plaintext behind a target digest from a set of finalized
//! tables. Columns are scanned from the last reduction backwards with every
//! table probed per column, so the cheapest candidates are verified first.
//! An unsuccessful search is an ordinary outcome, reported as `None`.

use crate::domain::alphabet::Password;
use crate::domain::chain::verify_chain;
use crate::domain::hash::{Digest, HashPrimitive, reduce_digest};
use crate::domain::params::TableParams;
use crate::domain::table::RainbowTable;

/// Look up a digest across finalized tables.
///
/// Returns the recovered plaintext, or `None` when no chain covers it.
/// Endpoint matches whose replay disagrees with the target digest are false
/// alarms from reduction collisions; the search silently moves on.
pub fn online_search<H: HashPrimitive>(
    target: &Digest,
    tables: &[RainbowTable],
    params: &TableParams,
    hasher: &H,
) -> Option<Password> {
    debug_assert!(hasher.digest_len() >= params.counter_width());

    for column in (0..params.chain_length() - 1).rev() {
        for table in tables {
            if let Some(found) = search_column(target, table, column, params, hasher) {
                return Some(found);
            }
        }
    }

    None
}

/// Probe one table at one column position.
///
/// Walks the digest forward to the endpoint column, looks the candidate
/// endpoint up, and verifies a hit by replaying the matched chain from its
/// startpoint.
fn search_column<H: HashPrimitive>(
    target: &Digest,
    table: &RainbowTable,
    column: u32,
    params: &TableParams,
    hasher: &H,
) -> Option<Password> {
    let table_index = table.table_index();
    let last_reduction = params.chain_length() - 2;

    let mut digest = target.clone();
    for iteration in column..last_reduction {
        let plaintext = reduce_digest(&digest, iteration, table_index, params);
        digest = hasher.digest(plaintext.as_bytes());
    }
    let endpoint = reduce_digest(&digest, last_reduction, table_index, params);

    let chain = table.find_by_endpoint(&endpoint)?;
    verify_chain(
        &chain.startpoint,
        column,
        target,
        params,
        hasher,
        table_index,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::generator::generate_table;
    use crate::domain::hash::HashKind;
    use crate::infra::table_sort::finalize_table;

    fn small_finalized_table(table_index: u32) -> (TableParams, RainbowTable) {
        let params = TableParams::new(2, 10, 1, 0.1).unwrap();
        let mut table = generate_table(&params, &HashKind::Sha1, table_index).unwrap();
        finalize_table(&mut table);
        (params, table)
    }

    #[test]
    fn test_search_empty_table() {
        let params = TableParams::new(2, 10, 1, 0.1).unwrap();
        let tables = vec![RainbowTable::from_parts(0, Vec::new())];
        let target = HashKind::Sha1.digest(b"00");

        assert_eq!(online_search(&target, &tables, &params, &HashKind::Sha1), None);
    }

    #[test]
    fn test_search_no_tables() {
        let params = TableParams::new(2, 10, 1, 0.1).unwrap();
        let target = HashKind::Sha1.digest(b"00");

        assert_eq!(online_search(&target, &[], &params, &HashKind::Sha1), None);
    }

    #[test]
    fn test_search_recovers_startpoint() {
        let (params, table) = small_finalized_table(0);
        let hasher = HashKind::Sha1;

        let startpoint = table.chains()[0].startpoint.clone();
        let target = hasher.digest(startpoint.as_bytes());

        let found = online_search(&target, std::slice::from_ref(&table), &params, &hasher);
        assert_eq!(found, Some(startpoint));
    }

    #[test]
    fn test_search_recovers_last_reduction_column() {
        let (params, table) = small_finalized_table(0);
        let hasher = HashKind::Sha1;

        // Walk a kept chain to its last searchable column (T-2).
        let chain = &table.chains()[table.len() / 2];
        let mut plaintext = chain.startpoint.clone();
        for iteration in 0..params.chain_length() - 2 {
            let digest = hasher.digest(plaintext.as_bytes());
            plaintext = reduce_digest(&digest, iteration, table.table_index(), &params);
        }
        let target = hasher.digest(plaintext.as_bytes());

        let found = online_search(&target, std::slice::from_ref(&table), &params, &hasher);
        assert_eq!(found, Some(plaintext));
    }

    #[test]
    fn test_search_never_returns_mismatching_plaintext() {
        let (params, table) = small_finalized_table(0);
        let hasher = HashKind::Sha1;

        for counter in 0..64 {
            let plaintext = crate::domain::alphabet::startpoint_of(counter, 2);
            let target = hasher.digest(plaintext.as_bytes());

            if let Some(found) =
                online_search(&target, std::slice::from_ref(&table), &params, &hasher)
            {
                assert_eq!(hasher.digest(found.as_bytes()), target);
            }
        }
    }
}
