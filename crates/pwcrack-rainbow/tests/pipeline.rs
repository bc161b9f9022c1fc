//! End-to-end pipeline tests
//!
//! Lightweight tests share a single mini table set built once through
//! `OnceLock` and exercise the full flow: generate -> finalize -> save ->
//! load -> search. The heavyweight test at the full reference parameters
//! (L=3, T=100) runs with `cargo test -- --ignored`.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::OnceLock;

use rand::Rng;
use tempfile::TempDir;

use pwcrack_rainbow::app::coverage::measure_coverage;
use pwcrack_rainbow::app::generator::{generate_table, generate_table_parallel, offline};
use pwcrack_rainbow::app::searcher::online_search;
use pwcrack_rainbow::domain::alphabet::Password;
use pwcrack_rainbow::domain::hash::HashKind;
use pwcrack_rainbow::domain::params::TableParams;
use pwcrack_rainbow::domain::table::RainbowTable;
use pwcrack_rainbow::infra::table_io::{load_table, save_table, table_file_name};
use pwcrack_rainbow::infra::table_sort::finalize_table;
use pwcrack_rainbow::{compute_chain, reduce_digest, startpoint_of, HashPrimitive};

// =============================================================================
// Shared mini table set (generated once, used by all lightweight tests)
// =============================================================================

struct SharedTables {
    params: TableParams,
    hasher: HashKind,
    tables: Vec<RainbowTable>,
    /// Kept alive so the saved files survive for the duration of the run.
    _temp_dir: TempDir,
    paths: Vec<PathBuf>,
}

static SHARED: OnceLock<SharedTables> = OnceLock::new();

fn shared() -> &'static SharedTables {
    SHARED.get_or_init(|| {
        let params = TableParams::new(2, 40, 2, 0.952).unwrap();
        let hasher = HashKind::Sha1;
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let tables = offline(&params, &hasher).expect("Failed to generate tables");

        let mut paths = Vec::new();
        for table in &tables {
            let path = temp_dir
                .path()
                .join(table_file_name(params.password_length(), table.table_index()));
            save_table(&path, table).expect("Failed to save table");
            paths.push(path);
        }

        SharedTables {
            params,
            hasher,
            tables,
            _temp_dir: temp_dir,
            paths,
        }
    })
}

/// Walk a chain to the given column and return the plaintext there.
fn plaintext_at_column(
    startpoint: &Password,
    column: u32,
    params: &TableParams,
    hasher: &HashKind,
    table_index: u32,
) -> Password {
    let mut plaintext = startpoint.clone();
    for iteration in 0..column {
        let digest = hasher.digest(plaintext.as_bytes());
        plaintext = reduce_digest(&digest, iteration, table_index, params);
    }
    plaintext
}

// =============================================================================
// Lightweight tests
// =============================================================================

#[test]
fn test_finalized_tables_sorted_and_unique() {
    let shared = shared();

    for table in &shared.tables {
        assert!(!table.is_empty());
        for window in table.chains().windows(2) {
            assert!(
                window[0].endpoint < window[1].endpoint,
                "endpoints must be strictly increasing"
            );
        }
    }
}

#[test]
fn test_chain_replay_reproduces_endpoints() {
    let shared = shared();
    let mut rng = rand::thread_rng();

    for table in &shared.tables {
        for _ in 0..20 {
            let chain = &table.chains()[rng.gen_range(0..table.len())];
            let replayed = compute_chain(
                chain.startpoint.clone(),
                &shared.params,
                &shared.hasher,
                table.table_index(),
            );
            assert_eq!(replayed.endpoint, chain.endpoint);
        }
    }
}

#[test]
fn test_persistence_roundtrip() {
    let shared = shared();

    for (table, path) in shared.tables.iter().zip(&shared.paths) {
        let loaded = load_table(path).expect("Failed to load table");
        assert_eq!(&loaded, table);
    }
}

#[test]
fn test_search_recovers_startpoint_column() {
    let shared = shared();

    let table = &shared.tables[0];
    let startpoint = table.chains()[0].startpoint.clone();
    let target = shared.hasher.digest(startpoint.as_bytes());

    let found = online_search(&target, &shared.tables, &shared.params, &shared.hasher);
    assert_eq!(found, Some(startpoint));
}

#[test]
fn test_search_recovers_last_reduction_column() {
    let shared = shared();

    for table in &shared.tables {
        let chain = &table.chains()[table.len() / 2];
        let plaintext = plaintext_at_column(
            &chain.startpoint,
            shared.params.chain_length() - 2,
            &shared.params,
            &shared.hasher,
            table.table_index(),
        );
        let target = shared.hasher.digest(plaintext.as_bytes());

        let found = online_search(&target, &shared.tables, &shared.params, &shared.hasher);
        assert_eq!(found, Some(plaintext));
    }
}

#[test]
fn test_search_recovers_mid_column() {
    let shared = shared();

    let table = &shared.tables[1];
    let chain = &table.chains()[1];
    let plaintext = plaintext_at_column(
        &chain.startpoint,
        7,
        &shared.params,
        &shared.hasher,
        table.table_index(),
    );
    let target = shared.hasher.digest(plaintext.as_bytes());

    let found = online_search(&target, &shared.tables, &shared.params, &shared.hasher);
    assert_eq!(found, Some(plaintext));
}

#[test]
fn test_search_loaded_tables_match_in_memory() {
    let shared = shared();

    let loaded: Vec<RainbowTable> = shared
        .paths
        .iter()
        .map(|path| load_table(path).expect("Failed to load table"))
        .collect();

    let startpoint = shared.tables[0].chains()[3].startpoint.clone();
    let target = shared.hasher.digest(startpoint.as_bytes());

    assert_eq!(
        online_search(&target, &loaded, &shared.params, &shared.hasher),
        online_search(&target, &shared.tables, &shared.params, &shared.hasher),
    );
}

#[test]
fn test_uncovered_plaintext_is_not_found() {
    // Dedicated tiny table: 10 chains of 10 columns cover at most 100 of
    // the 4096 plaintexts, so uncovered plaintexts provably exist.
    let params = TableParams::new(2, 10, 1, 0.01).unwrap();
    let hasher = HashKind::Sha1;

    let mut table = generate_table(&params, &hasher, 0).unwrap();
    finalize_table(&mut table);

    // Brute-force every plaintext reachable from the stored startpoints.
    let mut covered: HashSet<Password> = HashSet::new();
    for chain in table.chains() {
        let mut plaintext = chain.startpoint.clone();
        covered.insert(plaintext.clone());
        for iteration in 0..params.chain_length() - 1 {
            let digest = hasher.digest(plaintext.as_bytes());
            plaintext = reduce_digest(&digest, iteration, 0, &params);
            covered.insert(plaintext.clone());
        }
    }

    let uncovered = (0..params.password_space())
        .map(|counter| startpoint_of(counter, params.password_length()))
        .find(|plaintext| !covered.contains(plaintext))
        .expect("tiny table cannot cover the whole space");

    let target = hasher.digest(uncovered.as_bytes());
    let tables = vec![table];
    assert_eq!(online_search(&target, &tables, &params, &hasher), None);
}

#[test]
fn test_parallel_generation_matches_sequential() {
    let params = TableParams::new(2, 10, 1, 0.1).unwrap();
    let hasher = HashKind::Sha1;

    let sequential = generate_table(&params, &hasher, 0).unwrap();
    let parallel = generate_table_parallel(&params, &hasher, 0).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_coverage_rate_is_sane() {
    let shared = shared();

    let report = measure_coverage(&shared.params, &shared.hasher, &shared.tables, 0..100);
    assert_eq!(report.queried, 100);
    assert!(report.recovered <= report.queried);
    assert!(report.success_rate() <= 1.0);
}

// =============================================================================
// Heavyweight test (reference parameters)
// =============================================================================

#[test]
#[ignore]
fn test_reference_parameters_end_to_end() {
    // L=3, T=100, one table, alpha = 0.952 (about 102k chains).
    let params = TableParams::new(3, 100, 1, 0.952).unwrap();
    let hasher = HashKind::Sha1;

    let mut table = generate_table_parallel(&params, &hasher, 0).unwrap();
    finalize_table(&mut table);

    for window in table.chains().windows(2) {
        assert!(window[0].endpoint < window[1].endpoint);
    }

    let chain = &table.chains()[0];
    let plaintext = plaintext_at_column(
        &chain.startpoint,
        params.chain_length() - 2,
        &params,
        &hasher,
        table.table_index(),
    );
    let target = hasher.digest(plaintext.as_bytes());

    let tables = vec![table];
    let found = online_search(&target, &tables, &params, &hasher);
    assert_eq!(found, Some(plaintext));
}
