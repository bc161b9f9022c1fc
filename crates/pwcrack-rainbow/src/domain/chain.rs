//! Chain operations
//!
//! A chain is a startpoint/endpoint pair; the endpoint is reproducible by
//! alternating hash and reduce from the startpoint. This module computes
//! chains for the offline phase and replays them for online verification.

use crate::domain::alphabet::Password;
use crate::domain::hash::{Digest, HashPrimitive, reduce_digest};
use crate::domain::params::TableParams;

/// One row of a rainbow table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    /// First plaintext of the chain.
    pub startpoint: Password,
    /// Last plaintext of the chain, the sort and search key.
    pub endpoint: Password,
}

impl Chain {
    pub fn new(startpoint: Password, endpoint: Password) -> Self {
        Self {
            startpoint,
            endpoint,
        }
    }
}

/// Compute a single chain.
///
/// Applies `hash; reduce(j, table_index)` for `j` in `[0, T-1)`, so the
/// chain covers T plaintext columns including the startpoint.
pub fn compute_chain<H: HashPrimitive>(
    startpoint: Password,
    params: &TableParams,
    hasher: &H,
    table_index: u32,
) -> Chain {
    let mut plaintext = startpoint.clone();

    for iteration in 0..params.chain_length() - 1 {
        let digest = hasher.digest(plaintext.as_bytes());
        plaintext = reduce_digest(&digest, iteration, table_index, params);
    }

    Chain {
        startpoint,
        endpoint: plaintext,
    }
}

/// Replay a chain to a column and test it against a target digest.
///
/// Walks the chain from `startpoint` to the plaintext at `column`, hashes
/// it, and returns that plaintext when the hash equals `target`. A mismatch
/// is a false alarm from a reduction collision, reported as `None`.
pub fn verify_chain<H: HashPrimitive>(
    startpoint: &Password,
    column: u32,
    target: &Digest,
    params: &TableParams,
    hasher: &H,
    table_index: u32,
) -> Option<Password> {
    let mut plaintext = startpoint.clone();

    for iteration in 0..column {
        let digest = hasher.digest(plaintext.as_bytes());
        plaintext = reduce_digest(&digest, iteration, table_index, params);
    }

    (hasher.digest(plaintext.as_bytes()) == *target).then_some(plaintext)
}
