//! Rainbow table ownership and the endpoint search structure
//!
//! A table owns its chains and the table index that parameterizes its
//! reduction family. Storage is reserved once from the planner's chain
//! count; after finalization the chains are endpoint-sorted and unique, and
//! the table is only read.

use crate::domain::alphabet::Password;
use crate::domain::chain::Chain;
use crate::error::RainbowError;

/// An owned collection of chains generated with one reduction family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RainbowTable {
    table_index: u32,
    chains: Vec<Chain>,
}

impl RainbowTable {
    /// Create an empty table with storage for `capacity` chains.
    ///
    /// The reservation is fallible; a refused allocation is reported as
    /// [`RainbowError::Allocation`] instead of aborting the process.
    pub(crate) fn with_capacity(table_index: u32, capacity: usize) -> Result<Self, RainbowError> {
        let mut chains = Vec::new();
        chains
            .try_reserve_exact(capacity)
            .map_err(|_| RainbowError::Allocation { chains: capacity })?;

        Ok(Self {
            table_index,
            chains,
        })
    }

    pub(crate) fn from_parts(table_index: u32, chains: Vec<Chain>) -> Self {
        Self {
            table_index,
            chains,
        }
    }

    pub(crate) fn push(&mut self, chain: Chain) {
        self.chains.push(chain);
    }

    pub(crate) fn chains_mut(&mut self) -> &mut Vec<Chain> {
        &mut self.chains
    }

    /// Index distinguishing this table's reduction family.
    pub fn table_index(&self) -> u32 {
        self.table_index
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Binary search for the chain with the given endpoint.
    ///
    /// Requires the finalized sort order; endpoints are unique after
    /// deduplication, so at most one chain can match.
    pub fn find_by_endpoint(&self, endpoint: &Password) -> Option<&Chain> {
        self.chains
            .binary_search_by(|chain| chain.endpoint.cmp(endpoint))
            .ok()
            .map(|index| &self.chains[index])
    }
}
