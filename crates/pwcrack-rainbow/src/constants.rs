//! Rainbow table engine constants.

// =============================================================================
// Alphabet
// =============================================================================

/// Number of symbols in the password alphabet.
pub const ALPHABET_SIZE: u64 = 64;

// =============================================================================
// Parameter planning
// =============================================================================

/// Floor for the planned chain count (m0).
pub const MIN_CHAIN_COUNT: usize = 10;

/// Largest supported password length. The reduction counter is a u64, so the
/// password space must fit in 64 bits (64^10 == 2^60).
pub const MAX_SUPPORTED_PASSWORD_LENGTH: usize = 10;

/// Default maximality coefficient (alpha).
pub const DEFAULT_ALPHA: f64 = 0.952;

// =============================================================================
// Defaults for the CLI drivers
// =============================================================================

/// Default password length (L).
pub const DEFAULT_PASSWORD_LENGTH: usize = 3;

/// Default chain length (T).
pub const DEFAULT_CHAIN_LENGTH: u32 = 100;

/// Default number of tables.
pub const DEFAULT_TABLE_COUNT: u32 = 1;
