//! Error taxonomy of the rainbow table engine.
//!
//! An unsuccessful online search is not an error: the searcher returns
//! `Option::None` instead.

use thiserror::Error;

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum RainbowError {
    /// A codec index fell outside the 64-symbol alphabet.
    #[error("symbol index {0} is outside the 64-symbol alphabet")]
    SymbolOutOfRange(u32),

    /// The configured password length cannot be served by the reduction
    /// counter arithmetic.
    #[error("password length {found} is not supported (must be 1..={max})")]
    UnsupportedPasswordLength { found: usize, max: usize },

    /// Chains need at least a startpoint and one reduction round.
    #[error("chain length {0} is too short (must be at least 2)")]
    ChainTooShort(u32),

    /// A run needs at least one table.
    #[error("table count must be at least 1")]
    NoTables,

    /// The maximality coefficient must lie strictly between 0 and 1.
    #[error("maximality coefficient {0} is out of range (0, 1)")]
    AlphaOutOfRange(f64),

    /// The hash primitive produces fewer bytes than the reduction consumes.
    #[error("digest is {found} bytes, the reduction needs at least {needed}")]
    DigestTooShort { needed: usize, found: usize },

    /// Chain storage for a planned table could not be obtained.
    #[error("cannot allocate storage for {chains} chains")]
    Allocation { chains: usize },

    /// A persisted table file has no header line.
    #[error("table file has no header line")]
    MissingHeader,

    /// A persisted table header is not `<length> <table_index>`.
    #[error("malformed table header: {0:?}")]
    MalformedHeader(String),

    /// A persisted chain line is not `<startpoint> <endpoint>`.
    #[error("malformed chain at line {line}")]
    MalformedChain { line: usize },

    /// A persisted plaintext contains bytes outside the alphabet.
    #[error("{0:?} is not a password over the table alphabet")]
    InvalidPassword(String),

    /// A persisted table's declared length disagrees with its content.
    #[error("header declares {declared} chains but file contains {found}")]
    ChainCountMismatch { declared: usize, found: usize },

    /// An unrecognized hash primitive name.
    #[error("unknown hash primitive {0:?} (expected \"sha1\" or \"ntlm\")")]
    UnknownHash(String),

    /// I/O failure while persisting or loading a table.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
