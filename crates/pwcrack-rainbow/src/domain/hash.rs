//! Hash primitives and the reduction function
//!
//! The engine is parameterized over a hash primitive with a fixed digest
//! length; SHA-1 and NTLM implementations ship here. The reduction function
//! maps a digest plus its position context back into the password space.

use std::fmt;
use std::str::FromStr;

use byteorder::{ByteOrder, LittleEndian};
use digest::Digest as _;
use md4::Md4;
use sha1::Sha1;

use crate::domain::alphabet::{Password, startpoint_of};
use crate::domain::params::TableParams;
use crate::error::RainbowError;

/// A fixed-size hash output.
///
/// Digests and plaintexts never share storage; conversions go through
/// [`reduce_digest`] and [`HashPrimitive::digest`] only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Digest(Vec<u8>);

impl Digest {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// A `bytes -> fixed-size digest` primitive.
///
/// Implementations must be deterministic and declare a digest length of at
/// least [`TableParams::counter_width`] bytes for the run's password length.
pub trait HashPrimitive: Sync {
    /// Digest size in bytes, fixed for the lifetime of the primitive.
    fn digest_len(&self) -> usize;

    /// Hash a byte string.
    fn digest(&self, data: &[u8]) -> Digest;
}

/// The hash primitives selectable at run configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashKind {
    Sha1,
    Ntlm,
}

impl HashPrimitive for HashKind {
    fn digest_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Ntlm => 16,
        }
    }

    fn digest(&self, data: &[u8]) -> Digest {
        match self {
            Self::Sha1 => Digest::new(Sha1::digest(data).to_vec()),
            Self::Ntlm => Digest::new(Md4::digest(utf16_le(data)).to_vec()),
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => f.write_str("sha1"),
            Self::Ntlm => f.write_str("ntlm"),
        }
    }
}

impl FromStr for HashKind {
    type Err = RainbowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha1" => Ok(Self::Sha1),
            "ntlm" => Ok(Self::Ntlm),
            other => Err(RainbowError::UnknownHash(other.to_string())),
        }
    }
}

/// UTF-16LE encode an alphabet plaintext for NTLM (MD4 over UTF-16LE).
fn utf16_le(password: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(password.len() * 2);
    for &byte in password {
        buf.push(byte);
        buf.push(0);
    }
    buf
}

/// Reduce a digest to a password candidate.
///
/// Reads the first [`TableParams::counter_width`] digest bytes as a
/// little-endian counter, folds in the iteration and table indices by
/// wrapping addition, and renders the result as a fixed-length password.
/// Pure and deterministic; counter overflow wraps.
pub fn reduce_digest(
    digest: &Digest,
    iteration: u32,
    table_index: u32,
    params: &TableParams,
) -> Password {
    let width = params.counter_width();
    debug_assert!(digest.len() >= width);

    let counter = LittleEndian::read_uint(&digest.as_bytes()[..width], width)
        .wrapping_add(iteration as u64)
        .wrapping_add(table_index as u64);

    startpoint_of(counter, params.password_length())
}
