//! Block-aligned compression-state snapshots.
//!
//! A [`Midstate`] is the 8-word SHA-256 state after absorbing a whole
//! number of 64-byte blocks, before any padding. Priming a hasher with a
//! fixed prefix once and exporting the midstate lets callers hash many
//! distinct continuations of that prefix without re-absorbing it, the
//! pattern behind BIP340-style tagged hashing, where every message is
//! hashed as `SHA256(tag) || SHA256(tag) || message` and the 64-byte tag
//! prefix never changes.
//!
//! A midstate deliberately carries no byte count: callers pair it
//! out-of-band with the prefix length it represents (typically a constant
//! per fixed tag) and pass that length to [`Sha256::from_midstate`].
//!
//! [`Sha256::from_midstate`]: crate::Sha256::from_midstate

use crate::engine::{BLOCK_BYTE_COUNT, Sha256};
use crate::error::{Error, Result};

// =============================================================================
// Midstate
// =============================================================================

/// The 8 accumulator words of a hasher at a block boundary.
///
/// Serialized form is 32 bytes, each word big-endian, matching the digest
/// serialization of the same words. Obtain one from
/// [`Sha256::update_and_snapshot`](crate::Sha256::update_and_snapshot) or
/// [`Midstate::from_prefix`]; turn it back into a hasher with
/// [`Sha256::from_midstate`](crate::Sha256::from_midstate).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct Midstate([u32; 8]);

impl Midstate {
    /// Serialized size in bytes.
    pub const BYTE_COUNT: usize = 32;

    #[inline]
    pub(crate) const fn from_words(words: [u32; 8]) -> Self {
        Self(words)
    }

    #[inline]
    pub(crate) const fn words(&self) -> [u32; 8] {
        self.0
    }

    /// Derive the midstate of a block-aligned prefix from its raw bytes.
    ///
    /// This is the "prime from bytes" entry point: it absorbs `prefix` into
    /// a fresh hasher and exports the resulting state. `prefix.len()` must
    /// be a multiple of 64; violations are programmer errors, checked in
    /// debug builds only.
    pub fn from_prefix(prefix: &[u8]) -> Self {
        debug_assert!(
            prefix.len() % BLOCK_BYTE_COUNT == 0,
            "midstate prefix must be a whole number of 64-byte blocks"
        );
        let mut hasher = Sha256::new();
        hasher.update(prefix);
        Self(hasher.state)
    }

    /// Decode from the 32-byte serialized form (big-endian words).
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut words = [0u32; 8];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self(words)
    }

    /// Encode to the 32-byte serialized form (big-endian words).
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.0) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    /// Lowercase hex rendering of the serialized form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl TryFrom<&[u8]> for Midstate {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::IncorrectMidstateSize { got: bytes.len() })?;
        Ok(Self::from_bytes(bytes))
    }
}

impl std::fmt::Display for Midstate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for Midstate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Midstate({})", self.to_hex())
    }
}

// =============================================================================
// Tests
// =============================================================================
