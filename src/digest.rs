//! The 32-byte SHA-256 digest value type.

use subtle::ConstantTimeEq;

use crate::error::{Error, Result};

// =============================================================================
// Digest
// =============================================================================

/// A SHA-256 digest: the final 8-word state serialized big-endian.
///
/// Equality runs in constant time, so digests can be compared even when one
/// side is secret-derived (e.g. a MAC-style check built by a caller).
///
/// # Memory Layout
///
/// - 32 bytes, `Copy`, no heap allocation
#[derive(Clone, Copy)]
#[must_use]
pub struct Digest([u8; 32]);

impl Digest {
    /// Digest size in bytes.
    pub const BYTE_COUNT: usize = 32;

    /// Wrap raw digest bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the digest bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Consume into the raw bytes.
    #[inline]
    pub const fn into_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl From<[u8; 32]> for Digest {
    #[inline]
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; 32] {
    #[inline]
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::IncorrectDigestSize { got: bytes.len() })?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for Digest {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Digest {}

impl PartialEq<[u8; 32]> for Digest {
    fn eq(&self, other: &[u8; 32]) -> bool {
        self.0.ct_eq(other).into()
    }
}

impl PartialEq<[u8]> for Digest {
    fn eq(&self, other: &[u8]) -> bool {
        self.0.ct_eq(other).into()
    }
}

// Manual, not derived: equality is manual above, and equal digests must
// hash equally.
impl std::hash::Hash for Digest {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Sha256;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Digest, [u8; 32]);

    #[test]
    fn hex_round_trip() {
        let digest = Sha256::hash(b"abc");
        let parsed = Digest::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(digest, parsed);
    }

    #[test]
    fn display_is_plain_hex() {
        let digest = Digest::from_bytes([0xab; 32]);
        assert_eq!(digest.to_string(), "ab".repeat(32));
        assert_eq!(format!("{digest:?}"), format!("Digest({})", "ab".repeat(32)));
    }

    #[test]
    fn wrong_size_is_rejected() {
        let err = Digest::try_from(&[0u8; 31][..]).unwrap_err();
        assert!(matches!(err, Error::IncorrectDigestSize { got: 31 }));
    }

    #[test]
    fn compares_against_raw_bytes() {
        let digest = Sha256::hash(b"abc");
        let bytes = *digest.as_bytes();
        assert_eq!(digest, bytes);
        assert!(digest == bytes[..]);
        assert!(digest != [0u8; 32]);
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(Digest::from_hex("not hex").is_err());
        assert!(Digest::from_hex("abcd").is_err());
    }
}
