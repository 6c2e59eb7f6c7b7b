//! Error types for sha256-midstate.
//!
//! Errors only arise at data boundaries: parsing serialized midstates or
//! digests, and loading persisted cached states. Alignment preconditions on
//! the hashing hot path are programmer errors and are debug-asserted, never
//! surfaced as `Result`s.

use thiserror::Error;

/// Errors that can occur when decoding externally supplied state or digest
/// data.
#[derive(Debug, Error)]
pub enum Error {
    /// A serialized midstate was not exactly 32 bytes
    #[error("midstate must be {expected} bytes, got {got}", expected = crate::Midstate::BYTE_COUNT)]
    IncorrectMidstateSize {
        /// Size of the rejected input
        got: usize,
    },

    /// A serialized digest was not exactly 32 bytes
    #[error("digest must be {expected} bytes, got {got}", expected = crate::Digest::BYTE_COUNT)]
    IncorrectDigestSize {
        /// Size of the rejected input
        got: usize,
    },

    /// Hex input could not be decoded
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Persisted state was written with an incompatible schema version
    #[error("cached state version mismatch: expected v{expected}, found v{found}")]
    VersionMismatch {
        /// Expected schema version
        expected: u32,
        /// Found schema version
        found: u32,
    },

    /// Magic bytes validation failed
    #[error("invalid cached state format: expected magic bytes {expected:?}, found {found:?}")]
    InvalidMagic {
        /// Expected magic bytes
        expected: [u8; 4],
        /// Found magic bytes
        found: [u8; 4],
    },

    /// Persisted state data is corrupted or truncated
    #[error("cached state corrupted: {0}")]
    Corrupted(String),

    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Result type alias for sha256-midstate operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a corruption error with a message.
    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::Corrupted(msg.into())
    }

    /// Create a serialization error from any error type.
    pub fn serialize(err: impl std::error::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

#[cfg(feature = "cache")]
impl From<rkyv::rancor::Error> for Error {
    fn from(err: rkyv::rancor::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::IncorrectMidstateSize { got: 31 };
        assert_eq!(err.to_string(), "midstate must be 32 bytes, got 31");

        let err = Error::VersionMismatch {
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "cached state version mismatch: expected v2, found v1"
        );

        let err = Error::corrupted("bad data");
        assert_eq!(err.to_string(), "cached state corrupted: bad data");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
