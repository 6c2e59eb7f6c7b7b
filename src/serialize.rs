//! Persistence for cached hasher states.
//!
//! A primed prefix state can be computed once at build time, persisted, and
//! loaded by later processes that go straight to hashing suffixes. The
//! on-disk format is an rkyv archive prefixed by magic bytes and a schema
//! version, both validated on load.

use rkyv::rancor::Error as RkyvError;
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};

use crate::cached::CachedState;
use crate::engine::Sha256;
use crate::error::{Error, Result};

/// Current schema version for persisted state validation.
/// Increment this when making breaking changes to the archived layout.
pub const SCHEMA_VERSION: u32 = 1;

/// Magic bytes for persisted state blobs.
const MAGIC: [u8; 4] = *b"SMID";

/// Archived layout of a cached state.
///
/// The hasher is stored as its three raw fields; the buffer is persisted in
/// full even though only `bytes % 64` of it is meaningful, keeping the
/// layout fixed-size.
#[derive(Archive, RkyvSerialize, RkyvDeserialize, Debug)]
struct SerState {
    /// Magic bytes for validation
    magic: [u8; 4],
    /// Schema version for compatibility checking
    schema_version: u32,
    /// The 8 accumulator words
    state: [u32; 8],
    /// The partial-block buffer
    buffer: [u8; 64],
    /// Total bytes absorbed
    bytes: u64,
    /// Optional display label
    label: Option<String>,
}

/// Serialize a cached state to bytes.
pub fn to_bytes(cached: &CachedState) -> Result<Vec<u8>> {
    let ser = SerState {
        magic: MAGIC,
        schema_version: SCHEMA_VERSION,
        state: cached.hasher.state,
        buffer: cached.hasher.buffer,
        bytes: cached.hasher.bytes,
        label: cached.label().map(str::to_owned),
    };
    let bytes = rkyv::to_bytes::<RkyvError>(&ser)?;
    Ok(bytes.to_vec())
}

/// Deserialize a cached state from bytes.
///
/// # Errors
///
/// Returns an error if:
/// - Magic bytes don't match (not a persisted state blob)
/// - Schema version is incompatible
/// - Archive data is corrupted
pub fn from_bytes(bytes: &[u8]) -> Result<CachedState> {
    let archived = rkyv::access::<ArchivedSerState, RkyvError>(bytes)
        .map_err(|e| Error::corrupted(e.to_string()))?;

    let magic: [u8; 4] = archived.magic;
    if magic != MAGIC {
        return Err(Error::InvalidMagic {
            expected: MAGIC,
            found: magic,
        });
    }

    let version: u32 = archived.schema_version.into();
    if version != SCHEMA_VERSION {
        return Err(Error::VersionMismatch {
            expected: SCHEMA_VERSION,
            found: version,
        });
    }

    let mut state = [0u32; 8];
    for (word, archived_word) in state.iter_mut().zip(archived.state.iter()) {
        *word = (*archived_word).into();
    }

    let mut cached = CachedState::capture(&Sha256 {
        state,
        buffer: archived.buffer,
        bytes: archived.bytes.into(),
    });
    if let Some(label) = archived.label.as_ref() {
        cached = cached.with_label(label.as_str());
    }
    Ok(cached)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CachedState {
        let mut hasher = Sha256::new();
        hasher
            .update_and_cache(b"a prefix that does not land on a block boundary")
            .with_label("sample")
    }

    #[test]
    fn round_trip() {
        let cached = sample();
        let blob = to_bytes(&cached).unwrap();
        let loaded = from_bytes(&blob).unwrap();

        assert_eq!(loaded, cached);
        assert_eq!(loaded.label(), Some("sample"));
        assert_eq!(
            loaded.hash_suffix(b" and more"),
            cached.hash_suffix(b" and more")
        );
    }

    #[test]
    fn round_trip_without_label() {
        let mut hasher = Sha256::new();
        let cached = hasher.update_and_cache(&[3u8; 64]);
        let loaded = from_bytes(&to_bytes(&cached).unwrap()).unwrap();
        assert_eq!(loaded.label(), None);
        assert_eq!(loaded.midstate(), cached.midstate());
    }

    #[test]
    fn bad_magic_is_rejected() {
        let wrong = SerState {
            magic: *b"NOPE",
            schema_version: SCHEMA_VERSION,
            state: [0u32; 8],
            buffer: [0u8; 64],
            bytes: 0,
            label: None,
        };
        let blob = rkyv::to_bytes::<RkyvError>(&wrong).unwrap();
        let err = from_bytes(&blob).unwrap_err();
        assert!(matches!(err, Error::InvalidMagic { found, .. } if found == *b"NOPE"));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let wrong = SerState {
            magic: MAGIC,
            schema_version: SCHEMA_VERSION + 1,
            state: [0u32; 8],
            buffer: [0u8; 64],
            bytes: 0,
            label: None,
        };
        let blob = rkyv::to_bytes::<RkyvError>(&wrong).unwrap();
        let err = from_bytes(&blob).unwrap_err();
        assert!(matches!(
            err,
            Error::VersionMismatch { found, .. } if found == SCHEMA_VERSION + 1
        ));
    }

    #[test]
    fn garbage_is_corrupted() {
        assert!(matches!(
            from_bytes(&[0u8; 3]).unwrap_err(),
            Error::Corrupted(_)
        ));
    }
}
