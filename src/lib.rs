//! sha256-midstate - Streaming SHA-256 with cacheable midstates
//!
//! A conformant incremental SHA-256 engine built around one optimization:
//! when many messages share a fixed prefix, absorb the prefix once, export
//! the compression state, and hash each message from a cheap clone of that
//! state. This is the primitive underneath BIP340-style tagged hashing,
//! where every input is `SHA256(tag) || SHA256(tag) || message` and the
//! 64-byte tag prefix never changes.
//!
//! ## Core Concepts
//!
//! **Streaming**: [`Sha256`] absorbs arbitrary-length input incrementally;
//! chunk boundaries never affect the digest.
//!
//! **Midstates**: after a block-aligned prefix, the 8-word state can leave
//! the process as a 32-byte [`Midstate`] and be re-imported later.
//!
//! **Cached states**: a [`CachedState`] snapshots a hasher at any offset
//! (including mid-block) for in-process reuse, optionally labeled and
//! shareable through [`SharedStateCache`].
//!
//! ## Usage
//!
//! Hashing piece by piece:
//!
//! ```
//! use sha256_midstate::Sha256;
//!
//! let mut hasher = Sha256::new();
//! hasher.update(b"some ");
//! hasher.update(b"data!");
//! let digest = hasher.finalize();
//! assert_eq!(digest, Sha256::hash(b"some data!"));
//! ```
//!
//! Priming a fixed prefix once, then hashing many suffixes:
//!
//! ```
//! use sha256_midstate::{Midstate, Sha256};
//!
//! // The fixed prefix: one full 64-byte block.
//! let prefix = [0x42u8; 64];
//! let midstate = Midstate::from_prefix(&prefix);
//!
//! // Per message: import, absorb the suffix, finalize.
//! let mut hasher = Sha256::from_midstate(&midstate, 64);
//! hasher.update(b"message");
//!
//! let mut direct = Sha256::new();
//! direct.update(&prefix);
//! direct.update(b"message");
//! assert_eq!(hasher.finalize(), direct.finalize());
//! ```

#![forbid(unsafe_code)]

// =============================================================================
// Core modules
// =============================================================================

/// SHA-256 block compression
mod compress;

/// The streaming hasher
pub mod engine;

/// Digest value type
pub mod digest;

/// Block-aligned state snapshots
pub mod midstate;

/// Full state snapshots with labels
pub mod cached;

/// Shared cache of primed states
pub mod cache;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

/// Persistence for cached states
#[cfg(feature = "cache")]
pub mod serialize;

/// Parallel batch hashing
#[cfg(feature = "parallel")]
pub mod batch;

// =============================================================================
// Re-exports
// =============================================================================

// Engine
pub use engine::{BLOCK_BYTE_COUNT, Sha256};

// Value types
pub use digest::Digest;
pub use midstate::Midstate;

// Cached states
pub use cached::CachedState;

// Shared cache
pub use cache::{CacheKey, SharedStateCache, StateCache};

// Error types
pub use error::{Error, Result};
