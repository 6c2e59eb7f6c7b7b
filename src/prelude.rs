//! Prelude module for common imports.
//!
//! ```ignore
//! use sha256_midstate::prelude::*;
//! ```

// Engine
pub use crate::engine::{BLOCK_BYTE_COUNT, Sha256};

// Value types
pub use crate::digest::Digest;
pub use crate::midstate::Midstate;

// Cached states
pub use crate::cached::CachedState;

// Shared cache
pub use crate::cache::{CacheKey, SharedStateCache, StateCache};

// Error types
pub use crate::error::{Error, Result};

// Persistence
#[cfg(feature = "cache")]
pub use crate::serialize::{SCHEMA_VERSION, from_bytes, to_bytes};

// Batch hashing
#[cfg(feature = "parallel")]
pub use crate::batch::hash_suffixes;
