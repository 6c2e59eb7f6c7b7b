//! Parallel batch hashing of suffixes.
//!
//! Clones of a cached state share nothing, so hashing many continuations of
//! one primed prefix is embarrassingly parallel: one clone per suffix, no
//! locking.

use rayon::prelude::*;

use crate::cached::CachedState;
use crate::digest::Digest;

/// Hash every suffix against the same cached prefix state, in parallel.
///
/// Output order matches input order.
///
/// # Example
///
/// ```
/// use sha256_midstate::{Sha256, batch};
///
/// let mut hasher = Sha256::new();
/// let primed = hasher.update_and_cache(&[0u8; 64]);
///
/// let digests = batch::hash_suffixes(&primed, &[b"one".as_slice(), b"two"]);
/// assert_eq!(digests[0], primed.hash_suffix(b"one"));
/// assert_eq!(digests[1], primed.hash_suffix(b"two"));
/// ```
pub fn hash_suffixes<S>(base: &CachedState, suffixes: &[S]) -> Vec<Digest>
where
    S: AsRef<[u8]> + Sync,
{
    suffixes
        .par_iter()
        .map(|suffix| base.hash_suffix(suffix.as_ref()))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
