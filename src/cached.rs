//! Full hasher snapshots with optional labels.
//!
//! A [`CachedState`] captures everything a hasher is: accumulator, partial
//! block buffer, and byte counter. Unlike a [`Midstate`], it can be taken
//! at any offset, but it is an in-process value, not a 32-byte interchange
//! format.
//!
//! [`Midstate`]: crate::Midstate

use compact_str::CompactString;

use crate::digest::Digest;
use crate::engine::Sha256;
use crate::midstate::Midstate;

// =============================================================================
// CachedState
// =============================================================================

/// A snapshot of a hasher mid-stream, optionally labeled.
///
/// Restoring a cached state produces a hasher indistinguishable from the
/// one it was captured from. Labels are display metadata only and never
/// participate in equality.
///
/// # Example
///
/// ```
/// use sha256_midstate::Sha256;
///
/// let mut hasher = Sha256::new();
/// let primed = hasher.update_and_cache(&[0u8; 64]).with_label("zero block");
///
/// // Many independent continuations of the same prefix.
/// let a = primed.hash_suffix(b"one");
/// let b = primed.hash_suffix(b"two");
/// assert_ne!(a, b);
/// ```
#[derive(Clone, Debug)]
pub struct CachedState {
    pub(crate) hasher: Sha256,
    pub(crate) label: Option<CompactString>,
}

impl CachedState {
    /// Snapshot a live hasher.
    pub(crate) fn capture(hasher: &Sha256) -> Self {
        Self {
            hasher: hasher.clone(),
            label: None,
        }
    }

    /// Attach a human-readable label, e.g. the tag the state was primed
    /// with.
    pub fn with_label(mut self, label: impl Into<CompactString>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// A fresh, independent hasher positioned exactly where the snapshot
    /// was taken.
    pub fn to_hasher(&self) -> Sha256 {
        self.hasher.clone()
    }

    /// Hash one continuation of the captured prefix.
    pub fn hash_suffix(&self, suffix: &[u8]) -> Digest {
        let mut hasher = self.to_hasher();
        hasher.update(suffix);
        hasher.finalize()
    }

    /// Total bytes the snapshot had absorbed.
    #[inline]
    pub const fn bytes_written(&self) -> u64 {
        self.hasher.bytes_written()
    }

    /// Whether the snapshot sits on a block boundary.
    #[inline]
    pub const fn is_block_aligned(&self) -> bool {
        self.hasher.is_block_aligned()
    }

    /// The exportable [`Midstate`], if the snapshot is block-aligned.
    pub fn midstate(&self) -> Option<Midstate> {
        self.is_block_aligned()
            .then(|| Midstate::from_words(self.hasher.state))
    }

    /// The accumulator words serialized big-endian.
    pub fn state_bytes(&self) -> [u8; 32] {
        self.hasher.state_bytes()
    }
}

// The label is presentation only.
impl PartialEq for CachedState {
    fn eq(&self, other: &Self) -> bool {
        self.hasher == other.hasher
    }
}

impl Eq for CachedState {}

impl std::fmt::Display for CachedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label} - state: {}", hex::encode(self.state_bytes())),
            None => write!(f, "state: {}", hex::encode(self.state_bytes())),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_resumes_exactly() {
        let mut hasher = Sha256::new();
        let cached = hasher.update_and_cache(b"prefix that is not block aligned");

        let mut resumed = cached.to_hasher();
        resumed.update(b" and a suffix");

        let mut direct = Sha256::new();
        direct.update(b"prefix that is not block aligned and a suffix");
        assert_eq!(resumed.finalize(), direct.finalize());
    }

    #[test]
    fn restore_into_existing_hasher() {
        let mut hasher = Sha256::new();
        let cached = hasher.update_and_cache(b"shared prefix ");

        // Drive the hasher past the snapshot, then rewind it.
        hasher.update(b"one continuation");
        hasher.restore(&cached);
        hasher.update(b"another");

        assert_eq!(hasher.finalize(), Sha256::hash(b"shared prefix another"));
    }

    #[test]
    fn clones_do_not_alias() {
        let mut hasher = Sha256::new();
        let cached = hasher.update_and_cache(&[9u8; 70]);

        let mut a = cached.to_hasher();
        let mut b = cached.to_hasher();
        a.update(b"aaa");
        b.update(b"bbbbbb");

        let mut expect_a: Vec<u8> = vec![9u8; 70];
        expect_a.extend_from_slice(b"aaa");
        let mut expect_b: Vec<u8> = vec![9u8; 70];
        expect_b.extend_from_slice(b"bbbbbb");

        assert_eq!(a.finalize(), Sha256::hash(&expect_a));
        assert_eq!(b.finalize(), Sha256::hash(&expect_b));
    }

    #[test]
    fn equality_ignores_label() {
        let mut a = Sha256::new();
        let mut b = Sha256::new();
        let one = a.update_and_cache(b"same bytes").with_label("one");
        let two = b.update_and_cache(b"same bytes").with_label("two");
        assert_eq!(one, two);

        let mut c = Sha256::new();
        let other = c.update_and_cache(b"other bytes").with_label("one");
        assert_ne!(one, other);
    }

    #[test]
    fn midstate_only_when_aligned() {
        let mut hasher = Sha256::new();
        let unaligned = hasher.update_and_cache(&[1u8; 65]);
        assert!(unaligned.midstate().is_none());

        let mut hasher = Sha256::new();
        let aligned = hasher.update_and_cache(&[1u8; 64]);
        let mid = aligned.midstate().unwrap();
        assert_eq!(mid, Midstate::from_prefix(&[1u8; 64]));
    }

    #[test]
    fn display_includes_label_and_state_hex() {
        let mut hasher = Sha256::new();
        let cached = hasher.update_and_cache(&[0u8; 64]).with_label("zeros");
        let rendered = cached.to_string();
        assert!(rendered.starts_with("zeros - state: "));
        assert!(rendered.ends_with(&hex::encode(cached.state_bytes())));
        assert_eq!(cached.label(), Some("zeros"));
    }
}
