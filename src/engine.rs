//! Streaming SHA-256 engine.
//!
//! [`Sha256`] absorbs input incrementally, buffering partial 64-byte blocks
//! and compressing complete ones. Finalization pads a private duplicate, so
//! a live hasher can keep absorbing after a digest has been taken from it.
//!
//! The engine also exposes its compression state for reuse: after absorbing
//! a block-aligned prefix, the 8-word state can be exported as a
//! [`Midstate`] and later re-imported to hash many suffixes of that prefix
//! without re-absorbing it.

use crate::cached::CachedState;
use crate::compress::{IV, compress};
use crate::digest::Digest;
use crate::midstate::Midstate;

/// Bytes per compression block.
pub const BLOCK_BYTE_COUNT: usize = 64;

// SHA-256 padding: a single 0x80 marker byte followed by zeros.
const PAD: [u8; 64] = {
    let mut pad = [0u8; 64];
    pad[0] = 0x80;
    pad
};

// =============================================================================
// Sha256
// =============================================================================

/// An incremental SHA-256 hasher.
///
/// Holds the 8-word running state, a 64-byte buffer for the current partial
/// block, and the total byte count. The buffer fill level is always
/// `bytes % 64`; the state always reflects exactly the complete blocks
/// absorbed so far.
///
/// # Example
///
/// ```
/// use sha256_midstate::Sha256;
///
/// let mut hasher = Sha256::new();
/// hasher.update(b"some ");
/// hasher.update(b"data");
/// let digest = hasher.finalize();
/// assert_eq!(digest, Sha256::hash(b"some data"));
/// ```
#[derive(Clone)]
pub struct Sha256 {
    pub(crate) state: [u32; 8],
    pub(crate) buffer: [u8; 64],
    pub(crate) bytes: u64,
}

impl Sha256 {
    /// Create a hasher in its initial (IV) state.
    pub const fn new() -> Self {
        Self {
            state: IV,
            buffer: [0u8; 64],
            bytes: 0,
        }
    }

    /// One-shot convenience: hash `data` in a single call.
    pub fn hash(data: &[u8]) -> Digest {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Reconstruct a hasher from a block-aligned [`Midstate`].
    ///
    /// `prefix_len` is the number of prefix bytes the midstate stands for
    /// and must be a multiple of 64: compression only ever consumes whole
    /// blocks, so a state claiming a partial block's worth of compressed
    /// input cannot exist. Violations are programmer errors, checked in
    /// debug builds only.
    ///
    /// The result is indistinguishable from a fresh hasher that absorbed
    /// those prefix bytes itself.
    pub fn from_midstate(midstate: &Midstate, prefix_len: u64) -> Self {
        debug_assert!(
            prefix_len % BLOCK_BYTE_COUNT as u64 == 0,
            "midstate prefix length must be a whole number of 64-byte blocks"
        );
        Self {
            state: midstate.words(),
            buffer: [0u8; 64],
            bytes: prefix_len,
        }
    }

    /// Absorb `data` into the hasher.
    ///
    /// Splitting the input across calls never changes the result: absorbing
    /// `a` then `b` equals absorbing `a ++ b` in one call. Zero-length input
    /// is a no-op.
    pub fn update(&mut self, mut data: &[u8]) {
        let fill = (self.bytes % 64) as usize;
        self.bytes = self.bytes.wrapping_add(data.len() as u64);

        // Complete a pending partial block first.
        if fill != 0 {
            let needed = 64 - fill;
            if data.len() >= needed {
                self.buffer[fill..].copy_from_slice(&data[..needed]);
                let block = self.buffer;
                compress(&mut self.state, &block);
                data = &data[needed..];
            } else {
                self.buffer[fill..fill + data.len()].copy_from_slice(data);
                return;
            }
        }

        // Full blocks are compressed straight from the input.
        let mut blocks = data.chunks_exact(64);
        for block in blocks.by_ref() {
            compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        if !rest.is_empty() {
            self.buffer[..rest.len()].copy_from_slice(rest);
        }
    }

    /// Absorb `data` and, if the total byte count is now block-aligned,
    /// export the running state as a [`Midstate`].
    ///
    /// Returns `None` when the count is not a multiple of 64; a midstate at
    /// an unaligned offset does not exist, so this is "not applicable"
    /// rather than an error.
    pub fn update_and_snapshot(&mut self, data: &[u8]) -> Option<Midstate> {
        self.update(data);
        self.is_block_aligned()
            .then(|| Midstate::from_words(self.state))
    }

    /// Absorb `data` and capture the full state (any alignment) as a
    /// [`CachedState`].
    ///
    /// Unlike [`update_and_snapshot`](Self::update_and_snapshot), the
    /// capture includes buffered partial-block bytes, so it works at any
    /// offset; the price is that the snapshot is a full hasher, not a
    /// 32-byte exportable value.
    pub fn update_and_cache(&mut self, data: &[u8]) -> CachedState {
        self.update(data);
        CachedState::capture(self)
    }

    /// Replace this hasher's state with a previously captured snapshot.
    pub fn restore(&mut self, cached: &CachedState) {
        *self = cached.to_hasher();
    }

    /// Compute the digest of everything absorbed so far.
    ///
    /// Padding is applied to a private duplicate; the live hasher is left
    /// untouched and may keep absorbing.
    pub fn finalize(&self) -> Digest {
        let mut out = [0u8; 32];
        self.finalize_into(&mut out);
        Digest::from(out)
    }

    /// Like [`finalize`](Self::finalize), writing the digest into a
    /// caller-provided buffer.
    pub fn finalize_into(&self, out: &mut [u8; 32]) {
        let mut work = self.clone();
        let bit_len = work.bytes << 3;
        // 0x80 plus zeros up to byte 56 of the final block, leaving room
        // for the 8-byte big-endian bit count.
        let pad_len = 1 + ((119 - (work.bytes % 64) as usize) % 64);
        work.update(&PAD[..pad_len]);
        work.update(&bit_len.to_be_bytes());
        debug_assert!(work.is_block_aligned());
        *out = work.state_bytes();
    }

    /// The running 8-word state serialized big-endian, 4 bytes per word.
    ///
    /// This is the raw accumulator at this instant, without padding; it only
    /// coincides with a digest after finalization, and only names a valid
    /// midstate when [`is_block_aligned`](Self::is_block_aligned) holds.
    pub fn state_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    /// Total bytes absorbed since initialization (or since the imported
    /// prefix began, for midstate-restored hashers).
    #[inline]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes
    }

    /// Whether the byte count is a multiple of the block size, i.e. whether
    /// the current state is exportable as a [`Midstate`].
    #[inline]
    pub const fn is_block_aligned(&self) -> bool {
        self.bytes % BLOCK_BYTE_COUNT as u64 == 0
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

// Compares the logical stream position: state, counter, and only the
// meaningful prefix of the block buffer. Stale bytes past the fill level
// never affect equality.
impl PartialEq for Sha256 {
    fn eq(&self, other: &Self) -> bool {
        let fill = (self.bytes % 64) as usize;
        self.state == other.state
            && self.bytes == other.bytes
            && self.buffer[..fill] == other.buffer[..fill]
    }
}

impl Eq for Sha256 {}

impl std::fmt::Debug for Sha256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha256")
            .field("state", &hex::encode(self.state_bytes()))
            .field("bytes", &self.bytes)
            .finish()
    }
}

/// Absorb from any reader, e.g. via `std::io::copy`.
///
/// ```
/// use sha256_midstate::Sha256;
///
/// let mut reader: &[u8] = b"some data";
/// let mut hasher = Sha256::new();
/// std::io::copy(&mut reader, &mut hasher).unwrap();
/// assert_eq!(hasher.finalize(), Sha256::hash(b"some data"));
/// ```
impl std::io::Write for Sha256 {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
