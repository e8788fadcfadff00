//! Flip-flop state fingerprints for cycle detection.
//!
//! A fingerprint is an exact bitset over every flip-flop's on/off state,
//! in definition order. Exactness matters: fingerprints are compared for
//! equality to find repeating press cycles, and a lossy digest could
//! declare a cycle that does not exist.

use std::fmt;

use smallvec::SmallVec;

/// Bits per storage word.
const WORD_BITS: usize = 64;

/// A compact snapshot of all flip-flop states.
///
/// Bit `i` corresponds to the `i`-th flip-flop in definition order.
/// Storage is inline for networks of up to 128 flip-flops and spills to
/// the heap transparently beyond that.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    bits: SmallVec<[u64; 2]>,
    len: usize,
}

impl Fingerprint {
    /// An all-off fingerprint for `len` flip-flops.
    pub fn new(len: usize) -> Self {
        let words = len.div_ceil(WORD_BITS);
        Self {
            bits: SmallVec::from_elem(0, words),
            len,
        }
    }

    /// Number of flip-flops covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the fingerprint covers zero flip-flops.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set bit `index` to `on`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize, on: bool) {
        assert!(index < self.len, "fingerprint bit {index} out of range");
        let mask = 1u64 << (index % WORD_BITS);
        if on {
            self.bits[index / WORD_BITS] |= mask;
        } else {
            self.bits[index / WORD_BITS] &= !mask;
        }
    }

    /// Read bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "fingerprint bit {index} out of range");
        self.bits[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }
}

impl fmt::Display for Fingerprint {
    /// Renders the state map as `0`/`1` characters in bit order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            write!(f, "{}", if self.get(i) { '1' } else { '0' })?;
        }
        Ok(())
    }
}
