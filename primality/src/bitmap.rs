//! # Packed Compositeness Bitmap
//!
//! Stores one bit per integer in `0..=len`, eight integers per byte. Bit
//! `x % 8` of byte `x / 8` holds the status of `x`:
//!
//! * set: `x` is composite, or one of the non-primes 0 and 1
//! * clear: `x` is prime
//!
//! A freshly allocated bitmap has every bit clear, so the sieve only ever
//! sets bits. Packing costs a shift and a mask per lookup and cuts memory by
//! roughly 8x compared to a `Vec<bool>`.

/// Number of bits packed into each storage byte.
const BITS_PER_BYTE: u64 = 8;

/// A fixed-size bitmap of composite integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeBitmap {
    /// The packed bits. Never resized after construction.
    bytes: Vec<u8>,
    /// The largest integer tracked by this bitmap (inclusive).
    max: u64,
}

impl CompositeBitmap {
    /// Allocates a bitmap covering `0..=max` with every integer marked prime.
    pub fn new(max: u64) -> Self {
        let len = (max / BITS_PER_BYTE + 1) as usize;
        Self {
            bytes: vec![0u8; len],
            max,
        }
    }

    /// The largest integer tracked by this bitmap (inclusive).
    pub fn max(&self) -> u64 {
        self.max
    }

    /// The number of storage bytes backing the bitmap.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Marks `x` as not prime.
    ///
    /// ## Panics
    /// If `x` is larger than [`CompositeBitmap::max`].
    #[inline]
    pub fn set_composite(&mut self, x: u64) {
        let (byte_index, bit_index) = Self::locate(x);
        self.bytes[byte_index] |= 1 << bit_index;
    }

    /// Returns whether `x` has been marked as not prime.
    ///
    /// ## Panics
    /// If `x` is larger than [`CompositeBitmap::max`].
    #[inline]
    pub fn is_composite(&self, x: u64) -> bool {
        let (byte_index, bit_index) = Self::locate(x);
        (self.bytes[byte_index] >> bit_index) & 1 == 1
    }

    #[inline]
    fn locate(x: u64) -> (usize, u64) {
        ((x / BITS_PER_BYTE) as usize, x % BITS_PER_BYTE)
    }
}
