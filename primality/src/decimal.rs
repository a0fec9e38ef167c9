//! # ASCII Decimal Decoding
//!
//! Converts a line of raw input bytes into an integer without materializing a
//! string. Each byte is checked and folded in with
//! `value = value * 10 + (byte - b'0')`.
//!
//! A line can arrive in several pieces when it is longer than the read
//! buffer. [`DecimalAccumulator`] carries the partial value across pieces, so
//! the length of a line never decides whether it is accepted.
//!
//! ## Rejected Input
//!
//! - An empty token (a blank line)
//! - Any byte outside `b'0'..=b'9'`, including signs, spaces and `\r`
//! - Values above the caller's maximum. Checked arithmetic is used, so the
//!   accumulator can never wrap.
//!
//! Leading zeros are accepted, so `007` decodes to 7, however many zeros
//! there are.

/// Errors that can occur while decoding a decimal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    /// The token contained no bytes.
    #[error("empty token")]
    Empty,

    /// The token contained a byte that is not an ASCII digit.
    #[error("unexpected byte {byte:#04x} at position {position}, expected a decimal digit")]
    InvalidDigit {
        /// Zero-based position of the byte within the token.
        position: usize,
        /// The offending byte.
        byte: u8,
    },

    /// The decoded value is larger than the maximum allowed.
    #[error("value exceeds the largest supported value {max}")]
    Overflow {
        /// The maximum value the caller accepts.
        max: u64,
    },
}

/// Decodes one token fed in any number of pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalAccumulator {
    value: u64,
    len: usize,
    max: u64,
}

impl DecimalAccumulator {
    /// Creates an accumulator for a value no larger than `max`.
    pub fn new(max: u64) -> Self {
        Self {
            value: 0,
            len: 0,
            max,
        }
    }

    /// The number of bytes consumed so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no bytes have been consumed yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Folds the next piece of the token into the value.
    ///
    /// Positions in [`DecimalError::InvalidDigit`] count from the start of
    /// the whole token, not of this piece.
    #[inline]
    pub fn push(&mut self, bytes: &[u8]) -> Result<(), DecimalError> {
        for (offset, &byte) in bytes.iter().enumerate() {
            let digit = byte.wrapping_sub(b'0');
            if digit > 9 {
                let position = self.len + offset;
                return Err(DecimalError::InvalidDigit { position, byte });
            }

            self.value = self
                .value
                .checked_mul(10)
                .and_then(|value| value.checked_add(digit as u64))
                .filter(|value| *value <= self.max)
                .ok_or(DecimalError::Overflow { max: self.max })?;
        }

        self.len += bytes.len();
        Ok(())
    }

    /// Returns the decoded value, resetting the accumulator for the next
    /// token.
    ///
    /// ## Errors
    /// [`DecimalError::Empty`] if no bytes were pushed since the last reset.
    pub fn finish(&mut self) -> Result<u64, DecimalError> {
        let Self { value, len, max } = *self;
        *self = Self::new(max);

        if len == 0 {
            return Err(DecimalError::Empty);
        }
        Ok(value)
    }
}

/// Decodes `token` as an unsigned decimal integer no larger than `max`.
///
/// ## Parameters
/// * `token` - The raw bytes of one line, without its terminator
/// * `max` - The largest value the caller accepts
///
/// ## Returns
/// * `Ok(value)` - The decoded integer
/// * `Err(DecimalError)` - If the token is empty, contains a non-digit, or
///   decodes to a value above `max`
#[inline]
pub fn parse_decimal(token: &[u8], max: u64) -> Result<u64, DecimalError> {
    let mut accumulator = DecimalAccumulator::new(max);
    accumulator.push(token)?;
    accumulator.finish()
}
