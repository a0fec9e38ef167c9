//! Buffered output of primality verdicts.
//!
//! Every verdict is two bytes, `1\n` or `0\n`, appended to a fixed-capacity
//! buffer. The buffer is written to the sink when the next verdict would not
//! fit, and on every call to [`VerdictWriter::flush`].

use std::io::Write;

use crate::error::Error;

/// The line written for a prime.
pub const PRIME: &[u8; 2] = b"1\n";

/// The line written for a number that is not prime.
pub const NOT_PRIME: &[u8; 2] = b"0\n";

/// The number of bytes written per verdict.
pub const VERDICT_LEN: usize = PRIME.len();

/// Buffers verdict lines in front of a byte sink.
pub struct VerdictWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
    capacity: usize,
}

impl<W: Write> VerdictWriter<W> {
    /// Creates a writer with a buffer of `capacity` bytes, rounded up to hold
    /// at least one verdict.
    pub fn with_capacity(capacity: usize, inner: W) -> Self {
        let capacity = capacity.max(VERDICT_LEN);
        Self {
            inner,
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// The capacity of the write buffer.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of bytes waiting to be flushed.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// A reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Appends the verdict line for one number.
    #[inline]
    pub fn write_verdict(&mut self, is_prime: bool) -> Result<(), Error> {
        if self.buf.len() + VERDICT_LEN > self.capacity {
            self.flush_buffer()?;
        }

        let verdict = if is_prime { PRIME } else { NOT_PRIME };
        self.buf.extend_from_slice(verdict);
        Ok(())
    }

    /// Writes everything buffered to the sink and flushes the sink itself.
    ///
    /// The sink is flushed even when nothing is buffered.
    pub fn flush(&mut self) -> Result<(), Error> {
        self.flush_buffer()?;
        self.inner.flush().map_err(Error::WriteOutput)
    }

    /// Consumes the writer, returning the sink. Buffered bytes that were
    /// not flushed are discarded.
    pub fn into_inner(self) -> W {
        self.inner
    }

    #[tracing::instrument(
        name = "flush",
        level = "debug",
        skip_all,
        fields(bytes = self.buf.len())
    )]
    fn flush_buffer(&mut self) -> Result<(), Error> {
        if self.buf.is_empty() {
            return Ok(());
        }

        // The buffer is cleared even on failure. A partially written buffer
        // must not be written a second time.
        let result = self.inner.write_all(&self.buf);
        self.buf.clear();
        result.map_err(Error::WriteOutput)
    }
}
