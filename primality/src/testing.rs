//! Module with testing utility functions.

#![allow(clippy::unwrap_in_result, clippy::unwrap_used, clippy::expect_used)]

use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;

/// Ground-truth primality by trial division from 2, independent of the sieve.
pub fn is_prime_reference(x: u64) -> bool {
    if x < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor * divisor <= x {
        if x % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Renders the expected pipeline output for the given values.
pub fn expected_output(values: &[u64]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|&x| match is_prime_reference(x) {
            true => *b"1\n",
            false => *b"0\n",
        })
        .collect()
}

/// Renders the given values as newline-terminated input.
pub fn render_input(values: &[u64]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|x| format!("{x}\n").into_bytes())
        .collect()
}

/// A reader that hands out at most `chunk` bytes per call, and reports
/// [`ErrorKind::Interrupted`] before every chunk when `interrupt` is set.
///
/// This exercises the buffer refill logic the way a pipe or a socket would.
pub struct ChunkedReader<'a> {
    data: &'a [u8],
    chunk: usize,
    interrupt: bool,
    interrupted: bool,
}

impl<'a> ChunkedReader<'a> {
    /// Creates a reader over `data` returning at most `chunk` bytes per read.
    pub fn new(data: &'a [u8], chunk: usize) -> Self {
        Self {
            data,
            chunk,
            interrupt: false,
            interrupted: false,
        }
    }

    /// Makes every other read call fail with [`ErrorKind::Interrupted`].
    pub fn interrupting(mut self) -> Self {
        self.interrupt = true;
        self
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.interrupt && !self.interrupted {
            self.interrupted = true;
            return Err(ErrorKind::Interrupted.into());
        }
        self.interrupted = false;

        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// A reader that returns `data` and then fails with the given error kind.
pub struct FailingReader<'a> {
    data: &'a [u8],
    kind: ErrorKind,
}

impl<'a> FailingReader<'a> {
    /// Creates a reader that yields `data` before failing with `kind`.
    pub fn new(data: &'a [u8], kind: ErrorKind) -> Self {
        Self { data, kind }
    }
}

impl Read for FailingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.data.is_empty() {
            return Err(self.kind.into());
        }
        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// A writer that records every `write` call and accepts at most `limit`
/// bytes in total before failing with [`ErrorKind::BrokenPipe`].
#[derive(Debug, Default)]
pub struct RecordingWriter {
    /// Everything accepted so far.
    pub written: Vec<u8>,
    /// The size of every successful `write` call, in order.
    pub writes: Vec<usize>,
    /// The number of `flush` calls.
    pub flushes: usize,
    /// The total number of bytes accepted before failing.
    pub limit: Option<usize>,
}

impl RecordingWriter {
    /// A writer that fails once more than `limit` bytes have been written.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}

impl Write for RecordingWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Some(limit) = self.limit {
            if self.written.len() + buf.len() > limit {
                return Err(ErrorKind::BrokenPipe.into());
            }
        }
        self.written.extend_from_slice(buf);
        self.writes.push(buf.len());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
