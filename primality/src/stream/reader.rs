//! Buffered, allocation-free tokenizing of newline-delimited input.
//!
//! The reader owns one fixed-capacity buffer with two markers: `pos`, the
//! first unconsumed byte, and `filled`, one past the last byte read from the
//! source. Tokens are handed out as slices borrowed from that buffer.
//!
//! ## Refill Contract
//!
//! When no terminator is found between `pos` and `filled` the buffer is
//! refilled:
//!
//! 1. The unconsumed tail (a partial token) is moved to the front.
//! 2. The free space after it is filled by a single `read` call, retrying on
//!    [`ErrorKind::Interrupted`].
//! 3. A zero-byte read marks the end of the stream. A pending partial token
//!    is then returned as the last token; with nothing pending the stream is
//!    finished.
//!
//! ## Long Lines
//!
//! A line that fills the whole buffer without a terminator is handed out in
//! pieces. Every piece but the last has [`Token::complete`] unset, and all
//! pieces of a line share its line number. Consumers fold the pieces
//! together, so the buffer capacity never limits the length of a line.

use std::io::ErrorKind;
use std::io::Read;

use crate::error::Error;

/// The byte terminating every line of input.
pub const LINE_TERMINATOR: u8 = b'\n';

/// One line of input without its terminator, or a piece of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The 1-based line number.
    pub line: u64,
    /// The raw bytes of the line, or of this piece of it.
    pub bytes: &'a [u8],
    /// Whether these bytes end the line. Unset when the line continues in
    /// the next token.
    pub complete: bool,
}

/// Splits a byte source into newline-delimited tokens.
pub struct TokenReader<R> {
    inner: R,
    buf: Box<[u8]>,
    pos: usize,
    filled: usize,
    eof: bool,
    line: u64,
    /// Set while the current line has been handed out only in part.
    continuing: bool,
}

impl<R: Read> TokenReader<R> {
    /// Creates a reader with a buffer of `capacity` bytes (at least one).
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner,
            buf: vec![0u8; capacity.max(1)].into_boxed_slice(),
            pos: 0,
            filled: 0,
            eof: false,
            line: 0,
            continuing: false,
        }
    }

    /// The capacity of the read buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The number of lines started so far.
    pub fn lines_read(&self) -> u64 {
        self.line
    }

    /// Returns the next token, or `None` once the input is exhausted.
    ///
    /// An unterminated final line is returned like any other line.
    pub fn next_token(&mut self) -> Result<Option<Token<'_>>, Error> {
        let (start, end, complete) = loop {
            let pending = &self.buf[self.pos..self.filled];

            if let Some(offset) = pending.iter().position(|&byte| byte == LINE_TERMINATOR) {
                let start = self.pos;
                self.pos += offset + 1;
                break (start, start + offset, true);
            }

            if self.eof {
                if pending.is_empty() && !self.continuing {
                    return Ok(None);
                }
                let start = self.pos;
                self.pos = self.filled;
                break (start, self.filled, true);
            }

            if pending.len() == self.buf.len() {
                let start = self.pos;
                self.pos = self.filled;
                break (start, self.filled, false);
            }

            self.refill()?;
        };

        if !self.continuing {
            self.line += 1;
        }
        self.continuing = !complete;

        Ok(Some(Token {
            line: self.line,
            bytes: &self.buf[start..end],
            complete,
        }))
    }

    /// Only called with free space in the buffer after compaction.
    #[tracing::instrument(name = "refill", level = "debug", skip_all)]
    fn refill(&mut self) -> Result<(), Error> {
        if self.pos > 0 {
            self.buf.copy_within(self.pos..self.filled, 0);
            self.filled -= self.pos;
            self.pos = 0;
        }

        loop {
            match self.inner.read(&mut self.buf[self.filled..]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.filled += n;
                    return Ok(());
                }
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => return Err(Error::ReadInput(error)),
            }
        }
    }
}
