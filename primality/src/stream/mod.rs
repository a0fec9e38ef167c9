//! # Stream Pipeline
//!
//! Classifies a newline-delimited stream of decimal integers, writing one
//! verdict line per input line in the same order.
//!
//! ## Flow
//!
//! ```text
//! input ──► TokenReader ──► DecimalAccumulator ──► PrimalityTester ──► VerdictWriter ──► output
//!           (refill)                                              (flush)
//! ```
//!
//! A run is all-or-nothing: the first I/O failure, malformed line or
//! out-of-range value ends it with an error. Verdicts for the lines before
//! the failure are still flushed to the output.

use std::io::Read;
use std::io::Write;

use crate::decimal::DecimalAccumulator;
use crate::error::Error;
use crate::tester::PrimalityTester;
use crate::DEFAULT_BUFFER_SIZE;

pub mod reader;
pub mod writer;

pub use reader::Token;
pub use reader::TokenReader;
pub use writer::VerdictWriter;

/// Counts gathered over one pipeline run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// The number of lines classified.
    pub records: u64,
    /// How many of them were prime.
    pub primes: u64,
}

/// Connects an input stream to an output stream through a
/// [`PrimalityTester`].
#[derive(Debug, Clone)]
pub struct StreamPipeline {
    tester: PrimalityTester,
    read_buffer_size: usize,
    write_buffer_size: usize,
}

impl StreamPipeline {
    /// Creates a pipeline with the default buffer sizes.
    pub fn new(tester: PrimalityTester) -> Self {
        Self {
            tester,
            read_buffer_size: DEFAULT_BUFFER_SIZE,
            write_buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Sets the read buffer capacity. Lines longer than the buffer are
    /// decoded in pieces.
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Sets the write buffer capacity.
    pub fn with_write_buffer_size(mut self, size: usize) -> Self {
        self.write_buffer_size = size;
        self
    }

    /// The tester used to classify each value.
    pub fn tester(&self) -> &PrimalityTester {
        &self.tester
    }

    /// Classifies every line of `input`, writing the verdicts to `output`.
    ///
    /// The buffers are allocated here and dropped when the run ends. The
    /// output is flushed once more at the end whether or not the run
    /// succeeded.
    #[tracing::instrument(
        name = "pipeline_run",
        skip_all,
        fields(
            read_buffer_size = self.read_buffer_size,
            write_buffer_size = self.write_buffer_size,
        )
    )]
    pub fn run<R, W>(&self, input: R, output: W) -> Result<RunSummary, Error>
    where
        R: Read,
        W: Write,
    {
        let mut reader = TokenReader::with_capacity(self.read_buffer_size, input);
        let mut writer = VerdictWriter::with_capacity(self.write_buffer_size, output);
        let mut summary = RunSummary::default();

        let result = self.classify_all(&mut reader, &mut writer, &mut summary);
        let flushed = writer.flush();

        if let (Err(error), Err(flush_error)) = (&result, &flushed) {
            tracing::warn!(%error, %flush_error, "the final flush failed after a failed run");
        }
        result?;
        flushed?;

        tracing::debug!(
            records = summary.records,
            primes = summary.primes,
            "stream classified"
        );
        Ok(summary)
    }

    fn classify_all<R, W>(
        &self,
        reader: &mut TokenReader<R>,
        writer: &mut VerdictWriter<W>,
        summary: &mut RunSummary,
    ) -> Result<(), Error>
    where
        R: Read,
        W: Write,
    {
        let mut accumulator = DecimalAccumulator::new(self.tester.max_queryable());

        while let Some(token) = reader.next_token()? {
            let invalid = |source| Error::InvalidToken {
                line: token.line,
                token: String::from_utf8_lossy(token.bytes).into_owned(),
                source,
            };

            accumulator.push(token.bytes).map_err(invalid)?;
            if !token.complete {
                continue;
            }
            let value = accumulator.finish().map_err(invalid)?;

            let is_prime = self.tester.is_prime(value)?;
            writer.write_verdict(is_prime)?;

            summary.records += 1;
            summary.primes += is_prime as u64;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::DecimalError;
    use crate::sieve::SieveOracle;
    use crate::testing::expected_output;
    use crate::testing::render_input;
    use crate::testing::ChunkedReader;
    use crate::testing::FailingReader;
    use crate::testing::RecordingWriter;
    use std::io::ErrorKind;
    use std::sync::LazyLock;
    use test_case::test_case;

    static TESTER: LazyLock<PrimalityTester> =
        LazyLock::new(|| PrimalityTester::new(SieveOracle::new()));

    fn pipeline() -> StreamPipeline {
        StreamPipeline::new(TESTER.clone())
    }

    fn run_to_vec(
        pipeline: &StreamPipeline,
        input: &[u8],
    ) -> (Result<RunSummary, Error>, Vec<u8>) {
        let mut output = Vec::new();
        let result = pipeline.run(input, &mut output);
        (result, output)
    }

    fn zero_padded(width: usize, value: u64) -> Vec<u8> {
        format!("{value:0>width$}\n").into_bytes()
    }

    #[test_case(b"", b"" ; "empty input")]
    #[test_case(b"1\n2\n3\n4\n5\n6\n7\n", b"0\n1\n1\n0\n1\n0\n1\n" ; "first seven integers")]
    #[test_case(b"2\n3", b"1\n1\n" ; "missing trailing newline")]
    #[test_case(b"0\n", b"0\n" ; "zero")]
    #[test_case(b"0", b"0\n" ; "unterminated zero")]
    #[test_case(b"131071\n", b"1\n" ; "prime below the ceiling")]
    #[test_case(b"131072\n", b"0\n" ; "the ceiling")]
    #[test_case(b"131101\n", b"1\n" ; "first prime above the ceiling")]
    #[test_case(b"2147483647\n4294967297\n", b"1\n0\n" ; "large values")]
    #[test_case(b"17179869184\n", b"0\n" ; "the maximum")]
    fn test_run(input: &[u8], expected: &[u8]) {
        let (result, output) = run_to_vec(&pipeline(), input);
        result.unwrap();
        assert_eq!(output, expected);
    }

    #[test_case(4, b"1234", b"0\n" ; "unterminated line exactly filling the buffer")]
    #[test_case(4, b"1234\n", b"0\n" ; "terminated line exactly filling the buffer")]
    #[test_case(4, b"13\n0000013\n", b"1\n1\n" ; "zero padded line longer than the buffer")]
    #[test_case(4, b"131101\n131072", b"1\n0\n" ; "unpadded lines longer than the buffer")]
    #[test_case(1, b"17\n18\n", b"1\n0\n" ; "one byte buffer")]
    fn test_read_buffer_size_does_not_limit_lines(
        read_buffer_size: usize,
        input: &[u8],
        expected: &[u8],
    ) {
        let pipeline = pipeline().with_read_buffer_size(read_buffer_size);
        let (result, output) = run_to_vec(&pipeline, input);
        result.unwrap();
        assert_eq!(output, expected);
    }

    #[test_case(64, 7, b"1\n" ; "padding fills the buffer")]
    #[test_case(64, 131101, b"1\n" ; "padding spills past the buffer")]
    #[test_case(64, 131072, b"0\n" ; "composite spills past the buffer")]
    #[test_case(4096, 17179869143, b"1\n" ; "padding many buffers long")]
    fn test_zero_padding_at_the_smallest_configured_buffer(
        width: usize,
        value: u64,
        expected: &[u8],
    ) {
        let input = zero_padded(width + 1, value);
        let pipeline = pipeline().with_read_buffer_size(64);
        let (result, output) = run_to_vec(&pipeline, &input);

        assert_eq!(
            result.unwrap(),
            RunSummary {
                records: 1,
                primes: (expected == b"1\n") as u64,
            }
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_summary_counts_records_and_primes() {
        let (result, _) = run_to_vec(&pipeline(), b"1\n2\n3\n4\n5\n6\n7\n");
        assert_eq!(
            result.unwrap(),
            RunSummary {
                records: 7,
                primes: 4,
            }
        );
    }

    #[test]
    fn test_tiny_buffers_match_default_buffers() {
        let values: Vec<u64> = (0..2_000).chain(131_000..131_200).collect();
        let input = render_input(&values);

        let tiny = pipeline()
            .with_read_buffer_size(3)
            .with_write_buffer_size(3);
        let (result, output) = run_to_vec(&tiny, &input);
        result.unwrap();
        assert_eq!(output, expected_output(&values));

        let (result, default_output) = run_to_vec(&pipeline(), &input);
        result.unwrap();
        assert_eq!(output, default_output);
    }

    #[test]
    fn test_chunked_and_interrupted_source() {
        let values: Vec<u64> = (100..400).collect();
        let input = render_input(&values);
        let source = ChunkedReader::new(&input, 5).interrupting();

        let mut output = Vec::new();
        pipeline()
            .with_read_buffer_size(16)
            .run(source, &mut output)
            .unwrap();
        assert_eq!(output, expected_output(&values));
    }

    #[test]
    fn test_malformed_line_stops_the_run() {
        let (result, output) = run_to_vec(&pipeline(), b"2\n3\n4x\n5\n");

        match result {
            Err(Error::InvalidToken {
                line,
                token,
                source,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(token, "4x");
                assert_eq!(
                    source,
                    DecimalError::InvalidDigit {
                        position: 1,
                        byte: b'x',
                    }
                );
            }
            other => panic!("expected InvalidToken, got {other:?}"),
        }
        // Verdicts before the malformed line are flushed, nothing after it.
        assert_eq!(output, b"1\n1\n");
    }

    #[test]
    fn test_malformed_byte_in_a_later_piece_of_a_long_line() {
        let pipeline = pipeline().with_read_buffer_size(4);
        let (result, output) = run_to_vec(&pipeline, b"5\n000000x1\n");

        match result {
            Err(Error::InvalidToken {
                line: 2,
                token,
                source,
            }) => {
                assert_eq!(token, "00x1");
                assert_eq!(
                    source,
                    DecimalError::InvalidDigit {
                        position: 6,
                        byte: b'x',
                    }
                );
            }
            other => panic!("expected InvalidToken on line 2, got {other:?}"),
        }
        assert_eq!(output, b"1\n");
    }

    #[test]
    fn test_blank_line_is_malformed() {
        let (result, output) = run_to_vec(&pipeline(), b"7\n\n11\n");
        match result {
            Err(Error::InvalidToken {
                line: 2,
                source: DecimalError::Empty,
                ..
            }) => {}
            other => panic!("expected an empty token on line 2, got {other:?}"),
        }
        assert_eq!(output, b"1\n");
    }

    #[test]
    fn test_value_above_the_maximum_is_a_parse_error() {
        let (result, output) = run_to_vec(&pipeline(), b"5\n17179869185\n");
        match result {
            Err(Error::InvalidToken {
                line: 2,
                token,
                source: DecimalError::Overflow { max },
            }) => {
                assert_eq!(token, "17179869185");
                assert_eq!(max, crate::MAX_QUERYABLE);
            }
            other => panic!("expected an overflow on line 2, got {other:?}"),
        }
        assert_eq!(output, b"1\n");
    }

    #[test]
    fn test_read_failure_flushes_completed_verdicts() {
        let source = FailingReader::new(b"2\n4\n", ErrorKind::TimedOut);
        let mut output = Vec::new();
        let result = pipeline().run(source, &mut output);

        match result {
            Err(Error::ReadInput(error)) => assert_eq!(error.kind(), ErrorKind::TimedOut),
            other => panic!("expected ReadInput, got {other:?}"),
        }
        assert_eq!(output, b"1\n0\n");
    }

    #[test]
    fn test_write_failure_is_reported() {
        let pipeline = pipeline().with_write_buffer_size(4);
        let mut sink = RecordingWriter::with_limit(4);
        let result = pipeline.run(&b"2\n3\n5\n7\n11\n"[..], &mut sink);

        assert!(matches!(result, Err(Error::WriteOutput(_))));
        assert_eq!(sink.written, b"1\n1\n");
    }

    #[test]
    fn test_sink_is_flushed_once_on_success() {
        let mut sink = RecordingWriter::default();
        pipeline().run(&b"3\n"[..], &mut sink).unwrap();
        assert_eq!(sink.flushes, 1);
        assert_eq!(sink.written, b"1\n");
    }

    #[test]
    fn test_runs_are_idempotent() {
        let input = render_input(&[17, 18, 131101, 4294967291, 1]);
        let (first, first_output) = run_to_vec(&pipeline(), &input);
        let (second, second_output) = run_to_vec(&pipeline(), &input);

        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(first_output, second_output);
    }

    #[test]
    fn test_small_ceiling_pipeline() {
        let tester = PrimalityTester::new(SieveOracle::with_ceiling(16).unwrap());
        let pipeline = StreamPipeline::new(tester);

        let (result, output) = run_to_vec(&pipeline, b"251\n256\n257\n");
        assert_eq!(output, b"1\n0\n");
        match result {
            Err(Error::InvalidToken {
                line: 3,
                source: DecimalError::Overflow { max: 256 },
                ..
            }) => {}
            other => panic!("expected an overflow on line 3, got {other:?}"),
        }
    }
}
