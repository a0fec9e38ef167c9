//! End to end runs of the stream pipeline over in-memory streams and files.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;

use primality::decimal::DecimalError;
use primality::testing::expected_output;
use primality::testing::render_input;
use primality::testing::ChunkedReader;
use primality::Error;
use primality::PrimalityTester;
use primality::SieveOracle;
use primality::StreamPipeline;

fn pipeline() -> StreamPipeline {
    StreamPipeline::new(PrimalityTester::new(SieveOracle::new()))
}

/// A deterministic spread of values over both lookup paths.
fn mixed_values(count: u64) -> Vec<u64> {
    (0..count)
        .map(|i| match i % 4 {
            0 => i,
            1 => 131_000 + i % 1_000,
            2 => 17_000_000 + i % 5_000,
            _ => (i * 7_919) % 2_000_000,
        })
        .collect()
}

#[test]
fn output_line_matches_input_line() {
    let values = mixed_values(50_000);
    let input = render_input(&values);

    let mut output = Vec::new();
    let summary = pipeline().run(&input[..], &mut output).unwrap();

    assert_eq!(summary.records, values.len() as u64);
    assert_eq!(output, expected_output(&values));
    assert_eq!(
        output.iter().filter(|b| **b == b'1').count() as u64,
        summary.primes
    );
}

#[test]
fn buffer_sizes_do_not_change_the_output() {
    let values = mixed_values(5_000);
    let input = render_input(&values);
    let expected = expected_output(&values);

    for (read, write) in [(1, 2), (4, 3), (12, 2), (13, 7), (64, 64), (4096, 1000)] {
        let mut output = Vec::new();
        pipeline()
            .with_read_buffer_size(read)
            .with_write_buffer_size(write)
            .run(ChunkedReader::new(&input, 3), &mut output)
            .unwrap();
        assert_eq!(output, expected, "read = {read}, write = {write}");
    }
}

#[test]
fn zero_padded_lines_longer_than_the_read_buffer() {
    let values = mixed_values(2_000);
    let input: Vec<u8> = values
        .iter()
        .flat_map(|value| format!("{value:0>150}\n").into_bytes())
        .collect();

    let mut output = Vec::new();
    let summary = pipeline()
        .with_read_buffer_size(64)
        .run(ChunkedReader::new(&input, 100), &mut output)
        .unwrap();

    assert_eq!(summary.records, values.len() as u64);
    assert_eq!(output, expected_output(&values));
}

#[test]
fn file_to_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.txt");
    let output_path = dir.path().join("output.txt");

    let values = mixed_values(1_000);
    std::fs::write(&input_path, render_input(&values)).unwrap();

    let input = BufReader::new(File::open(&input_path).unwrap());
    let output = File::create(&output_path).unwrap();
    pipeline().run(input, output).unwrap();

    let mut written = Vec::new();
    File::open(&output_path)
        .unwrap()
        .read_to_end(&mut written)
        .unwrap();
    assert_eq!(written, expected_output(&values));
}

#[test]
fn malformed_line_in_a_long_stream() {
    let mut input = render_input(&(0..10_000).collect::<Vec<_>>());
    input.extend_from_slice(b"12 3\n");
    input.extend_from_slice(&render_input(&[2, 3, 5]));

    let mut output = Vec::new();
    let result = pipeline()
        .with_write_buffer_size(256)
        .run(&input[..], &mut output);

    match result {
        Err(Error::InvalidToken {
            line,
            token,
            source,
        }) => {
            assert_eq!(line, 10_001);
            assert_eq!(token, "12 3");
            assert_eq!(
                source,
                DecimalError::InvalidDigit {
                    position: 2,
                    byte: b' ',
                }
            );
        }
        other => panic!("expected InvalidToken, got {other:?}"),
    }
    assert_eq!(output, expected_output(&(0..10_000).collect::<Vec<_>>()));
}

#[test]
fn error_messages_name_the_offending_token() {
    let mut output = Vec::new();
    let error = pipeline().run(&b"1\nabc\n"[..], &mut output).unwrap_err();
    let message = error.to_string();

    assert!(message.contains("line 2"), "{message}");
    assert!(message.contains("abc"), "{message}");
}
