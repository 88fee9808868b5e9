//! Tests for the streaming [`Extractor`] API.

use std::io::{self, BufRead, Read, Write};

use cepstra_core::{ExtractError, ExtractionSummary, Extractor, ExtractorBuilder, Family};
use cepstra_test_support::fixtures::{APPLE_MARKER, FRAME_THREE, frame_line, marker_line};
use cepstra_test_support::tracing::RecordingLayer;
use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[fixture]
fn reference_extractor() -> Extractor {
    ExtractorBuilder::new()
        .with_orders(Family::C, "0,1")
        .with_orders(Family::D, "0")
        .build()
        .expect("configuration must be valid")
}

fn convert(extractor: &Extractor, input: &str) -> (String, String, ExtractionSummary) {
    let mut output = Vec::new();
    let mut status = Vec::new();
    let summary = extractor
        .run(input.as_bytes(), &mut output, &mut status)
        .expect("conversion must succeed");
    (
        String::from_utf8(output).expect("output must be UTF-8"),
        String::from_utf8(status).expect("status must be UTF-8"),
        summary,
    )
}

#[rstest]
fn converts_reference_report(reference_extractor: Extractor) {
    let input = format!("{APPLE_MARKER}\n{FRAME_THREE}\n");
    let (output, status, summary) = convert(&reference_extractor, &input);
    assert_eq!(output, "apple\n3,0.0,1.0,-0.0\n");
    assert_eq!(status, "apple\n");
    assert_eq!(
        summary,
        ExtractionSummary {
            lines_read: 2,
            words: 1,
            frames: 1,
            frames_skipped: 0,
            ignored: 0,
        }
    );
}

#[rstest]
fn unmodelled_lines_are_dropped_without_stopping(reference_extractor: Extractor) {
    let input = format!(
        "Header\n\n{APPLE_MARKER}\nFrame  C1  C2\n{FRAME_THREE}\n\n{}\n{FRAME_THREE}\n",
        marker_line("pear", 3)
    );
    let (output, _, summary) = convert(&reference_extractor, &input);
    assert_eq!(output, "apple\n3,0.0,1.0,-0.0\npear\n3,0.0,1.0,-0.0\n");
    assert_eq!(summary.ignored, 4);
    assert_eq!(summary.lines_read, 8);
}

#[rstest]
fn windows_line_endings_are_accepted(reference_extractor: Extractor) {
    let input = format!("{APPLE_MARKER}\r\n{FRAME_THREE}\r\n");
    let (output, _, _) = convert(&reference_extractor, &input);
    assert_eq!(output, "apple\n3,0.0,1.0,-0.0\n");
}

#[rstest]
fn final_line_without_terminator_is_converted(reference_extractor: Extractor) {
    let (output, _, _) = convert(&reference_extractor, FRAME_THREE);
    assert_eq!(output, "3,0.0,1.0,-0.0\n");
}

#[rstest]
fn empty_request_writes_bare_frame_id() {
    let extractor = ExtractorBuilder::new().build().expect("defaults are valid");
    let (output, _, _) = convert(&extractor, &format!("{FRAME_THREE}\n"));
    assert_eq!(output, "3\n");
}

#[rstest]
fn repeated_request_repeats_column() {
    let extractor = ExtractorBuilder::new()
        .with_orders(Family::A, "12,12")
        .build()
        .expect("configuration must be valid");
    let (output, _, _) = convert(&extractor, FRAME_THREE);
    assert_eq!(output, "3,12.1,12.1\n");
}

#[rstest]
fn echo_can_be_disabled() {
    let extractor = ExtractorBuilder::new()
        .with_word_echo(false)
        .build()
        .expect("configuration must be valid");
    let input = format!("{APPLE_MARKER}\n{}\n", marker_line("fig", 2));
    let (output, status, summary) = convert(&extractor, &input);
    assert_eq!(output, "apple\nfig\n");
    assert!(status.is_empty());
    assert_eq!(summary.words, 2);
}

#[rstest]
#[case::below_every_frame(0, "")]
#[case::first_two(2, "0,0.0\n1,0.1\n")]
#[case::above_every_frame(10, "0,0.0\n1,0.1\n2,0.2\n")]
fn frame_limit_drops_later_frames(#[case] limit: u64, #[case] expected: &str) {
    let extractor = ExtractorBuilder::new()
        .with_orders(Family::C, "1")
        .with_frame_limit(limit)
        .build()
        .expect("configuration must be valid");
    let input: String = (0..3).map(|frame| frame_line(frame) + "\n").collect();
    let (output, _, summary) = convert(&extractor, &input);
    assert_eq!(output, expected);
    assert_eq!(summary.frames + summary.frames_skipped, 3);
}

#[rstest]
fn oversized_frame_id_is_beyond_any_limit() {
    let extractor = ExtractorBuilder::new()
        .with_frame_limit(u64::MAX)
        .build()
        .expect("configuration must be valid");
    let line = format!("99999999999999999999999{}", &FRAME_THREE[1..]);
    let (output, _, summary) = convert(&extractor, &line);
    assert!(output.is_empty());
    assert_eq!(summary.frames_skipped, 1);
}

#[rstest]
fn oversized_frame_id_is_kept_without_limit() {
    let extractor = ExtractorBuilder::new().build().expect("defaults are valid");
    let line = format!("99999999999999999999999{}", &FRAME_THREE[1..]);
    let (output, _, _) = convert(&extractor, &line);
    assert_eq!(output, "99999999999999999999999\n");
}

#[rstest]
fn converting_output_again_yields_nothing(reference_extractor: Extractor) {
    let input = format!("{APPLE_MARKER}\n{FRAME_THREE}\n{}\n", frame_line(4));
    let (first, _, _) = convert(&reference_extractor, &input);
    assert!(!first.is_empty());
    let (second, _, summary) = convert(&reference_extractor, &first);
    assert!(second.is_empty());
    assert_eq!(summary.ignored, 3);
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("boom"))
    }
}

impl BufRead for FailingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Err(io::Error::other("boom"))
    }

    fn consume(&mut self, _amt: usize) {}
}

#[rstest]
fn read_errors_propagate(reference_extractor: Extractor) {
    let err = reference_extractor
        .run(FailingReader, io::sink(), io::sink())
        .expect_err("read failure must abort");
    assert!(matches!(err, ExtractError::Read { line: 1, .. }));
}

#[rstest]
fn invalid_utf8_is_a_read_error(reference_extractor: Extractor) {
    let input: &[u8] = b"apple\n\xff\xfe\n";
    let err = reference_extractor
        .run(input, io::sink(), io::sink())
        .expect_err("invalid UTF-8 must abort");
    match err {
        ExtractError::Read { line, source } => {
            assert_eq!(line, 2);
            assert_eq!(source.kind(), io::ErrorKind::InvalidData);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Accepts a fixed number of bytes, then fails every write.
struct ShortWriter {
    written: Vec<u8>,
    capacity: usize,
}

impl Write for ShortWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.capacity {
            return Err(io::Error::other("disk full"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[rstest]
fn write_errors_keep_earlier_lines(reference_extractor: Extractor) {
    let input = format!("{APPLE_MARKER}\n{FRAME_THREE}\n");
    let mut output = ShortWriter {
        written: Vec::new(),
        capacity: 8,
    };
    let err = reference_extractor
        .run(input.as_bytes(), &mut output, io::sink())
        .expect_err("write failure must abort");
    assert!(matches!(err, ExtractError::Write { line: 2, .. }));
    assert_eq!(output.written, b"apple\n");
}

/// Keeps a copy of everything written at each flush.
#[derive(Default)]
struct FlushLog {
    pending: Vec<u8>,
    snapshots: Vec<String>,
}

impl Write for FlushLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.snapshots
            .push(String::from_utf8_lossy(&self.pending).into_owned());
        Ok(())
    }
}

#[rstest]
fn each_echoed_word_is_flushed(reference_extractor: Extractor) {
    let input = format!(
        "{APPLE_MARKER}\n{FRAME_THREE}\n{}\n{FRAME_THREE}\n",
        marker_line("lime", 4)
    );
    let mut status = FlushLog::default();
    reference_extractor
        .run(input.as_bytes(), io::sink(), &mut status)
        .expect("conversion must succeed");
    assert_eq!(
        status.snapshots,
        ["apple\n", "apple\nlime\n", "apple\nlime\n"]
    );
}

#[rstest]
fn run_emits_span_and_summary_event() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let extractor = ExtractorBuilder::new()
        .with_orders(Family::C, "1,2,3")
        .with_frame_limit(8)
        .build()
        .expect("configuration must be valid");
    let input = format!("{APPLE_MARKER}\n{FRAME_THREE}\nnoise\n");

    let summary = tracing::subscriber::with_default(subscriber, || {
        extractor.run(input.as_bytes(), io::sink(), io::sink())
    })
    .expect("conversion must succeed");
    assert_eq!(summary.frames, 1);

    let span = layer.span("core.run").expect("core.run span must exist");
    assert_eq!(span.field("requested"), Some("3"));
    assert_eq!(span.field("frame_limit"), Some("8"));
    assert_eq!(span.field("echo_words"), Some("true"));

    let events = layer.events_with_message("extraction completed");
    let event = events.first().expect("summary event must exist");
    assert_eq!(event.level, Level::INFO);
    assert_eq!(event.fields.get("frames").map(String::as_str), Some("1"));
    assert_eq!(event.fields.get("ignored").map(String::as_str), Some("1"));
}
