//! Streaming conversion of a feature report into compact frame records.
//!
//! [`Extractor::run`] reads one line at a time, classifies it, and writes at
//! most one output line before reading the next.

use std::io::{BufRead, Write};

use tracing::{Span, debug, field, info, instrument, trace};

use crate::{
    Result,
    classify::{FeatureVector, Line, classify},
    coefficient::CoefficientId,
    error::ExtractError,
    format::{write_frame, write_word},
    select::select,
};

/// Counts gathered while converting one report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Input lines read.
    pub lines_read: usize,
    /// Word markers written.
    pub words: usize,
    /// Frame records written.
    pub frames: usize,
    /// Feature-vector lines dropped by the frame limit.
    pub frames_skipped: usize,
    /// Lines matching neither shape.
    pub ignored: usize,
}

/// Converts feature reports using a fixed coefficient request.
///
/// # Examples
/// ```
/// use cepstra_core::{ExtractorBuilder, Family};
///
/// let values: Vec<String> = (0..39).map(|i| format!("{i}.0")).collect();
/// let input = format!(
///     "--- Source- pear.wav ---\nheader line\n0: {}\n",
///     values.join(" ")
/// );
/// let extractor = ExtractorBuilder::new()
///     .with_orders(Family::C, "1")
///     .with_word_echo(false)
///     .build()
///     .expect("configuration is valid");
///
/// let mut output = Vec::new();
/// let summary = extractor
///     .run(input.as_bytes(), &mut output, std::io::sink())
///     .expect("conversion succeeds");
/// assert_eq!(output, b"pear\n0,0.0\n");
/// assert_eq!(summary.ignored, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extractor {
    requested: Vec<CoefficientId>,
    frame_limit: Option<u64>,
    echo_words: bool,
}

impl Extractor {
    pub(crate) const fn new(
        requested: Vec<CoefficientId>,
        frame_limit: Option<u64>,
        echo_words: bool,
    ) -> Self {
        Self {
            requested,
            frame_limit,
            echo_words,
        }
    }

    /// Returns the requested coefficients in output column order.
    #[must_use]
    pub const fn requested(&self) -> &[CoefficientId] {
        self.requested.as_slice()
    }

    /// Returns the exclusive upper bound on written frame ids, if any.
    #[must_use]
    pub const fn frame_limit(&self) -> Option<u64> {
        self.frame_limit
    }

    /// Returns whether word markers are echoed to the status writer.
    #[must_use]
    pub const fn echo_words(&self) -> bool {
        self.echo_words
    }

    /// Streams `reader` into `output`, echoing word markers to `status`.
    ///
    /// Word markers become a line holding the word; feature vectors become
    /// `frame_id,value,...` with the requested values in request order.
    /// Other lines are dropped. `status` is flushed after every echoed word;
    /// `output` and `status` are both flushed before returning.
    ///
    /// # Errors
    /// Returns [`ExtractError::Read`] if the input cannot be read or is not
    /// UTF-8, and [`ExtractError::Write`] if either writer fails. Lines
    /// written before the failure are not withdrawn.
    #[instrument(
        name = "core.run",
        err,
        skip(self, reader, output, status),
        fields(
            requested = self.requested.len(),
            frame_limit = field::Empty,
            echo_words = self.echo_words,
        ),
    )]
    pub fn run<R, W, S>(&self, reader: R, mut output: W, mut status: S) -> Result<ExtractionSummary>
    where
        R: BufRead,
        W: Write,
        S: Write,
    {
        if let Some(limit) = self.frame_limit {
            Span::current().record("frame_limit", limit);
        }

        let mut summary = ExtractionSummary::default();
        for (index, read) in reader.lines().enumerate() {
            let line = index + 1;
            let text = read.map_err(|source| ExtractError::Read { line, source })?;
            summary.lines_read += 1;

            match classify(&text) {
                Line::WordMarker(word) => {
                    write_word(&mut output, word)
                        .map_err(|source| ExtractError::Write { line, source })?;
                    if self.echo_words {
                        // progress is visible as soon as each word is reached
                        write_word(&mut status, word)
                            .and_then(|()| status.flush())
                            .map_err(|source| ExtractError::Write { line, source })?;
                    }
                    debug!(line, word, "word marker");
                    summary.words += 1;
                }
                Line::FeatureVector(record) => {
                    if !self.admits(&record) {
                        trace!(line, frame_id = record.frame_id(), "frame beyond limit");
                        summary.frames_skipped += 1;
                        continue;
                    }
                    let values = select(&record, &self.requested)?;
                    write_frame(&mut output, record.frame_id(), &values)
                        .map_err(|source| ExtractError::Write { line, source })?;
                    summary.frames += 1;
                }
                Line::Unrecognized => {
                    trace!(line, "line ignored");
                    summary.ignored += 1;
                }
            }
        }

        let line = summary.lines_read;
        output
            .flush()
            .and_then(|()| status.flush())
            .map_err(|source| ExtractError::Write { line, source })?;

        info!(
            lines_read = summary.lines_read,
            words = summary.words,
            frames = summary.frames,
            frames_skipped = summary.frames_skipped,
            ignored = summary.ignored,
            "extraction completed"
        );
        Ok(summary)
    }

    fn admits(&self, record: &FeatureVector<'_>) -> bool {
        match self.frame_limit {
            None => true,
            // ids too large for u64 are beyond any limit
            Some(limit) => record.frame_number().is_some_and(|frame| frame < limit),
        }
    }
}
