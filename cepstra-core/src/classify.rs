//! Line classification for HList-style feature reports.
//!
//! Only two line shapes carry payload: the word marker that opens each
//! recording and the feature-vector line of a single frame. Both must match
//! the whole line; anything else is [`Line::Unrecognized`].

use crate::coefficient::{CoefficientId, FIELD_COUNT};

const MARKER_SOURCE: &str = " Source- ";
const MARKER_EXTENSION: &str = ".wav ";
const FRAME_SEPARATOR: &str = ": ";

/// Result of classifying one report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// A `--- Source- word.wav ---` marker carrying the word name.
    WordMarker(&'a str),
    /// A frame id followed by the full set of coefficient fields.
    FeatureVector(FeatureVector<'a>),
    /// Any other line.
    Unrecognized,
}

/// Fields of one feature-vector line, borrowed from the line text.
///
/// Field text is kept exactly as it appeared so that selected values are
/// written back without renormalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureVector<'a> {
    frame_id: &'a str,
    fields: [&'a str; FIELD_COUNT],
}

impl<'a> FeatureVector<'a> {
    /// Returns the frame id text.
    #[must_use]
    pub const fn frame_id(&self) -> &'a str {
        self.frame_id
    }

    /// Returns the frame id as a number, or `None` if it does not fit in a
    /// `u64`.
    #[must_use]
    pub fn frame_number(&self) -> Option<u64> {
        self.frame_id.parse().ok()
    }

    /// Returns the field text for `id`.
    ///
    /// # Examples
    /// ```
    /// use cepstra_core::{CoefficientId, Family, Line, classify};
    ///
    /// let values: Vec<String> = (0..39).map(|i| format!("{i}.5")).collect();
    /// let line = format!("7: {}", values.join(" "));
    /// let Line::FeatureVector(record) = classify(&line) else {
    ///     panic!("line must classify as a feature vector");
    /// };
    /// let c00 = CoefficientId::new(Family::C, 0).expect("valid");
    /// assert_eq!(record.field(c00), Some("12.5"));
    /// ```
    #[must_use]
    pub fn field(&self, id: CoefficientId) -> Option<&'a str> {
        self.fields.get(id.canonical_index()).copied()
    }

    /// Returns every field in canonical order.
    #[must_use]
    pub const fn fields(&self) -> &[&'a str; FIELD_COUNT] {
        &self.fields
    }
}

/// Classifies a single line with its terminator already removed.
///
/// # Examples
/// ```
/// use cepstra_core::{Line, classify};
///
/// assert_eq!(
///     classify("---------- Source- apple.wav ----------"),
///     Line::WordMarker("apple"),
/// );
/// assert_eq!(classify("Frame  C1  C2"), Line::Unrecognized);
/// ```
#[must_use]
pub fn classify(line: &str) -> Line<'_> {
    if let Some(word) = parse_word_marker(line) {
        return Line::WordMarker(word);
    }
    parse_feature_vector(line).map_or(Line::Unrecognized, Line::FeatureVector)
}

fn parse_word_marker(line: &str) -> Option<&str> {
    let body = strip_leading_rule(line)?.strip_prefix(MARKER_SOURCE)?;
    let word = strip_trailing_rule(body)?.strip_suffix(MARKER_EXTENSION)?;
    let is_word = !word.is_empty() && word.bytes().all(|byte| byte.is_ascii_lowercase());
    is_word.then_some(word)
}

fn strip_leading_rule(text: &str) -> Option<&str> {
    let rest = text.trim_start_matches('-');
    (rest.len() < text.len()).then_some(rest)
}

fn strip_trailing_rule(text: &str) -> Option<&str> {
    let rest = text.trim_end_matches('-');
    (rest.len() < text.len()).then_some(rest)
}

fn parse_feature_vector(line: &str) -> Option<FeatureVector<'_>> {
    let (frame_id, values) = line.split_once(FRAME_SEPARATOR)?;
    if !is_digits(frame_id) {
        return None;
    }

    // Single spaces only: a doubled or trailing space yields an empty token.
    let mut tokens = values.split(' ');
    let mut fields = [""; FIELD_COUNT];
    for slot in &mut fields {
        let token = tokens.next().filter(|token| is_decimal(token))?;
        *slot = token;
    }
    if tokens.next().is_some() {
        return None;
    }

    Some(FeatureVector { frame_id, fields })
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

fn is_decimal(token: &str) -> bool {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    unsigned
        .split_once('.')
        .is_some_and(|(whole, fraction)| is_digits(whole) && is_digits(fraction))
}
