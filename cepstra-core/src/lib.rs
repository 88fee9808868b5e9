//! Cepstra core library.
//!
//! Converts HList-style acoustic feature reports into compact per-frame
//! records. A report interleaves word markers such as
//! `---------- Source- apple.wav ----------` with feature-vector lines of the
//! form `3: v1 v2 ... v39`; the converter keeps the word names, selects the
//! requested coefficient columns from each vector line, and drops everything
//! else.
//!
//! ```
//! use cepstra_core::{ExtractorBuilder, Family};
//!
//! let extractor = ExtractorBuilder::new()
//!     .with_orders(Family::C, "0,1")
//!     .with_orders(Family::D, "0")
//!     .with_word_echo(false)
//!     .build()
//!     .expect("configuration is valid");
//!
//! let input = "---------- Source- apple.wav ----------\n\
//!     3: 1.0 2.0 3.0 4.0 5.0 6.0 7.0 8.0 9.0 10.0 11.0 12.0 0.0 \
//!     -1.0 -2.0 -3.0 -4.0 -5.0 -6.0 -7.0 -8.0 -9.0 -10.0 -11.0 -12.0 -0.0 \
//!     1.1 2.1 3.1 4.1 5.1 6.1 7.1 8.1 9.1 10.1 11.1 12.1 0.1\n";
//! let mut output = Vec::new();
//! extractor
//!     .run(input.as_bytes(), &mut output, std::io::sink())
//!     .expect("conversion succeeds");
//! assert_eq!(output, b"apple\n3,0.0,1.0,-0.0\n");
//! ```

mod builder;
mod classify;
mod coefficient;
mod error;
mod extractor;
mod format;
mod select;

pub use crate::{
    builder::{ExtractorBuilder, parse_order_list},
    classify::{FeatureVector, Line, classify},
    coefficient::{CANONICAL_FIELDS, CoefficientId, FIELD_COUNT, Family, MAX_ORDER, ORDERS_PER_FAMILY},
    error::{ConfigError, ConfigErrorCode, ExtractError, ExtractErrorCode, Result},
    extractor::{ExtractionSummary, Extractor},
    format::{write_frame, write_word},
    select::select,
};
