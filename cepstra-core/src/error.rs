//! Error types for the cepstra core library.
//!
//! Configuration problems are reported before any line is read; extraction
//! errors abort a run part way through.

use std::{fmt, io};

use thiserror::Error;

use crate::coefficient::{CoefficientId, Family};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Invalid coefficient request supplied when configuring an extractor.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    /// Coefficient order fell outside `0..=12`.
    #[error("coefficient order {order} for family {family} is outside 0..=12")]
    OrderOutOfRange {
        /// Family the order was requested for.
        family: Family,
        /// The rejected order.
        order: i64,
    },
    /// An entry of an order list was not an integer.
    #[error("`{token}` in the {family} order list is not an integer")]
    InvalidOrder {
        /// Family whose list contained the token.
        family: Family,
        /// The offending token, after trimming.
        token: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`ConfigError`] variants.
    enum ConfigErrorCode for ConfigError {
        /// Coefficient order fell outside `0..=12`.
        OrderOutOfRange => OrderOutOfRange { .. } => "CONFIG_ORDER_OUT_OF_RANGE",
        /// An entry of an order list was not an integer.
        InvalidOrder => InvalidOrder { .. } => "CONFIG_INVALID_ORDER",
    }
}

/// Failure raised while streaming a report through an extractor.
///
/// Lines written before the failure stay in the output.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Reading the input failed, including input that is not valid UTF-8.
    #[error("failed to read input line {line}: {source}")]
    Read {
        /// One-based number of the line being read.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Writing the output or the word echo failed.
    #[error("failed to write output for input line {line}: {source}")]
    Write {
        /// One-based number of the input line being converted.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A requested coefficient has no field on the record.
    #[error("coefficient {id} is missing from frame `{frame_id}`")]
    MissingField {
        /// The coefficient that could not be resolved.
        id: CoefficientId,
        /// Frame id of the record being converted.
        frame_id: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`ExtractError`] variants.
    enum ExtractErrorCode for ExtractError {
        /// Reading the input failed.
        Read => Read { .. } => "EXTRACT_READ_FAILED",
        /// Writing the output or the word echo failed.
        Write => Write { .. } => "EXTRACT_WRITE_FAILED",
        /// A requested coefficient has no field on the record.
        MissingField => MissingField { .. } => "EXTRACT_MISSING_FIELD",
    }
}

/// Convenient alias for results returned by the extraction API.
pub type Result<T> = core::result::Result<T, ExtractError>;
