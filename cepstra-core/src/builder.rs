//! Builder utilities for configuring an [`Extractor`].
//!
//! Order lists are stored as given and validated together in
//! [`ExtractorBuilder::build`], so configuration errors surface before any
//! input is read.

use crate::{
    coefficient::{CoefficientId, Family},
    error::ConfigError,
    extractor::Extractor,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Request {
    Coefficient(CoefficientId),
    OrderList { family: Family, raw: String },
}

/// Configures and constructs [`Extractor`] instances.
///
/// Requests are kept in the order they are added; that order becomes the
/// column order of every frame record.
///
/// # Examples
/// ```
/// use cepstra_core::{ExtractorBuilder, Family};
///
/// let extractor = ExtractorBuilder::new()
///     .with_orders(Family::C, "0,1")
///     .with_orders(Family::D, "0")
///     .with_frame_limit(100)
///     .build()
///     .expect("configuration is valid");
/// let labels: Vec<String> = extractor.requested().iter().map(ToString::to_string).collect();
/// assert_eq!(labels, ["C00", "C01", "D00"]);
/// assert_eq!(extractor.frame_limit(), Some(100));
/// ```
#[derive(Debug, Clone)]
pub struct ExtractorBuilder {
    requests: Vec<Request>,
    frame_limit: Option<u64>,
    echo_words: bool,
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorBuilder {
    /// Creates a builder with no requested coefficients, no frame limit and
    /// word echo enabled.
    ///
    /// # Examples
    /// ```
    /// use cepstra_core::ExtractorBuilder;
    ///
    /// let builder = ExtractorBuilder::new();
    /// assert!(builder.echo_words());
    /// assert_eq!(builder.frame_limit(), None);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests: Vec::new(),
            frame_limit: None,
            echo_words: true,
        }
    }

    /// Appends a comma-separated list of orders for `family`, such as
    /// `"0,1,12"`. Whitespace around each entry is ignored.
    #[must_use]
    pub fn with_orders(mut self, family: Family, raw: impl Into<String>) -> Self {
        self.requests.push(Request::OrderList {
            family,
            raw: raw.into(),
        });
        self
    }

    /// Appends a single, already validated coefficient.
    #[must_use]
    pub fn with_coefficient(mut self, id: CoefficientId) -> Self {
        self.requests.push(Request::Coefficient(id));
        self
    }

    /// Restricts output to frames whose id is below `limit`.
    #[must_use]
    pub const fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    /// Returns the configured frame limit.
    #[must_use]
    pub const fn frame_limit(&self) -> Option<u64> {
        self.frame_limit
    }

    /// Enables or disables echoing word markers to the status writer.
    #[must_use]
    pub const fn with_word_echo(mut self, echo_words: bool) -> Self {
        self.echo_words = echo_words;
        self
    }

    /// Returns whether word markers will be echoed.
    #[must_use]
    pub const fn echo_words(&self) -> bool {
        self.echo_words
    }

    /// Validates the configuration and constructs an [`Extractor`].
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidOrder`] when an order list entry is not
    /// an integer and [`ConfigError::OrderOutOfRange`] when an order falls
    /// outside `0..=12`.
    ///
    /// # Examples
    /// ```
    /// use cepstra_core::{ConfigError, ExtractorBuilder, Family};
    ///
    /// let err = ExtractorBuilder::new()
    ///     .with_orders(Family::A, "1,x")
    ///     .build()
    ///     .expect_err("`x` is not an order");
    /// assert!(matches!(err, ConfigError::InvalidOrder { .. }));
    /// ```
    pub fn build(self) -> Result<Extractor, ConfigError> {
        let mut requested = Vec::new();
        for request in self.requests {
            match request {
                Request::Coefficient(id) => requested.push(id),
                Request::OrderList { family, raw } => {
                    requested.extend(parse_order_list(family, &raw)?);
                }
            }
        }
        Ok(Extractor::new(requested, self.frame_limit, self.echo_words))
    }
}

/// Parses a comma-separated order list into coefficient identifiers.
///
/// # Errors
/// Returns [`ConfigError::InvalidOrder`] for entries that are not integers,
/// including empty entries, and [`ConfigError::OrderOutOfRange`] for orders
/// outside `0..=12`.
///
/// # Examples
/// ```
/// use cepstra_core::{Family, parse_order_list};
///
/// let ids = parse_order_list(Family::D, "3, 0").expect("orders are valid");
/// let labels: Vec<String> = ids.iter().map(ToString::to_string).collect();
/// assert_eq!(labels, ["D03", "D00"]);
/// ```
pub fn parse_order_list(family: Family, raw: &str) -> Result<Vec<CoefficientId>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .map(|token| {
            let order = token
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidOrder {
                    family,
                    token: token.to_owned(),
                })?;
            CoefficientId::new(family, order)
        })
        .collect()
}
