//! Coefficient identifiers and the canonical field layout of a report line.
//!
//! A feature-vector line carries thirteen orders for each of three families.
//! Within a family block the order-zero coefficient comes last, so field
//! identity is positional and resolved through [`CANONICAL_FIELDS`].

use std::fmt;

use crate::error::ConfigError;

/// Number of coefficient orders carried per family.
pub const ORDERS_PER_FAMILY: usize = 13;

/// Highest accepted coefficient order.
pub const MAX_ORDER: u8 = 12;

/// Number of numeric fields on a feature-vector line.
pub const FIELD_COUNT: usize = ORDERS_PER_FAMILY * Family::ALL.len();

/// Coefficient family label.
///
/// The labels stand for the static, delta and delta-delta coefficients of
/// the upstream analysis; the converter treats them as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Static cepstral coefficients.
    C,
    /// Delta coefficients.
    D,
    /// Delta-delta coefficients.
    A,
}

impl Family {
    /// All families in the order their blocks appear on a report line.
    pub const ALL: [Self; 3] = [Self::C, Self::D, Self::A];

    /// Returns the single-letter label used on the command line.
    ///
    /// # Examples
    /// ```
    /// use cepstra_core::Family;
    ///
    /// assert_eq!(Family::D.label(), "D");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::D => "D",
            Self::A => "A",
        }
    }

    /// Resolves a command-line key (`C`, `D` or `A`) to its family.
    ///
    /// # Examples
    /// ```
    /// use cepstra_core::Family;
    ///
    /// assert_eq!(Family::from_label("A"), Some(Family::A));
    /// assert_eq!(Family::from_label("c"), None);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|family| family.label() == label)
    }

    const fn block(self) -> usize {
        match self {
            Self::C => 0,
            Self::D => 1,
            Self::A => 2,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one coefficient column by family and order.
///
/// # Examples
/// ```
/// use cepstra_core::{CoefficientId, Family};
///
/// let id = CoefficientId::new(Family::C, 7).expect("order 7 is valid");
/// assert_eq!(id.to_string(), "C07");
/// assert!(CoefficientId::new(Family::C, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoefficientId {
    family: Family,
    order: u8,
}

impl CoefficientId {
    /// Creates an identifier, rejecting orders outside `0..=12`.
    ///
    /// # Errors
    /// Returns [`ConfigError::OrderOutOfRange`] when `order` is negative or
    /// greater than [`MAX_ORDER`].
    pub fn new(family: Family, order: i64) -> Result<Self, ConfigError> {
        u8::try_from(order)
            .ok()
            .filter(|order| *order <= MAX_ORDER)
            .map(|order| Self { family, order })
            .ok_or(ConfigError::OrderOutOfRange { family, order })
    }

    /// Returns the family of the coefficient.
    #[must_use]
    pub const fn family(self) -> Family {
        self.family
    }

    /// Returns the order of the coefficient.
    #[must_use]
    pub const fn order(self) -> u8 {
        self.order
    }

    /// Position of this coefficient among the fields of a feature-vector
    /// line.
    ///
    /// # Examples
    /// ```
    /// use cepstra_core::{CoefficientId, Family};
    ///
    /// let c01 = CoefficientId::new(Family::C, 1).expect("valid");
    /// let c00 = CoefficientId::new(Family::C, 0).expect("valid");
    /// let d01 = CoefficientId::new(Family::D, 1).expect("valid");
    /// assert_eq!(c01.canonical_index(), 0);
    /// assert_eq!(c00.canonical_index(), 12);
    /// assert_eq!(d01.canonical_index(), 13);
    /// ```
    #[must_use]
    pub const fn canonical_index(self) -> usize {
        let slot = if self.order == 0 {
            ORDERS_PER_FAMILY - 1
        } else {
            self.order as usize - 1
        };
        self.family.block() * ORDERS_PER_FAMILY + slot
    }
}

impl fmt::Display for CoefficientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.family, self.order)
    }
}

/// Field layout of a feature-vector line: C01..C12, C00, D01..D12, D00,
/// A01..A12, A00.
pub const CANONICAL_FIELDS: [CoefficientId; FIELD_COUNT] = canonical_fields();

const fn canonical_fields() -> [CoefficientId; FIELD_COUNT] {
    let mut fields = [CoefficientId {
        family: Family::C,
        order: 0,
    }; FIELD_COUNT];
    let mut block = 0;
    while block < Family::ALL.len() {
        let mut slot = 0;
        let mut order: u8 = 1;
        while slot < ORDERS_PER_FAMILY {
            fields[block * ORDERS_PER_FAMILY + slot] = CoefficientId {
                family: Family::ALL[block],
                // order zero closes each family block
                order: if order > MAX_ORDER { 0 } else { order },
            };
            slot += 1;
            order += 1;
        }
        block += 1;
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::negative(-1)]
    #[case::just_above(13)]
    #[case::far_above(300)]
    fn new_rejects_out_of_range_orders(#[case] order: i64) {
        for family in Family::ALL {
            let err = CoefficientId::new(family, order).expect_err("order must be rejected");
            assert_eq!(err, ConfigError::OrderOutOfRange { family, order });
        }
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(12)]
    fn new_accepts_orders_in_range(#[case] order: i64) {
        let id = CoefficientId::new(Family::A, order).expect("order must be accepted");
        assert_eq!(i64::from(id.order()), order);
        assert_eq!(id.family(), Family::A);
    }

    #[test]
    fn canonical_table_places_order_zero_last_in_each_block() {
        let labels: Vec<String> = CANONICAL_FIELDS.iter().map(ToString::to_string).collect();
        assert_eq!(labels.first().map(String::as_str), Some("C01"));
        assert_eq!(labels.get(11).map(String::as_str), Some("C12"));
        assert_eq!(labels.get(12).map(String::as_str), Some("C00"));
        assert_eq!(labels.get(13).map(String::as_str), Some("D01"));
        assert_eq!(labels.get(25).map(String::as_str), Some("D00"));
        assert_eq!(labels.get(26).map(String::as_str), Some("A01"));
        assert_eq!(labels.last().map(String::as_str), Some("A00"));
    }

    #[test]
    fn canonical_index_agrees_with_table() {
        for (index, id) in CANONICAL_FIELDS.iter().enumerate() {
            assert_eq!(id.canonical_index(), index, "{id} is misplaced");
        }
    }

    #[test]
    fn from_label_round_trips_every_family() {
        for family in Family::ALL {
            assert_eq!(Family::from_label(family.label()), Some(family));
        }
        assert_eq!(Family::from_label("X"), None);
    }
}
