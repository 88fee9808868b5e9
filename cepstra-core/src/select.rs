//! Coefficient selection for matched feature-vector lines.

use crate::{
    classify::FeatureVector,
    coefficient::CoefficientId,
    error::{ExtractError, Result},
};

/// Looks up the requested coefficients on `record` in request order.
///
/// Values are returned as the text they had on the input line. A coefficient
/// requested more than once appears at every requested position.
///
/// # Errors
/// Returns [`ExtractError::MissingField`] if a requested coefficient has no
/// field on the record.
///
/// # Examples
/// ```
/// use cepstra_core::{CoefficientId, Family, Line, classify, select};
///
/// let values: Vec<String> = (1..=39).map(|i| format!("-{i}.0")).collect();
/// let line = format!("0: {}", values.join(" "));
/// let Line::FeatureVector(record) = classify(&line) else {
///     panic!("line must classify as a feature vector");
/// };
/// let d02 = CoefficientId::new(Family::D, 2).expect("valid");
/// let selected = select(&record, &[d02, d02]).expect("all fields are present");
/// assert_eq!(selected, ["-15.0", "-15.0"]);
/// ```
pub fn select<'a>(record: &FeatureVector<'a>, requested: &[CoefficientId]) -> Result<Vec<&'a str>> {
    requested
        .iter()
        .map(|&id| {
            record.field(id).ok_or_else(|| ExtractError::MissingField {
                id,
                frame_id: record.frame_id().to_owned(),
            })
        })
        .collect()
}
