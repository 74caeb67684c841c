use std::collections::BTreeMap;

use super::bands::{curve_offset, A_WEIGHTING, C_WEIGHTING, FREQUENCY_BANDS};
use super::model::Weighting;

// ---------------------------------------------------------------------------
// Frequency weighting
// ---------------------------------------------------------------------------

/// Apply a weighting curve to sparse band data.
///
/// `Z` passes the readings through unchanged. For `A` and `C`, each band
/// present in both the input and the curve yields `input + offset`; a band
/// missing from either side is dropped from the result rather than
/// zero-filled.
pub fn apply(data: &BTreeMap<String, f64>, weighting: Weighting) -> BTreeMap<String, f64> {
    let curve: &[(&str, f64)] = match weighting {
        Weighting::Z => return data.clone(),
        Weighting::A => &A_WEIGHTING,
        Weighting::C => &C_WEIGHTING,
    };

    FREQUENCY_BANDS
        .iter()
        .filter_map(|band| {
            let value = data.get(*band)?;
            let offset = curve_offset(curve, band)?;
            Some((band.to_string(), value + offset))
        })
        .collect()
}
