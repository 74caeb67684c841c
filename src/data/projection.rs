use std::collections::BTreeMap;

use super::bands::{band_index, FREQUENCY_BANDS};
use super::model::{ChartSettings, Measurement, ProjectedSeries, SeriesPoint, Weighting};
use super::weighting;

// ---------------------------------------------------------------------------
// Chart data projection
// ---------------------------------------------------------------------------

/// Project the visible measurements onto the configured frequency range.
///
/// The range bounds are resolved against the canonical band order and the
/// inclusive slice between them is emitted in that order. A start label the
/// table does not know clamps to the first band, an unknown end label clamps
/// to the last; a range whose start is ordered after its end yields an empty
/// series.
///
/// Pure: inputs are never mutated and the series is recomputed on every call.
pub fn project(
    measurements: &[Measurement],
    weighting: Weighting,
    settings: &ChartSettings,
) -> ProjectedSeries {
    let start = band_index(&settings.range_start).unwrap_or(0);
    let end = band_index(&settings.range_end).unwrap_or(FREQUENCY_BANDS.len() - 1);
    if start > end {
        return Vec::new();
    }

    // Weight each visible measurement once, not once per band.
    let weighted: Vec<(&str, BTreeMap<String, f64>)> = measurements
        .iter()
        .filter(|m| m.visible)
        .map(|m| (m.name.as_str(), weighting::apply(&m.data, weighting)))
        .collect();

    FREQUENCY_BANDS[start..=end]
        .iter()
        .map(|band| {
            let values = weighted
                .iter()
                .map(|(name, data)| (name.to_string(), data.get(*band).copied()))
                .collect();
            SeriesPoint {
                band: band.to_string(),
                values,
            }
        })
        .collect()
}
