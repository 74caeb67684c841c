use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Weighting – which frequency weighting curve is applied
// ---------------------------------------------------------------------------

/// The selected frequency weighting. `Z` applies no correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weighting {
    A,
    C,
    #[default]
    Z,
}

impl std::fmt::Display for Weighting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weighting::A => write!(f, "A"),
            Weighting::C => write!(f, "C"),
            Weighting::Z => write!(f, "Z"),
        }
    }
}

impl std::str::FromStr for Weighting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Weighting::A),
            "C" | "c" => Ok(Weighting::C),
            "Z" | "z" => Ok(Weighting::Z),
            other => Err(format!("unknown weighting '{other}' (expected A, C or Z)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Measurement – one row of imported data
// ---------------------------------------------------------------------------

/// A single measurement (one data row of the source CSV).
///
/// `name` and `color` are user-editable; `original_name` and `original_color`
/// keep the values assigned at import time so an edit can be reverted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Process-unique id, stable for the lifetime of the loaded set.
    pub id: String,
    pub name: String,
    pub original_name: String,
    /// Sparse band label → measured level in dB. Bands without a reading are
    /// absent, never zero-filled.
    pub data: BTreeMap<String, f64>,
    /// Whether this measurement participates in the current chart/export view.
    pub visible: bool,
    /// Display colour as a `#rrggbb` hex string.
    pub color: String,
    pub original_color: String,
}

// ---------------------------------------------------------------------------
// ChartSettings – chart configuration shared with the rendering collaborator
// ---------------------------------------------------------------------------

/// Chart configuration: axis labels, the visible frequency sub-range and the
/// display colours. The range bounds are band labels, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSettings {
    #[serde(default = "default_y_axis_label")]
    pub y_axis_label: String,
    #[serde(default = "default_x_axis_label")]
    pub x_axis_label: String,
    /// Draw the value of each bar next to it.
    #[serde(default)]
    pub show_values: bool,
    // Wire names kept from project files written by earlier releases, where
    // the range was attached to the value axis.
    #[serde(rename = "yAxisStart", default = "default_range_start")]
    pub range_start: String,
    #[serde(rename = "yAxisEnd", default = "default_range_end")]
    pub range_end: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_true")]
    pub show_x_axis_label: bool,
    #[serde(default = "default_true")]
    pub show_y_axis_label: bool,
}

fn default_y_axis_label() -> String {
    "Sound Pressure Level (dB)".to_string()
}

fn default_x_axis_label() -> String {
    "Frequency (Hz)".to_string()
}

fn default_range_start() -> String {
    crate::data::bands::FREQUENCY_BANDS[0].to_string()
}

fn default_range_end() -> String {
    crate::data::bands::FREQUENCY_BANDS[crate::data::bands::FREQUENCY_BANDS.len() - 1].to_string()
}

fn default_background_color() -> String {
    "#1f2937".to_string()
}

fn default_grid_color() -> String {
    "#4b5563".to_string()
}

fn default_text_color() -> String {
    "#d1d5db".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            y_axis_label: default_y_axis_label(),
            x_axis_label: default_x_axis_label(),
            show_values: false,
            range_start: default_range_start(),
            range_end: default_range_end(),
            background_color: default_background_color(),
            grid_color: default_grid_color(),
            text_color: default_text_color(),
            show_x_axis_label: true,
            show_y_axis_label: true,
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectedSeries – derived chart data
// ---------------------------------------------------------------------------

/// One band of the projected chart data: the band label plus the weighted
/// value of every visible measurement, keyed by the measurement's current
/// name. `None` marks a band the measurement has no reading for; the key is
/// present either way.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub band: String,
    pub values: BTreeMap<String, Option<f64>>,
}

/// Ordered chart data, one point per band in the visible range. Always
/// recomputed from the measurement set, the weighting and the chart settings;
/// never stored.
pub type ProjectedSeries = Vec<SeriesPoint>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_covers_the_whole_band_table() {
        let settings = ChartSettings::default();
        assert_eq!(settings.range_start, "12,5Hz");
        assert_eq!(settings.range_end, "20kHz");
    }

    #[test]
    fn chart_settings_deserialize_with_historical_wire_names() {
        let json = r#"{"yAxisStart": "1kHz", "yAxisEnd": "2kHz"}"#;
        let settings: ChartSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.range_start, "1kHz");
        assert_eq!(settings.range_end, "2kHz");
        // Everything not present falls back to its default.
        assert_eq!(settings.y_axis_label, "Sound Pressure Level (dB)");
        assert!(settings.show_y_axis_label);
    }

    #[test]
    fn weighting_round_trips_through_display_and_from_str() {
        for w in [Weighting::A, Weighting::C, Weighting::Z] {
            assert_eq!(w.to_string().parse::<Weighting>().unwrap(), w);
        }
        assert!("B".parse::<Weighting>().is_err());
    }
}
