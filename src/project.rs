use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::color::{default_color, is_valid_hex};
use crate::data::model::{ChartSettings, Measurement, Weighting};

// ---------------------------------------------------------------------------
// Project snapshot codec
// ---------------------------------------------------------------------------

/// Producing-application identifier written into the metadata block.
const APP_ID: &str = "spl-analyzer";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("invalid project file: {0}")]
    InvalidProjectFile(&'static str),
    #[error("failed to parse project file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a project file restores: the measurement set, the weighting
/// mode and the chart configuration.
#[derive(Debug)]
pub struct ProjectState {
    pub measurements: Vec<Measurement>,
    pub weighting: Weighting,
    pub chart: ChartSettings,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    exported_at: String,
    app: String,
    version: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDocument<'a> {
    metadata: Metadata,
    chart_settings: &'a ChartSettings,
    weighting: Weighting,
    measurements: &'a [Measurement],
}

/// Serialise the full session to a single JSON document.
pub fn encode(
    measurements: &[Measurement],
    weighting: Weighting,
    chart: &ChartSettings,
) -> Result<String, ProjectError> {
    let document = ProjectDocument {
        metadata: Metadata {
            exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            app: APP_ID.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        chart_settings: chart,
        weighting,
        measurements,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Restore a session from a project document.
///
/// The top-level `measurements` and `chartSettings` keys are required.
/// Beyond that the document is read defensively: chart settings fall back
/// per field, the weighting falls back to `Z`, and each measurement is
/// rebuilt through [`restore_measurement`].
pub fn decode(text: &str) -> Result<ProjectState, ProjectError> {
    let root: Value = serde_json::from_str(text)?;
    let document = root
        .as_object()
        .ok_or(ProjectError::InvalidProjectFile("not a JSON object"))?;

    let measurement_values = document
        .get("measurements")
        .and_then(Value::as_array)
        .ok_or(ProjectError::InvalidProjectFile(
            "missing \"measurements\" list",
        ))?;
    let chart_value = document
        .get("chartSettings")
        .ok_or(ProjectError::InvalidProjectFile("missing \"chartSettings\""))?;

    let chart: ChartSettings = serde_json::from_value(chart_value.clone())?;
    let weighting = document
        .get("weighting")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    let restored_at = Utc::now().timestamp_millis();
    let measurements = measurement_values
        .iter()
        .enumerate()
        .map(|(ordinal, value)| restore_measurement(value, ordinal, restored_at))
        .collect();

    Ok(ProjectState {
        measurements,
        weighting,
        chart,
    })
}

/// Rebuild one measurement from its JSON value, substituting a fallback for
/// every field that is missing or unusable: a fresh id, an ordinal
/// placeholder name, an empty data map, hidden visibility, and palette
/// colours (`color` and `originalColor` fall back to each other before the
/// palette; a colour that does not parse as hex counts as missing).
fn restore_measurement(value: &Value, ordinal: usize, restored_at: i64) -> Measurement {
    let field = |key: &str| -> Option<&Value> { value.as_object().and_then(|o| o.get(key)) };
    let string_field = |key: &str| -> Option<String> {
        field(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let name = string_field("name").unwrap_or_else(|| format!("Measurement {}", ordinal + 1));
    let original_name = string_field("originalName").unwrap_or_else(|| name.clone());

    let data: BTreeMap<String, f64> = field("data")
        .and_then(Value::as_object)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|(band, v)| v.as_f64().map(|level| (band.clone(), level)))
                .collect()
        })
        .unwrap_or_default();

    let stored_color = string_field("color").filter(|c| is_valid_hex(c));
    let stored_original_color = string_field("originalColor").filter(|c| is_valid_hex(c));
    let palette_color = default_color(ordinal).to_string();
    let color = stored_color
        .clone()
        .or_else(|| stored_original_color.clone())
        .unwrap_or_else(|| palette_color.clone());
    let original_color = stored_original_color
        .or(stored_color)
        .unwrap_or(palette_color);

    Measurement {
        id: string_field("id").unwrap_or_else(|| format!("{restored_at}-{ordinal}")),
        name,
        original_name,
        data,
        visible: field("visible").and_then(Value::as_bool).unwrap_or(false),
        color,
        original_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_measurement() -> Measurement {
        let mut data = BTreeMap::new();
        data.insert("1kHz".to_string(), 45.2);
        data.insert("2kHz".to_string(), 40.0);
        Measurement {
            id: "1700000000-0".to_string(),
            name: "Renamed".to_string(),
            original_name: "Site A".to_string(),
            data,
            visible: true,
            color: "#facc15".to_string(),
            original_color: "#22d3ee".to_string(),
        }
    }

    #[test]
    fn round_trip_preserves_the_session() {
        let measurements = vec![sample_measurement()];
        let chart = ChartSettings {
            range_start: "1kHz".to_string(),
            range_end: "4kHz".to_string(),
            show_values: true,
            ..ChartSettings::default()
        };

        let text = encode(&measurements, Weighting::A, &chart).unwrap();
        let restored = decode(&text).unwrap();

        assert_eq!(restored.measurements, measurements);
        assert_eq!(restored.weighting, Weighting::A);
        assert_eq!(restored.chart, chart);
    }

    #[test]
    fn encoded_document_carries_a_metadata_block() {
        let text = encode(&[], Weighting::Z, &ChartSettings::default()).unwrap();
        let root: Value = serde_json::from_str(&text).unwrap();
        let metadata = &root["metadata"];
        assert!(metadata["exportedAt"].is_string());
        assert_eq!(metadata["app"], "spl-analyzer");
        assert!(metadata["version"].is_string());
    }

    #[test]
    fn missing_measurements_key_is_rejected() {
        let text = r#"{"chartSettings": {}}"#;
        assert!(matches!(
            decode(text),
            Err(ProjectError::InvalidProjectFile(_))
        ));
    }

    #[test]
    fn missing_chart_settings_key_is_rejected() {
        let text = r#"{"measurements": []}"#;
        assert!(matches!(
            decode(text),
            Err(ProjectError::InvalidProjectFile(_))
        ));
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert!(matches!(
            decode("[1, 2, 3]"),
            Err(ProjectError::InvalidProjectFile(_))
        ));
        assert!(matches!(decode("not json"), Err(ProjectError::Json(_))));
    }

    #[test]
    fn bare_measurements_get_fallbacks() {
        let text = r#"{"measurements": [{}], "chartSettings": {}}"#;
        let restored = decode(text).unwrap();
        let m = &restored.measurements[0];
        assert!(!m.id.is_empty());
        assert_eq!(m.name, "Measurement 1");
        assert_eq!(m.original_name, "Measurement 1");
        assert!(m.data.is_empty());
        assert!(!m.visible);
        assert_eq!(m.color, crate::color::DEFAULT_COLORS[0]);
        assert_eq!(m.original_color, crate::color::DEFAULT_COLORS[0]);
    }

    #[test]
    fn original_name_falls_back_to_name() {
        let text = r#"{"measurements": [{"name": "Kept"}], "chartSettings": {}}"#;
        let restored = decode(text).unwrap();
        assert_eq!(restored.measurements[0].original_name, "Kept");
    }

    #[test]
    fn colors_fall_back_to_each_other_before_the_palette() {
        let text = r##"{
            "measurements": [
                {"color": "#123456"},
                {"originalColor": "#abcdef"},
                {"color": "not-a-color"}
            ],
            "chartSettings": {}
        }"##;
        let restored = decode(text).unwrap();
        assert_eq!(restored.measurements[0].original_color, "#123456");
        assert_eq!(restored.measurements[1].color, "#abcdef");
        // An unparseable colour counts as missing.
        assert_eq!(restored.measurements[2].color, crate::color::DEFAULT_COLORS[2]);
    }

    #[test]
    fn missing_weighting_defaults_to_z() {
        let text = r#"{"measurements": [], "chartSettings": {}}"#;
        assert_eq!(decode(text).unwrap().weighting, Weighting::Z);

        let text = r#"{"measurements": [], "chartSettings": {}, "weighting": "B"}"#;
        assert_eq!(decode(text).unwrap().weighting, Weighting::Z);
    }

    #[test]
    fn chart_settings_fields_default_individually() {
        let text = r#"{"measurements": [], "chartSettings": {"showValues": true}}"#;
        let restored = decode(text).unwrap();
        assert!(restored.chart.show_values);
        assert_eq!(restored.chart.range_start, "12,5Hz");
        assert_eq!(restored.chart.background_color, "#1f2937");
    }
}
