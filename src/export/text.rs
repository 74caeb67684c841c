use crate::data::bands::FREQUENCY_BANDS;
use crate::data::model::{Measurement, ProjectedSeries, Weighting};
use crate::data::weighting;

// ---------------------------------------------------------------------------
// Tab-delimited text export
// ---------------------------------------------------------------------------

/// Sentinel written for a band a measurement has no reading for.
const ABSENT: &str = "N/A";

/// Serialise the projected series to tab-delimited text, one column per
/// visible measurement. This is the single-export mode: the rows cover the
/// chart's configured range, exactly as projected.
pub fn series_tsv(series: &ProjectedSeries, measurements: &[Measurement]) -> String {
    let visible: Vec<&Measurement> = measurements.iter().filter(|m| m.visible).collect();

    let mut out = String::from("Frequency");
    for m in &visible {
        out.push('\t');
        out.push_str(&m.name);
    }
    out.push('\n');

    for point in series {
        out.push_str(&point.band);
        for m in &visible {
            out.push('\t');
            match point.values.get(&m.name).copied().flatten() {
                Some(value) => out.push_str(&format_level(value)),
                None => out.push_str(ABSENT),
            }
        }
        out.push('\n');
    }
    out
}

/// Serialise a single measurement across the entire band table, ignoring the
/// chart's configured range. This is the batch-export mode, one file per
/// measurement.
pub fn measurement_tsv(measurement: &Measurement, weighting: Weighting) -> String {
    let weighted = weighting::apply(&measurement.data, weighting);

    let mut out = format!("Frequency\t{}\n", measurement.name);
    for band in FREQUENCY_BANDS {
        out.push_str(band);
        out.push('\t');
        match weighted.get(band) {
            Some(value) => out.push_str(&format_level(*value)),
            None => out.push_str(ABSENT),
        }
        out.push('\n');
    }
    out
}

/// Format a level with a decimal comma, matching the input convention.
fn format_level(value: f64) -> String {
    value.to_string().replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ChartSettings;
    use crate::data::projection;
    use std::collections::BTreeMap;

    fn measurement(name: &str, visible: bool, entries: &[(&str, f64)]) -> Measurement {
        let data: BTreeMap<String, f64> = entries
            .iter()
            .map(|(band, value)| (band.to_string(), *value))
            .collect();
        Measurement {
            id: format!("test-{name}"),
            name: name.to_string(),
            original_name: name.to_string(),
            data,
            visible,
            color: "#22d3ee".to_string(),
            original_color: "#22d3ee".to_string(),
        }
    }

    #[test]
    fn series_export_uses_decimal_commas_and_tabs() {
        let measurements = vec![measurement("Site A", true, &[("1kHz", 45.2)])];
        let settings = ChartSettings {
            range_start: "1kHz".to_string(),
            range_end: "1kHz".to_string(),
            ..ChartSettings::default()
        };
        let series = projection::project(&measurements, Weighting::Z, &settings);
        assert_eq!(
            series_tsv(&series, &measurements),
            "Frequency\tSite A\n1kHz\t45,2\n"
        );
    }

    #[test]
    fn absent_values_become_the_sentinel() {
        let measurements = vec![
            measurement("Site A", true, &[("1kHz", 45.2)]),
            measurement("Site B", true, &[("2kHz", 40.0)]),
        ];
        let settings = ChartSettings {
            range_start: "1kHz".to_string(),
            range_end: "2kHz".to_string(),
            ..ChartSettings::default()
        };
        let series = projection::project(&measurements, Weighting::Z, &settings);
        let text = series_tsv(&series, &measurements);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Frequency\tSite A\tSite B");
        assert_eq!(lines[1], "1kHz\t45,2\tN/A");
        assert_eq!(lines.last().unwrap(), &"2kHz\tN/A\t40");
    }

    #[test]
    fn hidden_measurements_get_no_column() {
        let measurements = vec![
            measurement("Shown", true, &[("1kHz", 45.2)]),
            measurement("Hidden", false, &[("1kHz", 60.0)]),
        ];
        let settings = ChartSettings::default();
        let series = projection::project(&measurements, Weighting::Z, &settings);
        let text = series_tsv(&series, &measurements);
        assert!(text.starts_with("Frequency\tShown\n"));
        assert!(!text.contains("Hidden"));
    }

    #[test]
    fn measurement_export_spans_the_whole_band_table() {
        let m = measurement("Site A", true, &[("1kHz", 45.2)]);
        let text = measurement_tsv(&m, Weighting::Z);
        let lines: Vec<&str> = text.lines().collect();
        // Header plus one row per band, whatever range the chart shows.
        assert_eq!(lines.len(), 1 + FREQUENCY_BANDS.len());
        assert_eq!(lines[0], "Frequency\tSite A");
        assert!(lines.contains(&"1kHz\t45,2"));
        assert!(lines.contains(&"12,5Hz\tN/A"));
    }

    #[test]
    fn measurement_export_applies_the_weighting() {
        // C-weighting at 20Hz is -8.5 dB.
        let m = measurement("Site A", true, &[("20Hz", 80.0)]);
        let text = measurement_tsv(&m, Weighting::C);
        assert!(text.contains("20Hz\t71,5"), "{text}");
    }
}
