use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::bands::band_index;
use super::model::Measurement;
use crate::color::default_color;

// ---------------------------------------------------------------------------
// CSV ingestion
// ---------------------------------------------------------------------------

/// Header prefix marking a sound level column.
const LEVEL_COLUMN_PREFIX: &str = "LZeq";

/// Header column carrying the measurement name.
const NAME_COLUMN: &str = "Project Name";

/// Frequency token embedded in a level column header, e.g. `12.5kHz` inside
/// `LZeq 12.5kHz (dB)`.
static FREQUENCY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+([.,]\d+)?[kK]?Hz").expect("frequency token pattern"));

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV file is empty or invalid")]
    EmptyInput,
    #[error("no \"LZeq\" columns found in the CSV file")]
    NoMatchingColumns,
    #[error("failed to parse CSV file: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read CSV file: {0}")]
    Io(#[from] io::Error),
}

/// Parse measurements from CSV text read from `reader`.
///
/// A header row is required. Every column whose header starts with `LZeq`
/// and embeds a known frequency band token contributes one band reading per
/// row; all other columns are ignored apart from the optional `Project Name`
/// column, which names the measurement.
pub fn ingest_reader<R: io::Read>(reader: R) -> Result<Vec<Measurement>, IngestError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let rows = csv_reader
        .records()
        .collect::<Result<Vec<_>, csv::Error>>()?;
    if rows.is_empty() {
        return Err(IngestError::EmptyInput);
    }

    let level_columns: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with(LEVEL_COLUMN_PREFIX))
        .collect();
    if level_columns.is_empty() {
        return Err(IngestError::NoMatchingColumns);
    }

    // Column index → band label, dropping headers whose frequency token does
    // not normalise to a known band.
    let band_columns: Vec<(usize, String)> = level_columns
        .iter()
        .filter_map(|&(idx, header)| {
            let band = extract_band_label(header)?;
            Some((idx, band))
        })
        .collect();

    let name_column = headers.iter().position(|h| h == NAME_COLUMN);
    let ingested_at = chrono::Utc::now().timestamp_millis();

    let measurements = rows
        .iter()
        .enumerate()
        .map(|(ordinal, record)| {
            let mut data = BTreeMap::new();
            for (idx, band) in &band_columns {
                if let Some(value) = record.get(*idx).and_then(parse_level) {
                    data.insert(band.clone(), value);
                }
            }

            let name = name_column
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Measurement {}", ordinal + 1));

            let color = default_color(ordinal).to_string();
            Measurement {
                id: format!("{ingested_at}-{ordinal}"),
                original_name: name.clone(),
                name,
                data,
                visible: false,
                original_color: color.clone(),
                color,
            }
        })
        .collect();

    Ok(measurements)
}

/// Convenience wrapper over [`ingest_reader`] for a file on disk.
pub fn ingest_path(path: &Path) -> Result<Vec<Measurement>, IngestError> {
    let file = std::fs::File::open(path)?;
    ingest_reader(file)
}

/// Extract the band label from a level column header.
///
/// The embedded token is normalised to the table's spelling (`K` → `k`,
/// decimal point → comma); a token that still does not match a known band
/// disqualifies the column.
fn extract_band_label(header: &str) -> Option<String> {
    let token = FREQUENCY_TOKEN.find(header)?.as_str();
    let band = token.replace('K', "k").replace('.', ",");
    band_index(&band).map(|_| band)
}

/// Parse a cell as a decimal-comma level. Empty or malformed cells yield
/// `None`, leaving the band absent.
fn parse_level(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.replace(',', ".").parse::<f64>().ok()
}
