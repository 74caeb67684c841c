use std::io::{Cursor, Write};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::image;
use super::surface::{CaptureOptions, ChartSurface};
use super::text;
use crate::data::model::{ChartSettings, Measurement, Weighting};
use crate::data::projection;

// ---------------------------------------------------------------------------
// Batch export: one file per measurement, bundled into a ZIP
// ---------------------------------------------------------------------------

/// Wait after toggling a measurement exclusively visible. The surface
/// renders asynchronously and the capture must observe the new view.
const SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
    Txt,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Txt => "txt",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            "txt" => Ok(ExportFormat::Txt),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to generate ZIP file: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed to write archive entry: {0}")]
    Io(#[from] std::io::Error),
}

/// The finished archive plus the names of measurements whose image export
/// failed and was skipped.
#[derive(Debug)]
pub struct BatchExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub skipped: Vec<String>,
}

/// Export every measurement as its own file and bundle the results.
///
/// Measurements are processed strictly in order, each made exclusively
/// visible on the surface while its file is produced; the surface shows one
/// view at a time, so the toggle/settle/capture sequence is what keeps the
/// captures from observing each other. Image failures skip the item and the
/// batch continues; a ZIP failure is fatal. Either way every measurement's
/// visibility is restored to its pre-batch state before this returns.
pub fn export_all(
    measurements: &mut [Measurement],
    weighting: Weighting,
    settings: &ChartSettings,
    format: ExportFormat,
    surface: &mut dyn ChartSurface,
) -> Result<BatchExport, ArchiveError> {
    let original_visibility: Vec<bool> = measurements.iter().map(|m| m.visible).collect();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut skipped = Vec::new();

    let result = run_items(
        &mut writer,
        measurements,
        weighting,
        settings,
        format,
        surface,
        &mut skipped,
    );

    for (m, visible) in measurements.iter_mut().zip(original_visibility) {
        m.visible = visible;
    }
    result?;

    let bytes = writer.finish()?.into_inner();
    Ok(BatchExport {
        file_name: format!("sound_level_export_{}.zip", format.extension()),
        bytes,
        skipped,
    })
}

fn run_items(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    measurements: &mut [Measurement],
    weighting: Weighting,
    settings: &ChartSettings,
    format: ExportFormat,
    surface: &mut dyn ChartSurface,
    skipped: &mut Vec<String>,
) -> Result<(), ArchiveError> {
    let zip_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let total = measurements.len();

    for index in 0..total {
        for (i, m) in measurements.iter_mut().enumerate() {
            m.visible = i == index;
        }
        let name = measurements[index].name.clone();
        let entry_name = format!("{}.{}", sanitize_name(&name), format.extension());
        log::info!("Processing measurement {} of {total}", index + 1);

        match format {
            ExportFormat::Png | ExportFormat::Svg => {
                let series = projection::project(measurements, weighting, settings);
                surface.present(&series, measurements, settings);
                thread::sleep(SETTLE_DELAY);

                let options = CaptureOptions::for_settings(settings);
                let capture = match format {
                    ExportFormat::Png => image::export_png(surface, &options),
                    _ => image::export_svg(surface, &options).map(String::into_bytes),
                };
                match capture {
                    Ok(bytes) => {
                        writer.start_file(entry_name.as_str(), zip_options)?;
                        writer.write_all(&bytes)?;
                    }
                    Err(err) => {
                        log::error!("failed to export {entry_name}: {err}; skipping");
                        skipped.push(name);
                    }
                }
            }
            ExportFormat::Txt => {
                thread::sleep(SETTLE_DELAY);
                let content = text::measurement_tsv(&measurements[index], weighting);
                writer.start_file(entry_name.as_str(), zip_options)?;
                writer.write_all(content.as_bytes())?;
            }
        }
    }
    Ok(())
}

/// File-system safe entry name: ASCII letters and digits kept (lower-cased),
/// everything else replaced.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
