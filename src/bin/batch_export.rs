use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use spl_analyzer::data::model::Weighting;
use spl_analyzer::export::batch::{self, ExportFormat};
use spl_analyzer::export::surface::HeadlessSurface;
use spl_analyzer::state::SessionState;

/// Headless batch export: reads a BZ-5503 CSV export and writes a ZIP with
/// one tab-delimited TXT file per measurement.
///
/// Usage: `batch_export <input.csv> [A|C|Z] [output.zip]`
fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.len() > 3 {
        bail!("usage: batch_export <input.csv> [A|C|Z] [output.zip]");
    }

    let input = PathBuf::from(&args[0]);
    let weighting: Weighting = match args.get(1) {
        Some(raw) => raw.parse().map_err(anyhow::Error::msg)?,
        None => Weighting::Z,
    };

    let mut state = SessionState::default();
    state
        .load_csv_path(&input)
        .with_context(|| format!("loading {}", input.display()))?;
    state.set_weighting(weighting);
    // Every measurement gets its own file either way; visibility only decides
    // what a chart would show.
    state.set_all_visible(true);

    let mut surface = HeadlessSurface::default();
    let export = batch::export_all(
        &mut state.measurements,
        state.weighting,
        &state.chart,
        ExportFormat::Txt,
        &mut surface,
    )
    .context("bundling TXT files")?;

    let output = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&export.file_name));
    std::fs::write(&output, &export.bytes)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Wrote {} measurements ({}-weighted) to {}",
        state.measurements.len(),
        weighting,
        output.display()
    );
    Ok(())
}
