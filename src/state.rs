use std::io;
use std::path::Path;

use crate::data::ingest::{self, IngestError};
use crate::data::model::{ChartSettings, Measurement, ProjectedSeries, Weighting};
use crate::data::projection;
use crate::project::{self, ProjectError, ProjectState};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The full session, independent of any view: the loaded measurements, the
/// selected weighting and the chart configuration. The view layer mutates it
/// through these methods and re-reads [`projected_series`](Self::projected_series)
/// after every change.
#[derive(Debug, Default)]
pub struct SessionState {
    pub measurements: Vec<Measurement>,
    pub weighting: Weighting,
    pub chart: ChartSettings,
}

impl SessionState {
    /// Replace the measurement set with the rows of a CSV file.
    pub fn load_csv<R: io::Read>(&mut self, reader: R) -> Result<(), IngestError> {
        let measurements = ingest::ingest_reader(reader)?;
        log::info!("Loaded {} measurements", measurements.len());
        self.measurements = measurements;
        Ok(())
    }

    /// Like [`load_csv`](Self::load_csv), reading from a file on disk.
    pub fn load_csv_path(&mut self, path: &Path) -> Result<(), IngestError> {
        let measurements = ingest::ingest_path(path)?;
        log::info!(
            "Loaded {} measurements from {}",
            measurements.len(),
            path.display()
        );
        self.measurements = measurements;
        Ok(())
    }

    /// Switch the weighting and retitle the value axis to match.
    pub fn set_weighting(&mut self, weighting: Weighting) {
        self.weighting = weighting;
        self.chart.y_axis_label = format!("Sound Pressure Level (dB{weighting})");
    }

    /// Toggle a single measurement's chart visibility.
    pub fn toggle_visible(&mut self, id: &str) {
        if let Some(m) = self.measurements.iter_mut().find(|m| m.id == id) {
            m.visible = !m.visible;
        }
    }

    /// Show or hide every measurement at once (the master toggle).
    pub fn set_all_visible(&mut self, visible: bool) {
        for m in &mut self.measurements {
            m.visible = visible;
        }
    }

    /// Whether every measurement is currently visible.
    pub fn all_visible(&self) -> bool {
        !self.measurements.is_empty() && self.measurements.iter().all(|m| m.visible)
    }

    /// Rename a measurement. The original name stays available for
    /// [`revert`](Self::revert).
    pub fn rename(&mut self, id: &str, name: String) {
        if let Some(m) = self.measurements.iter_mut().find(|m| m.id == id) {
            m.name = name;
        }
    }

    /// Recolour a measurement. The original colour stays available for
    /// [`revert`](Self::revert).
    pub fn set_color(&mut self, id: &str, color: String) {
        if let Some(m) = self.measurements.iter_mut().find(|m| m.id == id) {
            m.color = color;
        }
    }

    /// Restore a measurement's import-time name and colour.
    pub fn revert(&mut self, id: &str) {
        if let Some(m) = self.measurements.iter_mut().find(|m| m.id == id) {
            m.name = m.original_name.clone();
            m.color = m.original_color.clone();
        }
    }

    /// Project the current state onto the configured frequency range.
    /// Derived data only; call again after any change.
    pub fn projected_series(&self) -> ProjectedSeries {
        projection::project(&self.measurements, self.weighting, &self.chart)
    }

    /// Serialise the session to a project document.
    pub fn to_project(&self) -> Result<String, ProjectError> {
        project::encode(&self.measurements, self.weighting, &self.chart)
    }

    /// Replace the session with the contents of a project document.
    pub fn apply_project(&mut self, text: &str) -> Result<(), ProjectError> {
        let ProjectState {
            measurements,
            weighting,
            chart,
        } = project::decode(text)?;
        log::info!("Restored {} measurements from project", measurements.len());
        self.measurements = measurements;
        self.weighting = weighting;
        self.chart = chart;
        Ok(())
    }

    /// Whether leaving the session now would discard loaded data. The view
    /// asks this before the session is abandoned.
    pub fn has_unexported_data(&self) -> bool {
        !self.measurements.is_empty()
    }
}
