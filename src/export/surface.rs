use thiserror::Error;

use crate::data::model::{ChartSettings, Measurement, ProjectedSeries};

// ---------------------------------------------------------------------------
// Rendering surface collaborator
// ---------------------------------------------------------------------------

/// A capture attempt the surface could not complete. Treated as transient:
/// PNG captures are retried once before the item is given up on.
#[derive(Debug, Error)]
#[error("image capture failed: {0}")]
pub struct CaptureError(pub String);

/// Options forwarded to the surface with each capture request.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    pub quality: f32,
    /// Fill colour behind the chart, a `#rrggbb` hex string.
    pub background_color: String,
}

impl CaptureOptions {
    pub fn for_settings(settings: &ChartSettings) -> Self {
        Self {
            quality: 0.95,
            background_color: settings.background_color.clone(),
        }
    }
}

/// The rendering layer, seen from the export pipeline.
///
/// The surface is a singleton mutable resource: it shows one view at a time
/// and updates asynchronously after [`present`](ChartSurface::present), so
/// callers wait for the view to settle before capturing. Captures come back
/// in whatever shape the environment produces (a base64 data URI for PNG;
/// raw markup, a data URI or a percent-encoded string for SVG) and are
/// normalised by [`export::image`](crate::export::image).
pub trait ChartSurface {
    /// Push the current view to the surface.
    fn present(
        &mut self,
        series: &ProjectedSeries,
        measurements: &[Measurement],
        settings: &ChartSettings,
    );

    /// Whether the interactive resize affordance is currently enabled.
    fn resize_enabled(&self) -> bool;

    /// Enable or disable the interactive resize affordance. Disabled while a
    /// capture is in progress so the handle does not end up in the image.
    fn set_resize_enabled(&mut self, enabled: bool);

    /// Capture the current view as a PNG data URI
    /// (`data:image/png;base64,…`).
    fn capture_png(&mut self, options: &CaptureOptions) -> Result<String, CaptureError>;

    /// Capture the current view as SVG text.
    fn capture_svg(&mut self, options: &CaptureOptions) -> Result<String, CaptureError>;
}

/// Surface for flows with no rendering layer, such as the batch TXT export
/// driven from the command line. Presenting is a no-op and any capture
/// fails.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    resize_enabled: bool,
}

impl ChartSurface for HeadlessSurface {
    fn present(
        &mut self,
        _series: &ProjectedSeries,
        _measurements: &[Measurement],
        _settings: &ChartSettings,
    ) {
    }

    fn resize_enabled(&self) -> bool {
        self.resize_enabled
    }

    fn set_resize_enabled(&mut self, enabled: bool) {
        self.resize_enabled = enabled;
    }

    fn capture_png(&mut self, _options: &CaptureOptions) -> Result<String, CaptureError> {
        Err(CaptureError("no rendering surface attached".to_string()))
    }

    fn capture_svg(&mut self, _options: &CaptureOptions) -> Result<String, CaptureError> {
        Err(CaptureError("no rendering surface attached".to_string()))
    }
}
