use std::thread;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::ImageFormat;
use thiserror::Error;

use super::surface::{CaptureError, CaptureOptions, ChartSurface};

// ---------------------------------------------------------------------------
// Image export: capture normalisation and retry
// ---------------------------------------------------------------------------

/// Captures per PNG export before the item is given up on.
const MAX_CAPTURE_ATTEMPTS: u32 = 2;

/// Pause before retrying a failed capture.
const CAPTURE_RETRY_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error("capture did not yield a base64 PNG data URI")]
    InvalidDataUrl,
    #[error("failed to decode captured PNG data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("captured data is not a valid PNG: {0}")]
    Png(#[from] image::ImageError),
    #[error("SVG content does not start with \"<\" after normalisation")]
    MalformedSvg,
}

/// Capture the surface as raw PNG bytes.
///
/// The surface yields a base64 data URI; the payload is decoded and checked
/// to really be a PNG before it is handed on. A failed capture is retried
/// once after a short delay. The resize affordance is suppressed for the
/// duration and restored whether or not the capture succeeds.
pub fn export_png(
    surface: &mut dyn ChartSurface,
    options: &CaptureOptions,
) -> Result<Vec<u8>, ExportError> {
    with_resize_suppressed(surface, |surface| {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match capture_png_bytes(surface, options) {
                Ok(bytes) => return Ok(bytes),
                Err(err) if attempt < MAX_CAPTURE_ATTEMPTS => {
                    log::warn!("PNG capture attempt {attempt} failed: {err}; retrying");
                    thread::sleep(CAPTURE_RETRY_DELAY);
                }
                Err(err) => return Err(err),
            }
        }
    })
}

/// Capture the surface as normalised SVG markup.
pub fn export_svg(
    surface: &mut dyn ChartSurface,
    options: &CaptureOptions,
) -> Result<String, ExportError> {
    with_resize_suppressed(surface, |surface| {
        let raw = surface.capture_svg(options)?;
        normalize_svg(&raw)
    })
}

fn with_resize_suppressed<T>(
    surface: &mut dyn ChartSurface,
    capture: impl FnOnce(&mut dyn ChartSurface) -> Result<T, ExportError>,
) -> Result<T, ExportError> {
    let was_enabled = surface.resize_enabled();
    surface.set_resize_enabled(false);
    let result = capture(surface);
    surface.set_resize_enabled(was_enabled);
    result
}

fn capture_png_bytes(
    surface: &mut dyn ChartSurface,
    options: &CaptureOptions,
) -> Result<Vec<u8>, ExportError> {
    let data_url = surface.capture_png(options)?;
    let payload = data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .filter(|(header, _)| header.contains(";base64"))
        .map(|(_, payload)| payload)
        .ok_or(ExportError::InvalidDataUrl)?;
    let bytes = BASE64.decode(payload.as_bytes())?;
    image::load_from_memory_with_format(&bytes, ImageFormat::Png)?;
    Ok(bytes)
}

/// Normalise an SVG capture to raw markup.
///
/// Depending on the environment the capture arrives as raw markup, a
/// `data:` URI with a percent-encoded payload, or a bare percent-encoded
/// string. All three are reduced to markup; a leading byte-order mark and
/// whitespace are stripped.
pub fn normalize_svg(raw: &str) -> Result<String, ExportError> {
    let mut svg = raw.to_string();

    if let Some(rest) = svg.strip_prefix("data:") {
        let payload = rest.split_once(',').map(|(_, p)| p).unwrap_or("");
        svg = urlencoding::decode(payload)
            .map_err(|_| ExportError::MalformedSvg)?
            .into_owned();
    }

    if !svg.trim_start().starts_with('<') {
        if let Ok(decoded) = urlencoding::decode(&svg) {
            if decoded.trim_start().starts_with('<') {
                svg = decoded.into_owned();
            }
        }
    }

    let svg = svg.trim_start_matches('\u{feff}').trim_start();
    if !svg.starts_with('<') {
        return Err(ExportError::MalformedSvg);
    }
    Ok(svg.to_string())
}
