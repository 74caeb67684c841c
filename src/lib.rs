//! Measurement ingestion, weighting and export core for a sound pressure
//! level analyzer.
//!
//! The pipeline: CSV rows become [`Measurement`](data::model::Measurement)s,
//! an optional A/C weighting curve adjusts their band levels, the visible
//! range is projected into chart data, and the result is exported as
//! tab-delimited text, PNG/SVG captures or a per-measurement ZIP bundle.
//! The rendering layer is a collaborator behind the
//! [`ChartSurface`](export::surface::ChartSurface) trait; whole sessions
//! round-trip through a JSON project document.

pub mod color;
pub mod data;
pub mod export;
pub mod project;
pub mod state;
