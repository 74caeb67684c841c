/// Export layer: single-file exporters and the batch orchestrator.
///
/// Architecture:
/// ```text
///   ProjectedSeries / Measurement
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │   text    │   │  image    │  image captures go through ChartSurface
///   └──────────┘   └──────────┘
///        │              │
///        └──────┬───────┘
///               ▼
///          ┌──────────┐
///          │  batch    │  one file per measurement → ZIP
///          └──────────┘
/// ```

pub mod batch;
pub mod image;
pub mod surface;
pub mod text;
