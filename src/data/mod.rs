/// Data layer: band tables, ingestion, weighting and projection.
///
/// Architecture:
/// ```text
///       .csv
///        │
///        ▼
///   ┌──────────┐
///   │  ingest   │  parse rows → Vec<Measurement>
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ Measurement   │  sparse band → level map
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  weighting    │  add A/C curve offsets (Z = identity)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  projection   │  window onto the visible range → ProjectedSeries
///   └──────────────┘
/// ```

pub mod bands;
pub mod ingest;
pub mod model;
pub mod projection;
pub mod weighting;
