/// Data layer: the loaded indicator table and the queries over it.
///
/// Architecture:
/// ```text
///  WDIData.csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → IndicatorDataset (loaded once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐     ┌──────────┐
///   │  table    │ ──▶ │  filter   │     │  series   │
///   └──────────┘     └──────────┘     └──────────┘
///   rows + Data       indicators ≥     tagged series
///   Present in %      min percent      + plot layout
///        │                 │                 │
///        └───────────── cache ───────────────┘
///                 memoized by arguments
/// ```

pub mod cache;
pub mod export;
pub mod filter;
pub mod insight;
pub mod loader;
pub mod model;
pub mod series;
pub mod table;
