/// Data layer: core types, loading, option lists, filtering and projection.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, drop incomplete + duplicate rows → MovieDataset
///   └──────────┘
///        │
///        ├──────────────► options     distinct values per column → dropdowns
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState (substring, AND) → Subset
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ projection  │  two axis columns + titles + years → Projection
///   └────────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod options;
pub mod projection;
