/// Data layer: core types, loading, cleaning, filtering and export.
///
/// Architecture:
/// ```text
///      .xlsx
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  first sheet → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean   │  required fields, dates, Name_City → RequestCollection
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  date interval + countries → filtered indices
///   └──────────┘
///        │
///        ├──► metrics   (summary tiles)
///        └──► export    (CSV)
/// ```

pub mod clean;
pub mod export;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
