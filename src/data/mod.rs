/// Data layer: core types, loading, caching and filtering.
///
/// Architecture:
/// ```text
///  housing.csv / .json / .parquet          (missing file)
///        │                                      │
///        ▼                                      ▼
///   ┌──────────┐                         ┌────────────┐
///   │  loader   │  parse file            │ synthetic   │  seeded sample
///   └──────────┘                         └────────────┘
///        │                                      │
///        └──────────────┬───────────────────────┘
///                       ▼
///                ┌────────────┐
///                │   cache     │  once per session → Arc<HousingDataset>
///                └────────────┘
///                       │
///                       ▼
///                ┌────────────┐
///                │   filter    │  income → price → location → indices
///                └────────────┘
/// ```

pub mod cache;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod synthetic;
