/// Data layer: core types, loading/classification, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → rows, memoized on (path, mtime)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  ShopDataset  │  Vec<CoffeeShop>, corpus medians, segments
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  criteria predicate + rating rank → ordered indices
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
