/// Data layer: tables, loading, combination and column selection.
///
/// Architecture:
/// ```text
///  SOURCE ... (whitespace tables)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → Datasets (+ one Interpolator each)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ combine   │  optional: factor-weighted sum on the master x grid
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  `all` / explicit list → y-column indices
///   └──────────┘
/// ```

pub mod combine;
pub mod export;
pub mod interp;
pub mod loader;
pub mod model;
pub mod select;
