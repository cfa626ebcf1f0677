/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  remote CSV (fixed URL)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → ListingTable (cached once per process)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ListingTable  │  Vec<Listing>, city index, slider bounds
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply criteria → filtered indices + price summary
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
