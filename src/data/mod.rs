/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///   university_student_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate CSV → Dataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<StudentRecord>, year index (read-only)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterSpec → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  KPIs, group-by, trend labels over the view
///   └──────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
