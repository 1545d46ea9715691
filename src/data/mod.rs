/// Data layer: table types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SurveyTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ SurveyTable  │  Vec<SurveyRow>, unique region/survey/area values
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region ∧ survey ∧ area membership → row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  KPI mean, trend rows, comparison rows
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  DashboardView, rebuilt on every interaction
///   └──────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
