//! Report aggregation: interval sequencing, grouping, budget alignment, the
//! interval fold and the trimming, sorting and legend passes that shape the
//! final payload.

pub mod aggregate;
pub mod budget;
pub mod grouping;
pub mod interval;
pub mod legend;
pub mod metric;
pub mod payload;
pub mod sort;
pub mod summary;
pub mod trim;

pub use aggregate::{aggregate, AggregationContext, IntervalSeries};
pub use budget::BudgetAligner;
pub use grouping::{GroupBy, GroupItem, GroupSources, UncategorizedKind, Visibility};
pub use interval::Granularity;
pub use legend::{build_legend, GraphType, LegendEntry};
pub use metric::{BalanceMetric, Flows};
pub use payload::{GroupIntervalRecord, GroupSummary, IntervalRecord, ReportPayload, Totals};
pub use sort::{compare_groups, SortBy};
pub use summary::recalculate;
pub use trim::{choose_trim_range, is_row_empty, trim_to_range, TrimRange};
