use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::metric::BalanceMetric;
use super::payload::GroupSummary;

/// Ordering applied to the group rows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Desc,
    Asc,
    Name,
    /// Keeps the order the groups were resolved in.
    Budget,
}

/// Comparator for group rows; ties fall back to resolution order.
pub fn compare_groups(
    metric: BalanceMetric,
    sort_by: SortBy,
) -> impl Fn(&GroupSummary, &GroupSummary) -> Ordering {
    move |a, b| {
        let primary = match sort_by {
            SortBy::Desc => metric
                .of_totals(&b.totals)
                .cmp(&metric.of_totals(&a.totals)),
            SortBy::Asc => metric
                .of_totals(&a.totals)
                .cmp(&metric.of_totals(&b.totals)),
            SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortBy::Budget => Ordering::Equal,
        };
        primary.then(a.sort_order.cmp(&b.sort_order))
    }
}
