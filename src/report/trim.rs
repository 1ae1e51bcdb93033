use super::metric::BalanceMetric;
use super::payload::{GroupSummary, IntervalRecord};

/// Inclusive index range of intervals kept in the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimRange {
    pub start_index: usize,
    pub end_index: usize,
}

/// Whether a group row should be dropped from the report.
pub fn is_row_empty(show_empty: bool, summary: &GroupSummary, metric: BalanceMetric) -> bool {
    !show_empty && !metric.has_activity(&summary.totals)
}

/// Smallest contiguous range of intervals holding activity for any group.
///
/// Falls back to the full range when trimming is off or nothing is populated.
pub fn choose_trim_range(
    groups: &[GroupSummary],
    intervals: &[IntervalRecord],
    trim_intervals: bool,
    metric: BalanceMetric,
) -> TrimRange {
    let full = TrimRange {
        start_index: 0,
        end_index: intervals.len().saturating_sub(1),
    };
    if !trim_intervals {
        return full;
    }
    let populated = |index: usize| {
        groups.iter().any(|group| {
            group
                .interval_data
                .get(index)
                .is_some_and(|record| metric.has_activity(&record.totals))
        })
    };
    let Some(start_index) = (0..intervals.len()).find(|&index| populated(index)) else {
        return full;
    };
    let end_index = (start_index..intervals.len())
        .rev()
        .find(|&index| populated(index))
        .unwrap_or(start_index);
    TrimRange {
        start_index,
        end_index,
    }
}

/// Cuts the interval series and every group's interval breakdown to the same range.
pub fn trim_to_range(
    groups: Vec<GroupSummary>,
    intervals: Vec<IntervalRecord>,
    range: TrimRange,
) -> (Vec<GroupSummary>, Vec<IntervalRecord>) {
    let window = |len: usize| {
        let end = range.end_index.min(len.saturating_sub(1));
        range.start_index.min(end)..(end + 1).min(len)
    };
    let groups = groups
        .into_iter()
        .map(|mut group| {
            let span = window(group.interval_data.len());
            group.interval_data = group.interval_data.drain(span).collect();
            group
        })
        .collect();
    let span = window(intervals.len());
    let intervals = intervals
        .into_iter()
        .enumerate()
        .filter(|(index, _)| span.contains(index))
        .map(|(_, record)| record)
        .collect();
    (groups, intervals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::metric::Flows;
    use crate::report::payload::{GroupIntervalRecord, Totals};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn debts_totals(debts: i64) -> Totals {
        Totals::empty(false).absorb(&Flows {
            assets: 0,
            debts,
            budget: 0,
        })
    }

    fn summary(name: &str, debts: &[i64]) -> GroupSummary {
        let interval_data: Vec<GroupIntervalRecord> = debts
            .iter()
            .enumerate()
            .map(|(index, amount)| GroupIntervalRecord {
                date: format!("2024-01-{:02}", index + 1),
                interval_start_date: day(index as u32 + 1),
                interval_end_date: day(index as u32 + 1),
                change: 0,
                totals: debts_totals(*amount),
            })
            .collect();
        let totals = interval_data
            .iter()
            .fold(Totals::empty(false), |acc, r| acc.merge(&r.totals));
        GroupSummary {
            id: None,
            name: name.into(),
            uncategorized: None,
            sort_order: 0,
            totals,
            interval_data,
        }
    }

    fn intervals(count: usize) -> Vec<IntervalRecord> {
        (0..count)
            .map(|index| IntervalRecord {
                date: format!("Jan {:02}, 2024", index + 1),
                interval: format!("2024-01-{:02}", index + 1),
                interval_start_date: day(index as u32 + 1),
                interval_end_date: day(index as u32 + 1),
                stacked: BTreeMap::new(),
                totals: Totals::default(),
            })
            .collect()
    }

    #[test]
    fn empty_rows_are_flagged_unless_shown() {
        let idle = summary("Idle", &[0, 0]);
        assert!(is_row_empty(false, &idle, BalanceMetric::TotalDebts));
        assert!(!is_row_empty(true, &idle, BalanceMetric::TotalDebts));
        let busy = summary("Busy", &[0, -5]);
        assert!(!is_row_empty(false, &busy, BalanceMetric::TotalDebts));
        assert!(is_row_empty(false, &busy, BalanceMetric::TotalAssets));
    }

    #[test]
    fn range_spans_first_to_last_populated_interval() {
        let groups = vec![summary("A", &[0, -5, 0, 0, 0]), summary("B", &[0, 0, 0, -1, 0])];
        let range = choose_trim_range(&groups, &intervals(5), true, BalanceMetric::TotalDebts);
        assert_eq!(
            range,
            TrimRange {
                start_index: 1,
                end_index: 3
            }
        );
    }

    #[test]
    fn no_trimming_when_disabled_or_empty() {
        let groups = vec![summary("A", &[0, -5, 0])];
        let full = TrimRange {
            start_index: 0,
            end_index: 2,
        };
        assert_eq!(
            choose_trim_range(&groups, &intervals(3), false, BalanceMetric::TotalDebts),
            full
        );
        let idle = vec![summary("A", &[0, 0, 0])];
        assert_eq!(
            choose_trim_range(&idle, &intervals(3), true, BalanceMetric::TotalDebts),
            full
        );
    }

    #[test]
    fn trimming_keeps_both_series_in_lockstep() {
        let groups = vec![summary("A", &[0, -5, -2, 0])];
        let range = TrimRange {
            start_index: 1,
            end_index: 2,
        };
        let (groups, series) = trim_to_range(groups, intervals(4), range);
        assert_eq!(series.len(), 2);
        assert_eq!(groups[0].interval_data.len(), series.len());
        assert_eq!(series[0].interval, groups[0].interval_data[0].date);
        assert_eq!(series[1].interval, "2024-01-03");
    }
}
