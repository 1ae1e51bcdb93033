use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::domain::{GroupField, Row};
use crate::errors::ReportResult;

use super::budget::BudgetAligner;
use super::grouping::{matches, visible, GroupItem, Visibility};
use super::interval::Granularity;
use super::metric::{BalanceMetric, Flows};
use super::payload::{IntervalRecord, Totals};

/// Everything the interval fold reads, resolved once per report run.
#[derive(Debug, Clone)]
pub struct AggregationContext<'a> {
    pub groups: &'a [GroupItem],
    pub field: GroupField,
    pub intervals: &'a [String],
    pub assets: &'a [Row],
    pub debts: &'a [Row],
    pub visibility: Visibility,
    pub metric: BalanceMetric,
    pub granularity: Granularity,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: &'a BudgetAligner<'a>,
}

impl AggregationContext<'_> {
    pub fn with_budget(&self) -> bool {
        self.budget.is_enabled()
    }

    pub fn bounds(&self, index: usize) -> ReportResult<(NaiveDate, NaiveDate)> {
        self.granularity
            .interval_bounds(self.intervals, index, self.start_date, self.end_date)
    }
}

/// Interval series together with its grand totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSeries {
    pub records: Vec<IntervalRecord>,
    pub totals: Totals,
}

/// Flows of one group, one entry per interval in sequence order.
pub fn group_flows(group: &GroupItem, ctx: &AggregationContext<'_>) -> ReportResult<Vec<Flows>> {
    let assets = sum_by_interval(group, ctx.assets, ctx);
    let debts = sum_by_interval(group, ctx.debts, ctx);
    ctx.intervals
        .iter()
        .map(|label| {
            Ok(Flows {
                assets: assets.get(label.as_str()).copied().unwrap_or(0),
                debts: debts.get(label.as_str()).copied().unwrap_or(0),
                budget: ctx.budget.amount_for(group, label)?,
            })
        })
        .collect()
}

fn sum_by_interval<'r>(
    group: &GroupItem,
    rows: &'r [Row],
    ctx: &AggregationContext<'_>,
) -> HashMap<&'r str, i64> {
    let category_grouping = ctx.field.is_category_based();
    visible(group, rows, &ctx.visibility, category_grouping)
        .into_iter()
        .filter(|row| matches(group, row, ctx.field, category_grouping))
        .fold(HashMap::new(), |mut sums, row| {
            *sums.entry(row.date.as_str()).or_insert(0) += row.amount;
            sums
        })
}

/// Folds rows and budget data into one record per interval plus grand totals.
pub fn aggregate(ctx: &AggregationContext<'_>) -> ReportResult<IntervalSeries> {
    let matrix = ctx
        .groups
        .iter()
        .map(|group| group_flows(group, ctx))
        .collect::<ReportResult<Vec<_>>>()?;

    let records = ctx
        .intervals
        .iter()
        .enumerate()
        .map(|(index, label)| interval_record(ctx, &matrix, index, label))
        .collect::<ReportResult<Vec<_>>>()?;

    let totals = records
        .iter()
        .fold(Totals::empty(ctx.with_budget()), |acc, record| {
            acc.merge(&record.totals)
        });

    Ok(IntervalSeries { records, totals })
}

fn interval_record(
    ctx: &AggregationContext<'_>,
    matrix: &[Vec<Flows>],
    index: usize,
    label: &str,
) -> ReportResult<IntervalRecord> {
    let (interval_start_date, interval_end_date) = ctx.bounds(index)?;
    let (stacked, totals) = ctx.groups.iter().zip(matrix).fold(
        (BTreeMap::new(), Totals::empty(ctx.with_budget())),
        |(mut stacked, totals), (group, flows)| {
            let flows = flows[index];
            *stacked.entry(group.name.clone()).or_insert(0) += ctx.metric.value(&flows);
            (stacked, totals.absorb(&flows))
        },
    );
    Ok(IntervalRecord {
        date: ctx.granularity.display(label)?,
        interval: label.to_string(),
        interval_start_date,
        interval_end_date,
        stacked,
        totals,
    })
}
