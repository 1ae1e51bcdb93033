use crate::errors::ReportResult;

use super::aggregate::{group_flows, AggregationContext};
use super::grouping::GroupItem;
use super::payload::{GroupIntervalRecord, GroupSummary, Totals};

/// Summarizes one group across the whole date range.
pub fn recalculate(group: &GroupItem, ctx: &AggregationContext<'_>) -> ReportResult<GroupSummary> {
    let flows = group_flows(group, ctx)?;
    let mut interval_data = Vec::with_capacity(flows.len());
    let mut previous_net: Option<i64> = None;
    for (index, (label, flows)) in ctx.intervals.iter().zip(&flows).enumerate() {
        let (interval_start_date, interval_end_date) = ctx.bounds(index)?;
        let net = flows.net();
        interval_data.push(GroupIntervalRecord {
            date: label.clone(),
            interval_start_date,
            interval_end_date,
            change: previous_net.map_or(0, |previous| net - previous),
            totals: Totals::empty(ctx.with_budget()).absorb(flows),
        });
        previous_net = Some(net);
    }

    let totals = interval_data
        .iter()
        .fold(Totals::empty(ctx.with_budget()), |acc, record| {
            acc.merge(&record.totals)
        });

    Ok(GroupSummary {
        id: group.id,
        name: group.name.clone(),
        uncategorized: group.uncategorized,
        sort_order: group.sort_order,
        totals,
        interval_data,
    })
}
