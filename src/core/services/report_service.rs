use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::ReportConfig;
use crate::domain::{GroupField, Row, RowKind};
use crate::errors::ReportResult;
use crate::report::{
    aggregate, build_legend, choose_trim_range, compare_groups, grouping, is_row_empty,
    recalculate, trim_to_range, AggregationContext, BudgetAligner, Granularity, GroupSummary,
    ReportPayload,
};
use crate::source::{Condition, ReportSource};
use crate::time::{Clock, SystemClock};

/// Receives a finished report.
pub trait ReportSink {
    fn set_data(&mut self, payload: ReportPayload);

    /// Flags that the report run finished delivering.
    fn set_data_check(&mut self, _ready: bool) {}
}

/// Runs report definitions against a [`ReportSource`].
#[derive(Clone)]
pub struct ReportService {
    source: Arc<dyn ReportSource>,
    clock: Arc<dyn Clock>,
}

impl ReportService {
    pub fn new(source: Arc<dyn ReportSource>) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the report payload; `Ok(None)` when the grouping resolves to no groups.
    pub async fn generate(&self, config: &ReportConfig) -> ReportResult<Option<ReportPayload>> {
        config.validate()?;
        let visibility = config.visibility();
        let (groups, field) = grouping::resolve(config.group_by, &config.sources(), &visibility);
        if groups.is_empty() {
            warn!(group_by = ?config.group_by, "no groups to report on");
            return Ok(None);
        }

        let granularity = config.interval;
        let first_day = config.first_day_of_week_idx;
        let start_date = config.start_date;
        let end_date = config.effective_end_date(self.clock.today());
        let metric = config.balance_type;

        let query_conditions: Vec<Condition> = config
            .conditions
            .iter()
            .filter(|condition| !condition.custom)
            .cloned()
            .collect();
        let budget_conditions: Vec<Condition> = query_conditions
            .iter()
            .filter(|condition| condition.field == GroupField::Category)
            .cloned()
            .collect();
        let filter = self
            .source
            .translate_conditions(&query_conditions, config.conditions_op, true)
            .await?;
        let budget_filter = self
            .source
            .translate_conditions(&budget_conditions, config.conditions_op, false)
            .await?;

        let (assets, debts) = futures::try_join!(
            self.source
                .fetch_rows(RowKind::Assets, start_date, end_date, granularity, &filter),
            self.source
                .fetch_rows(RowKind::Debts, start_date, end_date, granularity, &filter),
        )?;
        let (assets, debts) = if granularity == Granularity::Weekly {
            (rebucket(assets, first_day)?, rebucket(debts, first_day)?)
        } else {
            (assets, debts)
        };
        debug!(assets = assets.len(), debts = debts.len(), "rows ready");

        let intervals = granularity.sequence(start_date, end_date, first_day)?;

        let budget_records = if metric.requires_budget() && field.is_category_based() {
            let mut months = BTreeSet::new();
            for label in &intervals {
                months.extend(granularity.months_covered(label)?);
            }
            Some(self.source.fetch_budget(&months, &budget_filter).await?)
        } else {
            None
        };
        let aligner = match &budget_records {
            Some(records) => BudgetAligner::new(
                granularity,
                field,
                Some(records.as_slice()),
                &config.categories.list,
            ),
            None => BudgetAligner::disabled(granularity, field),
        };

        let ctx = AggregationContext {
            groups: &groups,
            field,
            intervals: &intervals,
            assets: &assets,
            debts: &debts,
            visibility,
            metric,
            granularity,
            start_date,
            end_date,
            budget: &aligner,
        };
        let series = aggregate(&ctx)?;
        let summaries = groups
            .iter()
            .map(|group| recalculate(group, &ctx))
            .collect::<ReportResult<Vec<GroupSummary>>>()?;

        let kept: Vec<GroupSummary> = summaries
            .into_iter()
            .filter(|summary| !is_row_empty(config.show_empty, summary, metric))
            .collect();
        let range = choose_trim_range(&kept, &series.records, config.trim_intervals, metric);
        let (mut data, interval_data) = trim_to_range(kept, series.records, range);
        data.sort_by(compare_groups(metric, config.sort_by));
        let legend = build_legend(&interval_data, &data, config.graph_type, metric);

        let payload = ReportPayload {
            start_date: interval_data
                .first()
                .map_or(start_date, |record| record.interval_start_date),
            end_date: interval_data
                .last()
                .map_or(end_date, |record| record.interval_end_date),
            data,
            interval_data,
            legend,
            totals: series.totals,
        };
        info!(
            groups = payload.data.len(),
            intervals = payload.interval_data.len(),
            ?metric,
            "report generated"
        );
        Ok(Some(payload))
    }

    /// Generates the report and hands it to `sink`. Returns whether the sink was called.
    pub async fn run<S: ReportSink + Send>(
        &self,
        config: &ReportConfig,
        sink: &mut S,
    ) -> ReportResult<bool> {
        match self.generate(config).await? {
            Some(payload) => {
                sink.set_data(payload);
                sink.set_data_check(true);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn rebucket(rows: Vec<Row>, first_day_of_week: u8) -> ReportResult<Vec<Row>> {
    rows.into_iter()
        .map(|row| {
            let date = Granularity::Weekly.bucket(&row.date, first_day_of_week)?;
            Ok(Row { date, ..row })
        })
        .collect()
}
