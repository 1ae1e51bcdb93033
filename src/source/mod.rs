//! Boundary to the query layer that supplies report rows and budget data.

pub mod filter;
pub mod memory;

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{BudgetRecord, Row, RowKind};
use crate::errors::ReportResult;
use crate::report::Granularity;

pub use filter::{Condition, ConditionOp, ConditionsOp, Filter};
pub use memory::MemorySource;

/// Query layer a report pulls its rows from.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Turns report conditions into a filter expression the source understands.
    async fn translate_conditions(
        &self,
        conditions: &[Condition],
        op: ConditionsOp,
        apply_special_cases: bool,
    ) -> ReportResult<Filter> {
        Ok(filter::translate(conditions, op, apply_special_cases))
    }

    /// Rows of one flow kind within `[start, end]`, dated by interval label.
    ///
    /// Weekly reports receive day labels; the engine re-buckets them.
    async fn fetch_rows(
        &self,
        kind: RowKind,
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
        filter: &Filter,
    ) -> ReportResult<Vec<Row>>;

    /// Budget records for the given `YYYYMM` months.
    async fn fetch_budget(
        &self,
        months: &BTreeSet<u32>,
        filter: &Filter,
    ) -> ReportResult<Vec<BudgetRecord>>;
}
