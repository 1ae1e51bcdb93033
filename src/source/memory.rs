use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::config::ReportFixture;
use crate::domain::{
    Account, BudgetRecord, Category, CategorySet, GroupField, Row, RowKind, Transaction,
};
use crate::errors::ReportResult;
use crate::report::Granularity;

use super::filter::{evaluate, Filter};
use super::ReportSource;

/// In-memory source over day-level transactions and monthly budget records.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    categories: CategorySet,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    budget: Vec<BudgetRecord>,
}

impl MemorySource {
    pub fn new(categories: CategorySet, accounts: Vec<Account>) -> Self {
        Self {
            categories,
            accounts,
            transactions: Vec::new(),
            budget: Vec::new(),
        }
    }

    pub fn from_fixture(fixture: &ReportFixture) -> Self {
        Self::new(
            fixture.report.categories.clone(),
            fixture.report.accounts.clone(),
        )
        .with_transactions(fixture.transactions.iter().cloned())
        .with_budget(fixture.budget.iter().copied())
    }

    pub fn with_transactions(mut self, transactions: impl IntoIterator<Item = Transaction>) -> Self {
        self.transactions.extend(transactions);
        self
    }

    pub fn with_budget(mut self, records: impl IntoIterator<Item = BudgetRecord>) -> Self {
        self.budget.extend(records);
        self
    }

    fn category(&self, id: Option<uuid::Uuid>) -> Option<&Category> {
        id.and_then(|id| self.categories.category(id))
    }

    fn to_row(&self, txn: &Transaction, granularity: Granularity) -> Row {
        let category = self.category(txn.category);
        let group = category.and_then(|category| self.categories.group(category.group_id));
        let off_budget = self
            .accounts
            .iter()
            .find(|account| account.id == txn.account)
            .is_some_and(|account| account.off_budget);
        Row {
            date: row_label(granularity, txn.date),
            amount: txn.amount,
            category: txn.category,
            category_group: category.map(|category| category.group_id),
            payee: txn.payee,
            account: Some(txn.account),
            transfer_account: txn.transfer_account,
            category_hidden: category.is_some_and(|category| category.hidden),
            category_group_hidden: group.is_some_and(|group| group.hidden),
            account_off_budget: off_budget,
        }
    }
}

/// Weekly reports are queried at day resolution and re-bucketed by the engine.
fn row_label(granularity: Granularity, date: NaiveDate) -> String {
    match granularity {
        Granularity::Weekly => Granularity::Daily.label(date, 0),
        other => other.label(date, 0),
    }
}

#[async_trait]
impl ReportSource for MemorySource {
    async fn fetch_rows(
        &self,
        kind: RowKind,
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
        filter: &Filter,
    ) -> ReportResult<Vec<Row>> {
        let rows: Vec<Row> = self
            .transactions
            .iter()
            .filter(|txn| txn.date >= start && txn.date <= end)
            .filter(|txn| match kind {
                RowKind::Assets => txn.amount > 0,
                RowKind::Debts => txn.amount < 0,
            })
            .map(|txn| self.to_row(txn, granularity))
            .filter(|row| evaluate(filter, &|field| row.key(field)))
            .collect();
        debug!(?kind, rows = rows.len(), "fetched report rows");
        Ok(rows)
    }

    async fn fetch_budget(
        &self,
        months: &BTreeSet<u32>,
        filter: &Filter,
    ) -> ReportResult<Vec<BudgetRecord>> {
        let records: Vec<BudgetRecord> = self
            .budget
            .iter()
            .filter(|record| months.contains(&record.month))
            .filter(|record| {
                evaluate(filter, &|field| match field {
                    GroupField::Category => Some(record.category),
                    GroupField::CategoryGroup => self
                        .category(Some(record.category))
                        .map(|category| category.group_id),
                    GroupField::Payee | GroupField::Account => None,
                })
            })
            .copied()
            .collect();
        debug!(records = records.len(), "fetched budget records");
        Ok(records)
    }
}
