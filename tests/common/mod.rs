#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use budget_report::{
    config::ReportConfig,
    core::services::{ReportService, ReportSink},
    domain::{Account, BudgetRecord, CategoryGroup, CategorySet, Row, RowKind, Transaction},
    errors::{ReportError, ReportResult},
    report::{Granularity, ReportPayload},
    source::{Filter, MemorySource, ReportSource},
    time::FixedClock,
};
use chrono::NaiveDate;
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// One category group with Groceries and Rent, one checking account.
pub struct Household {
    pub categories: CategorySet,
    pub checking: Account,
    pub savings: Account,
    pub food: Uuid,
    pub groceries: Uuid,
    pub rent: Uuid,
}

pub fn household() -> Household {
    let mut food = CategoryGroup::new("Food");
    let groceries = food.add_category("Groceries");
    let mut bills = CategoryGroup::new("Bills");
    let rent = bills.add_category("Rent");
    let food_id = food.id;
    Household {
        categories: CategorySet::from_groups(vec![food, bills]),
        checking: Account::new("Checking"),
        savings: Account::off_budget("Savings"),
        food: food_id,
        groceries,
        rent,
    }
}

impl Household {
    pub fn spend(&self, day: NaiveDate, amount: i64, category: Uuid) -> Transaction {
        Transaction::new(day, amount, self.checking.id).with_category(category)
    }

    /// Groceries payments of 100, 50 and 75 across Q1 2024.
    pub fn groceries_quarter(&self) -> Vec<Transaction> {
        vec![
            self.spend(date(2024, 1, 10), -100, self.groceries),
            self.spend(date(2024, 2, 12), -50, self.groceries),
            self.spend(date(2024, 3, 5), -75, self.groceries),
        ]
    }

    pub fn monthly_budget(&self, category: Uuid, amount: i64) -> Vec<BudgetRecord> {
        (1..=3)
            .map(|month| BudgetRecord {
                month: 202400 + month,
                category,
                amount,
            })
            .collect()
    }

    pub fn report(&self, start: NaiveDate, end: NaiveDate) -> ReportConfig {
        let mut config = ReportConfig::new(start, end);
        config.categories = self.categories.clone();
        config.accounts = vec![self.checking.clone(), self.savings.clone()];
        config
    }

    pub fn source(&self, transactions: Vec<Transaction>, budget: Vec<BudgetRecord>) -> MemorySource {
        MemorySource::new(
            self.categories.clone(),
            vec![self.checking.clone(), self.savings.clone()],
        )
        .with_transactions(transactions)
        .with_budget(budget)
    }
}

pub fn service(source: impl ReportSource + 'static, today: NaiveDate) -> ReportService {
    ReportService::new(Arc::new(source)).with_clock(Arc::new(FixedClock::new(today)))
}

/// Records what the service delivered.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub payloads: Vec<ReportPayload>,
    pub checks: Vec<bool>,
}

impl ReportSink for RecordingSink {
    fn set_data(&mut self, payload: ReportPayload) {
        self.payloads.push(payload);
    }

    fn set_data_check(&mut self, ready: bool) {
        self.checks.push(ready);
    }
}

/// Source whose row queries always fail.
pub struct FailingSource;

#[async_trait]
impl ReportSource for FailingSource {
    async fn fetch_rows(
        &self,
        _kind: RowKind,
        _start: NaiveDate,
        _end: NaiveDate,
        _granularity: Granularity,
        _filter: &Filter,
    ) -> ReportResult<Vec<Row>> {
        Err(ReportError::Fetch("query layer unavailable".into()))
    }

    async fn fetch_budget(
        &self,
        _months: &BTreeSet<u32>,
        _filter: &Filter,
    ) -> ReportResult<Vec<BudgetRecord>> {
        Ok(Vec::new())
    }
}
