use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::grouping::UncategorizedKind;
use super::legend::LegendEntry;
use super::metric::Flows;

/// Totals for every metric, accumulated over groups and/or intervals.
///
/// `net_debts` holds the signed sum of negative net amounts, mirroring
/// `total_debts`. Budget fields are `Some` only when budget data was requested.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_assets: i64,
    pub total_debts: i64,
    pub net_assets: i64,
    pub net_debts: i64,
    pub total_totals: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budgeted: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_balance: Option<i64>,
}

impl Totals {
    pub fn empty(with_budget: bool) -> Self {
        let budget = with_budget.then_some(0);
        Self {
            budgeted: budget,
            budget_balance: budget,
            ..Self::default()
        }
    }

    /// Folds one group's flows for one interval into the totals.
    pub fn absorb(self, flows: &Flows) -> Self {
        let net = flows.net();
        Self {
            total_assets: self.total_assets + flows.assets,
            total_debts: self.total_debts + flows.debts,
            net_assets: self.net_assets + net.max(0),
            net_debts: self.net_debts + net.min(0),
            total_totals: self.total_totals + net,
            budgeted: self.budgeted.map(|sum| sum + flows.budget.abs()),
            budget_balance: self.budget_balance.map(|sum| sum + flows.budget_balance()),
        }
    }

    /// Combines two partial totals.
    pub fn merge(self, other: &Totals) -> Self {
        let total_assets = self.total_assets + other.total_assets;
        let total_debts = self.total_debts + other.total_debts;
        Self {
            total_assets,
            total_debts,
            net_assets: self.net_assets + other.net_assets,
            net_debts: self.net_debts + other.net_debts,
            total_totals: total_assets + total_debts,
            budgeted: add_optional(self.budgeted, other.budgeted),
            budget_balance: add_optional(self.budget_balance, other.budget_balance),
        }
    }
}

fn add_optional(left: Option<i64>, right: Option<i64>) -> Option<i64> {
    match (left, right) {
        (None, None) => None,
        (l, r) => Some(l.unwrap_or(0) + r.unwrap_or(0)),
    }
}

/// One bucket of the interval series.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntervalRecord {
    /// Display form of the interval.
    pub date: String,
    pub interval: String,
    pub interval_start_date: NaiveDate,
    pub interval_end_date: NaiveDate,
    /// Active metric value per group name.
    pub stacked: BTreeMap<String, i64>,
    #[serde(flatten)]
    pub totals: Totals,
}

/// One group's flows within one interval.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupIntervalRecord {
    pub date: String,
    pub interval_start_date: NaiveDate,
    pub interval_end_date: NaiveDate,
    /// Net amount change against the previous interval.
    pub change: i64,
    #[serde(flatten)]
    pub totals: Totals,
}

/// Whole-range summary of one group.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncategorized: Option<UncategorizedKind>,
    #[serde(skip)]
    pub sort_order: usize,
    #[serde(flatten)]
    pub totals: Totals,
    pub interval_data: Vec<GroupIntervalRecord>,
}

/// Finished report handed to the sink.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub data: Vec<GroupSummary>,
    pub interval_data: Vec<IntervalRecord>,
    pub legend: Vec<LegendEntry>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(flatten)]
    pub totals: Totals,
}
