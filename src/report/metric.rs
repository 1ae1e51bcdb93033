use serde::{Deserialize, Serialize};

use super::payload::Totals;

/// Balance metric a report is computed under.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BalanceMetric {
    TotalAssets,
    #[default]
    TotalDebts,
    NetAssets,
    NetDebts,
    TotalTotals,
    Budgeted,
    BudgetBalance,
}

/// Raw flows of one group within one interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flows {
    /// Sum of asset rows, never negative.
    pub assets: i64,
    /// Sum of debt rows, never positive.
    pub debts: i64,
    /// Budgeted amount as stored (negative for planned spending).
    pub budget: i64,
}

impl Flows {
    pub fn net(&self) -> i64 {
        self.assets + self.debts
    }

    /// Budget as stored (signed) minus the magnitude of spending.
    pub fn budget_balance(&self) -> i64 {
        self.budget - self.debts.abs()
    }
}

impl BalanceMetric {
    pub fn requires_budget(&self) -> bool {
        matches!(self, BalanceMetric::Budgeted | BalanceMetric::BudgetBalance)
    }

    /// Value stored for one group in one interval.
    pub fn value(&self, flows: &Flows) -> i64 {
        let net = flows.net();
        match self {
            BalanceMetric::TotalAssets => flows.assets,
            BalanceMetric::TotalDebts => flows.debts.abs(),
            BalanceMetric::NetAssets => {
                if net > 0 {
                    net
                } else {
                    0
                }
            }
            BalanceMetric::NetDebts => {
                if net < 0 {
                    net.abs()
                } else {
                    0
                }
            }
            BalanceMetric::TotalTotals => net,
            BalanceMetric::Budgeted => flows.budget.abs(),
            BalanceMetric::BudgetBalance => flows.budget_balance(),
        }
    }

    /// Comparable magnitude of an accumulated total under this metric.
    pub fn of_totals(&self, totals: &Totals) -> i64 {
        match self {
            BalanceMetric::TotalAssets => totals.total_assets,
            BalanceMetric::TotalDebts => totals.total_debts.abs(),
            BalanceMetric::NetAssets => totals.net_assets,
            BalanceMetric::NetDebts => totals.net_debts.abs(),
            BalanceMetric::TotalTotals => totals.total_totals,
            BalanceMetric::Budgeted => totals.budgeted.unwrap_or(0),
            BalanceMetric::BudgetBalance => totals.budget_balance.unwrap_or(0),
        }
    }

    /// Whether a total carries anything worth showing under this metric.
    pub fn has_activity(&self, totals: &Totals) -> bool {
        match self {
            BalanceMetric::TotalTotals => totals.total_assets != 0 || totals.total_debts != 0,
            _ => self.of_totals(totals) != 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BalanceMetric::TotalAssets => "Deposits",
            BalanceMetric::TotalDebts => "Payments",
            BalanceMetric::NetAssets => "Net Deposits",
            BalanceMetric::NetDebts => "Net Payments",
            BalanceMetric::TotalTotals => "Net Total",
            BalanceMetric::Budgeted => "Budgeted",
            BalanceMetric::BudgetBalance => "Budget Balance",
        }
    }
}
