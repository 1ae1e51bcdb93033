use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which of the two flow queries a row came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// Non-negative flows.
    Assets,
    /// Non-positive flows.
    Debts,
}

/// Row field used as the join key against a group's id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum GroupField {
    Category,
    CategoryGroup,
    Payee,
    Account,
}

impl GroupField {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupField::Category => "category",
            GroupField::CategoryGroup => "categoryGroup",
            GroupField::Payee => "payee",
            GroupField::Account => "account",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "category" => Some(GroupField::Category),
            "categoryGroup" => Some(GroupField::CategoryGroup),
            "payee" => Some(GroupField::Payee),
            "account" => Some(GroupField::Account),
            _ => None,
        }
    }

    pub fn is_category_based(&self) -> bool {
        matches!(self, GroupField::Category | GroupField::CategoryGroup)
    }
}

/// One query result row: an amount in minor currency units tagged with its
/// date bucket and group keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Interval label, or a day label for weekly reports before re-bucketing.
    pub date: String,
    pub amount: i64,
    #[serde(default)]
    pub category: Option<Uuid>,
    #[serde(default)]
    pub category_group: Option<Uuid>,
    #[serde(default)]
    pub payee: Option<Uuid>,
    #[serde(default)]
    pub account: Option<Uuid>,
    #[serde(default)]
    pub transfer_account: Option<Uuid>,
    #[serde(default)]
    pub category_hidden: bool,
    #[serde(default)]
    pub category_group_hidden: bool,
    #[serde(default)]
    pub account_off_budget: bool,
}

impl Row {
    pub fn key(&self, field: GroupField) -> Option<Uuid> {
        match field {
            GroupField::Category => self.category,
            GroupField::CategoryGroup => self.category_group,
            GroupField::Payee => self.payee,
            GroupField::Account => self.account,
        }
    }

    pub fn is_categorized(&self) -> bool {
        self.category.is_some()
    }

    pub fn is_transfer(&self) -> bool {
        self.transfer_account.is_some()
    }

    pub fn is_hidden(&self) -> bool {
        self.category_hidden || self.category_group_hidden
    }
}

/// Planned amount for one category in one month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetRecord {
    /// Month encoded as `YYYYMM`.
    pub month: u32,
    pub category: Uuid,
    /// Budgeted amounts are stored negative.
    pub amount: i64,
}
