use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Day-level ledger entry, the raw material behind report rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: NaiveDate,
    /// Signed amount in minor currency units; negative for outflows.
    pub amount: i64,
    pub account: Uuid,
    #[serde(default)]
    pub category: Option<Uuid>,
    #[serde(default)]
    pub payee: Option<Uuid>,
    #[serde(default)]
    pub transfer_account: Option<Uuid>,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: i64, account: Uuid) -> Self {
        Self {
            date,
            amount,
            account,
            category: None,
            payee: None,
            transfer_account: None,
        }
    }

    pub fn with_category(mut self, category: Uuid) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_payee(mut self, payee: Uuid) -> Self {
        self.payee = Some(payee);
        self
    }

    pub fn with_transfer(mut self, account: Uuid) -> Self {
        self.transfer_account = Some(account);
        self
    }
}
