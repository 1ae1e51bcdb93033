use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a financial account that transactions are posted to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// Tracking accounts sit outside the budget.
    #[serde(default)]
    pub off_budget: bool,
}

impl Account {
    /// Creates a new on-budget account.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            off_budget: false,
        }
    }

    pub fn off_budget(name: impl Into<String>) -> Self {
        Self {
            off_budget: true,
            ..Self::new(name)
        }
    }
}
