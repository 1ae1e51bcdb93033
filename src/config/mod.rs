use std::{
    env, fs,
    path::{Path, PathBuf},
};

use chrono::{Duration, NaiveDate};
use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::domain::{Account, BudgetRecord, CategorySet, Payee, Transaction};
use crate::errors::{ReportError, ReportResult};
use crate::report::{
    BalanceMetric, Granularity, GraphType, GroupBy, GroupSources, SortBy, Visibility,
};
use crate::source::{Condition, ConditionsOp};

const DEFAULT_DIR_NAME: &str = ".budget_report";
const REPORTS_DIR: &str = "reports";
const REPORT_EXTENSION: &str = "json";

/// Full definition of one report run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub interval: Granularity,
    #[serde(default)]
    pub categories: CategorySet,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub conditions_op: ConditionsOp,
    #[serde(default)]
    pub show_empty: bool,
    #[serde(default)]
    pub show_off_budget: bool,
    #[serde(default)]
    pub show_hidden_categories: bool,
    #[serde(default)]
    pub show_uncategorized: bool,
    #[serde(default = "default_true")]
    pub include_current_interval: bool,
    #[serde(default)]
    pub trim_intervals: bool,
    #[serde(default)]
    pub group_by: GroupBy,
    #[serde(default)]
    pub balance_type: BalanceMetric,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub payees: Vec<Payee>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub graph_type: GraphType,
    /// First day of the week for weekly buckets, 0 = Sunday.
    #[serde(default)]
    pub first_day_of_week_idx: u8,
}

fn default_true() -> bool {
    true
}

impl ReportConfig {
    /// A monthly "payments by category" report over `[start_date, end_date]`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            interval: Granularity::default(),
            categories: CategorySet::default(),
            conditions: Vec::new(),
            conditions_op: ConditionsOp::default(),
            show_empty: false,
            show_off_budget: false,
            show_hidden_categories: false,
            show_uncategorized: false,
            include_current_interval: true,
            trim_intervals: false,
            group_by: GroupBy::default(),
            balance_type: BalanceMetric::default(),
            sort_by: SortBy::default(),
            payees: Vec::new(),
            accounts: Vec::new(),
            graph_type: GraphType::default(),
            first_day_of_week_idx: 0,
        }
    }

    pub fn validate(&self) -> ReportResult<()> {
        if self.end_date < self.start_date {
            return Err(ReportError::InvalidRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.first_day_of_week_idx > 6 {
            return Err(ReportError::InvalidConfig(format!(
                "first day of week must be between 0 and 6, got {}",
                self.first_day_of_week_idx
            )));
        }
        Ok(())
    }

    pub fn visibility(&self) -> Visibility {
        Visibility {
            show_empty: self.show_empty,
            show_off_budget: self.show_off_budget,
            show_hidden_categories: self.show_hidden_categories,
            show_uncategorized: self.show_uncategorized,
        }
    }

    pub fn sources(&self) -> GroupSources<'_> {
        GroupSources {
            categories: &self.categories,
            payees: &self.payees,
            accounts: &self.accounts,
        }
    }

    /// End date after dropping the still-running interval, when excluded.
    pub fn effective_end_date(&self, today: NaiveDate) -> NaiveDate {
        if self.include_current_interval {
            return self.end_date;
        }
        let current = self
            .interval
            .interval_start(today, self.first_day_of_week_idx);
        if self.end_date < current {
            return self.end_date;
        }
        (current - Duration::days(1)).max(self.start_date)
    }
}

/// Report definition bundled with the data it runs against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportFixture {
    pub report: ReportConfig,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budget: Vec<BudgetRecord>,
}

/// Returns the application-specific data directory, defaulting to `~/.budget_report`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BUDGET_REPORT_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Reads report fixtures from disk.
pub struct ConfigLoader {
    reports_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            reports_dir: base.join(REPORTS_DIR),
        }
    }

    /// Resolves a path or a bare report name stored under the reports directory.
    pub fn resolve(&self, name_or_path: &str) -> PathBuf {
        let candidate = PathBuf::from(name_or_path);
        if candidate.exists() || candidate.extension().is_some() {
            return candidate;
        }
        self.reports_dir
            .join(format!("{}.{}", name_or_path, REPORT_EXTENSION))
    }

    pub fn load_fixture(&self, path: &Path) -> ReportResult<ReportFixture> {
        let data = fs::read_to_string(path)?;
        let fixture: ReportFixture = serde_json::from_str(&data)?;
        fixture.report.validate()?;
        tracing::debug!(
            path = %path.display(),
            transactions = fixture.transactions.len(),
            "loaded report fixture"
        );
        Ok(fixture)
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
