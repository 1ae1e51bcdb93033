use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{BudgetRecord, Category, GroupField};
use crate::errors::ReportResult;

use super::grouping::GroupItem;
use super::interval::Granularity;

/// Maps month-keyed budget records onto interval labels.
#[derive(Debug, Clone)]
pub struct BudgetAligner<'a> {
    granularity: Granularity,
    field: GroupField,
    records: Option<&'a [BudgetRecord]>,
    category_groups: HashMap<Uuid, Uuid>,
}

impl<'a> BudgetAligner<'a> {
    /// `records` is `None` when budget data was not requested.
    pub fn new<'c>(
        granularity: Granularity,
        field: GroupField,
        records: Option<&'a [BudgetRecord]>,
        categories: impl IntoIterator<Item = &'c Category>,
    ) -> Self {
        let records = records.filter(|_| field.is_category_based());
        let category_groups = categories
            .into_iter()
            .map(|category| (category.id, category.group_id))
            .collect();
        Self {
            granularity,
            field,
            records,
            category_groups,
        }
    }

    pub fn disabled(granularity: Granularity, field: GroupField) -> Self {
        Self {
            granularity,
            field,
            records: None,
            category_groups: HashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.records.is_some()
    }

    /// Budgeted amount (as stored, usually negative) for a group over one interval.
    pub fn amount_for(&self, group: &GroupItem, label: &str) -> ReportResult<i64> {
        let (Some(records), Some(group_id)) = (self.records, group.id) else {
            return Ok(0);
        };
        let months = self.granularity.months_covered(label)?;
        Ok(records
            .iter()
            .filter(|record| months.contains(&record.month))
            .filter(|record| self.belongs(record.category, group_id))
            .map(|record| record.amount)
            .sum())
    }

    fn belongs(&self, category: Uuid, group_id: Uuid) -> bool {
        match self.field {
            GroupField::Category => category == group_id,
            GroupField::CategoryGroup => self.category_groups.get(&category) == Some(&group_id),
            GroupField::Payee | GroupField::Account => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryGroup;
    use crate::report::grouping::UncategorizedKind;

    fn group_item(id: Uuid, name: &str) -> GroupItem {
        GroupItem {
            id: Some(id),
            name: name.into(),
            uncategorized: None,
            sort_order: 0,
        }
    }

    fn monthly_budget(category: Uuid, amount: i64) -> Vec<BudgetRecord> {
        (1..=12)
            .map(|month| BudgetRecord {
                month: 202400 + month,
                category,
                amount,
            })
            .collect()
    }

    #[test]
    fn monthly_label_takes_single_month() {
        let mut food = CategoryGroup::new("Food");
        let groceries = food.add_category("Groceries");
        let records = monthly_budget(groceries, -100);
        let aligner = BudgetAligner::new(
            Granularity::Monthly,
            GroupField::Category,
            Some(records.as_slice()),
            &food.categories,
        );
        let group = group_item(groceries, "Groceries");
        assert_eq!(aligner.amount_for(&group, "2024-02").unwrap(), -100);
        assert_eq!(aligner.amount_for(&group, "2025-02").unwrap(), 0);
    }

    #[test]
    fn yearly_label_sums_twelve_months() {
        let mut food = CategoryGroup::new("Food");
        let groceries = food.add_category("Groceries");
        let records = monthly_budget(groceries, -100);
        let aligner = BudgetAligner::new(
            Granularity::Yearly,
            GroupField::Category,
            Some(records.as_slice()),
            &food.categories,
        );
        let group = group_item(groceries, "Groceries");
        assert_eq!(aligner.amount_for(&group, "2024").unwrap(), -1200);
    }

    #[test]
    fn weekly_label_resolves_owning_month() {
        let mut food = CategoryGroup::new("Food");
        let groceries = food.add_category("Groceries");
        let records = vec![
            BudgetRecord {
                month: 202401,
                category: groceries,
                amount: -40,
            },
            BudgetRecord {
                month: 202402,
                category: groceries,
                amount: -90,
            },
        ];
        let aligner = BudgetAligner::new(
            Granularity::Weekly,
            GroupField::Category,
            Some(records.as_slice()),
            &food.categories,
        );
        let group = group_item(groceries, "Groceries");
        assert_eq!(aligner.amount_for(&group, "2024-01-28").unwrap(), -40);
        assert_eq!(aligner.amount_for(&group, "2024-02-04").unwrap(), -90);
    }

    #[test]
    fn category_group_collects_member_categories() {
        let mut food = CategoryGroup::new("Food");
        let groceries = food.add_category("Groceries");
        let dining = food.add_category("Dining");
        let outsider = Uuid::new_v4();
        let records = vec![
            BudgetRecord {
                month: 202403,
                category: groceries,
                amount: -100,
            },
            BudgetRecord {
                month: 202403,
                category: dining,
                amount: -50,
            },
            BudgetRecord {
                month: 202403,
                category: outsider,
                amount: -999,
            },
        ];
        let aligner = BudgetAligner::new(
            Granularity::Monthly,
            GroupField::CategoryGroup,
            Some(records.as_slice()),
            &food.categories,
        );
        let group = group_item(food.id, "Food");
        assert_eq!(aligner.amount_for(&group, "2024-03").unwrap(), -150);
    }

    #[test]
    fn zero_without_budget_data_or_group_id() {
        let mut food = CategoryGroup::new("Food");
        let groceries = food.add_category("Groceries");
        let records = monthly_budget(groceries, -100);

        let payee_mode = BudgetAligner::new(
            Granularity::Monthly,
            GroupField::Payee,
            Some(records.as_slice()),
            &food.categories,
        );
        assert!(!payee_mode.is_enabled());
        assert_eq!(
            payee_mode
                .amount_for(&group_item(groceries, "Groceries"), "2024-01")
                .unwrap(),
            0
        );

        let aligner = BudgetAligner::new(
            Granularity::Monthly,
            GroupField::Category,
            Some(records.as_slice()),
            &food.categories,
        );
        let synthetic = GroupItem {
            id: None,
            name: "Other".into(),
            uncategorized: Some(UncategorizedKind::Other),
            sort_order: 0,
        };
        assert_eq!(aligner.amount_for(&synthetic, "2024-01").unwrap(), 0);

        let disabled = BudgetAligner::disabled(Granularity::Monthly, GroupField::Category);
        assert_eq!(
            disabled
                .amount_for(&group_item(groceries, "Groceries"), "2024-01")
                .unwrap(),
            0
        );
    }
}
