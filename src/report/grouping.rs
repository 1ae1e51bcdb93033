use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Account, CategorySet, GroupField, Identifiable, NamedEntity, Payee, Row,
};

/// Dimension a report is broken down by.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GroupBy {
    #[default]
    Category,
    #[serde(alias = "Group")]
    CategoryGroup,
    Payee,
    Account,
}

impl GroupBy {
    pub fn field(&self) -> GroupField {
        match self {
            GroupBy::Category => GroupField::Category,
            GroupBy::CategoryGroup => GroupField::CategoryGroup,
            GroupBy::Payee => GroupField::Payee,
            GroupBy::Account => GroupField::Account,
        }
    }
}

/// Synthetic buckets that collect rows without a category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum UncategorizedKind {
    /// Uncategorized activity on off-budget accounts.
    OffBudget,
    /// Uncategorized transfers between on-budget accounts.
    Transfer,
    /// Any other uncategorized on-budget activity.
    Other,
    /// Every uncategorized row; used when grouping by category group.
    All,
}

impl UncategorizedKind {
    pub fn label(&self) -> &'static str {
        match self {
            UncategorizedKind::OffBudget => "Off budget",
            UncategorizedKind::Transfer => "Transfers",
            UncategorizedKind::Other => "Other",
            UncategorizedKind::All => "Uncategorized",
        }
    }

    /// Whether an uncategorized row belongs in this bucket.
    pub fn accepts(&self, row: &Row) -> bool {
        if row.is_categorized() {
            return false;
        }
        match self {
            UncategorizedKind::OffBudget => row.account_off_budget && !row.is_transfer(),
            UncategorizedKind::Transfer => !row.account_off_budget && row.is_transfer(),
            UncategorizedKind::Other => !row.account_off_budget && !row.is_transfer(),
            UncategorizedKind::All => true,
        }
    }
}

/// A resolved group the report is broken down by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupItem {
    /// `None` for synthetic uncategorized buckets.
    pub id: Option<Uuid>,
    pub name: String,
    pub uncategorized: Option<UncategorizedKind>,
    /// Position in the resolved list, used by the budget sort order.
    pub sort_order: usize,
}

impl GroupItem {
    fn from_entity<T: Identifiable + NamedEntity>(entity: &T) -> Self {
        Self {
            id: Some(entity.id()),
            name: entity.name().to_string(),
            uncategorized: None,
            sort_order: 0,
        }
    }

    fn synthetic(kind: UncategorizedKind) -> Self {
        Self {
            id: None,
            name: kind.label().to_string(),
            uncategorized: Some(kind),
            sort_order: 0,
        }
    }
}

/// Visibility toggles carried by a report definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    pub show_empty: bool,
    pub show_off_budget: bool,
    pub show_hidden_categories: bool,
    pub show_uncategorized: bool,
}

/// Entity lists a grouping can draw from.
#[derive(Debug, Clone, Copy)]
pub struct GroupSources<'a> {
    pub categories: &'a CategorySet,
    pub payees: &'a [Payee],
    pub accounts: &'a [Account],
}

/// Resolves a grouping mode to its ordered groups and the row field they match on.
pub fn resolve(
    group_by: GroupBy,
    sources: &GroupSources<'_>,
    visibility: &Visibility,
) -> (Vec<GroupItem>, GroupField) {
    let mut groups: Vec<GroupItem> = match group_by {
        GroupBy::Category => {
            let mut items: Vec<GroupItem> = sources
                .categories
                .list
                .iter()
                .filter(|category| {
                    visibility.show_hidden_categories || !sources.categories.is_hidden(category)
                })
                .map(GroupItem::from_entity)
                .collect();
            if visibility.show_uncategorized {
                if visibility.show_off_budget {
                    items.push(GroupItem::synthetic(UncategorizedKind::OffBudget));
                }
                items.push(GroupItem::synthetic(UncategorizedKind::Transfer));
                items.push(GroupItem::synthetic(UncategorizedKind::Other));
            }
            items
        }
        GroupBy::CategoryGroup => {
            let mut items: Vec<GroupItem> = sources
                .categories
                .grouped
                .iter()
                .filter(|group| visibility.show_hidden_categories || !group.hidden)
                .map(GroupItem::from_entity)
                .collect();
            if visibility.show_uncategorized {
                items.push(GroupItem::synthetic(UncategorizedKind::All));
            }
            items
        }
        GroupBy::Payee => sources.payees.iter().map(GroupItem::from_entity).collect(),
        GroupBy::Account => sources
            .accounts
            .iter()
            .filter(|account| visibility.show_off_budget || !account.off_budget)
            .map(GroupItem::from_entity)
            .collect(),
    };
    disambiguate_names(&mut groups);
    for (index, group) in groups.iter_mut().enumerate() {
        group.sort_order = index;
    }
    (groups, group_by.field())
}

/// Suffixes repeated names with ` (2)`, ` (3)`, ... so each group owns its
/// stacked-value and legend key. The first occurrence keeps its name.
fn disambiguate_names(groups: &mut [GroupItem]) {
    let mut used: HashSet<String> = HashSet::with_capacity(groups.len());
    for group in groups.iter_mut() {
        if used.insert(group.name.clone()) {
            continue;
        }
        let mut suffix = 2;
        let unique = loop {
            let candidate = format!("{} ({suffix})", group.name);
            if !used.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        used.insert(unique.clone());
        group.name = unique;
    }
}

/// Rows of `rows` that may count toward `group` under the visibility toggles.
///
/// Under category-based grouping this is the only place uncategorized rows
/// are attributed: regular groups never see them and each synthetic bucket
/// sees only its own kind.
pub fn visible<'r>(
    group: &GroupItem,
    rows: &'r [Row],
    visibility: &Visibility,
    category_grouping: bool,
) -> Vec<&'r Row> {
    rows.iter()
        .filter(|row| {
            !(category_grouping && !visibility.show_hidden_categories && row.is_hidden())
        })
        .filter(|row| visibility.show_off_budget || !row.account_off_budget)
        .filter(|row| {
            if !category_grouping {
                return true;
            }
            match group.uncategorized {
                Some(kind) => visibility.show_uncategorized && kind.accepts(row),
                None => row.is_categorized(),
            }
        })
        .collect()
}

/// Join predicate between a row and a group.
pub fn matches(group: &GroupItem, row: &Row, field: GroupField, category_grouping: bool) -> bool {
    if category_grouping && group.uncategorized.is_some() {
        return true;
    }
    group.id.is_some() && row.key(field) == group.id
}
