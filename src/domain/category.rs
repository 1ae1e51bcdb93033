use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Budget category that transactions are filed under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub group_id: Uuid,
    #[serde(default)]
    pub hidden: bool,
}

impl Category {
    pub fn new(name: impl Into<String>, group_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            group_id,
            hidden: false,
        }
    }
}

/// Named collection of categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl CategoryGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            hidden: false,
            categories: Vec::new(),
        }
    }

    /// Creates a category inside this group and returns its id.
    pub fn add_category(&mut self, name: impl Into<String>) -> Uuid {
        let category = Category::new(name, self.id);
        let id = category.id;
        self.categories.push(category);
        id
    }
}

/// Categories known to a report, both flat and grouped.
///
/// `list` carries the flat category list in display order; `grouped` carries
/// the category groups (with their members) in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySet {
    #[serde(default)]
    pub list: Vec<Category>,
    #[serde(default)]
    pub grouped: Vec<CategoryGroup>,
}

impl CategorySet {
    /// Builds a set whose flat list is derived from the groups' members.
    pub fn from_groups(grouped: Vec<CategoryGroup>) -> Self {
        let list = grouped
            .iter()
            .flat_map(|group| group.categories.iter().cloned())
            .collect();
        Self { list, grouped }
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.list
            .iter()
            .chain(self.grouped.iter().flat_map(|group| group.categories.iter()))
            .find(|category| category.id == id)
    }

    pub fn group(&self, id: Uuid) -> Option<&CategoryGroup> {
        self.grouped.iter().find(|group| group.id == id)
    }

    /// A category counts as hidden when it or its owning group is hidden.
    pub fn is_hidden(&self, category: &Category) -> bool {
        category.hidden
            || self
                .group(category.group_id)
                .is_some_and(|group| group.hidden)
    }
}
