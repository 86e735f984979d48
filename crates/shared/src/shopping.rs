use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub ingredient: String,
    pub category: String,
    pub checked: bool,
    pub used_in_days: Vec<u32>,
    pub estimated_shelf_life: u32,
}

/// A shopping list derived from a meal plan. `id` is absent until the
/// backend has persisted the list; item-check and pin calls require it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub items: Vec<ShoppingListItem>,
    pub shopping_day: u32,
    pub valid_for_days: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_plan_title: Option<String>,
    #[serde(default)]
    pub is_pinned: bool,
}

impl ShoppingList {
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|i| i.checked).count()
    }

    /// Items grouped by category, categories in first-seen order, each item
    /// paired with its index in `items` so toggles address the flat list.
    pub fn grouped_by_category(&self) -> Vec<(&str, Vec<(usize, &ShoppingListItem)>)> {
        let mut groups: Vec<(&str, Vec<(usize, &ShoppingListItem)>)> = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            match groups.iter_mut().find(|(name, _)| *name == item.category) {
                Some((_, members)) => members.push((index, item)),
                None => groups.push((item.category.as_str(), vec![(index, item)])),
            }
        }
        groups
    }
}
