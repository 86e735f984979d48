use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

#[derive(
    EnumString,
    VariantNames,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Casual,
    Hard,
}

#[derive(
    EnumString,
    VariantNames,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Desert,
    #[default]
    Any,
}

/// Macronutrients in grams, per single serving.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Macros {
    pub protein: u32,
    pub fat: u32,
    pub carbs: u32,
}

/// A single generated recipe. Nutrition fields are per serving. `id` is only
/// present on copies the backend has persisted.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub cuisine: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub estimated_time: u32,
    pub servings: u32,
    pub calories: u32,
    pub macros: Macros,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Dish {
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}
