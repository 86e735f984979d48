use serde::{Deserialize, Serialize};

use crate::dish::{Difficulty, Dish, MealType};

/// Requirement payload for single-dish generation. Field names follow the
/// backend wire format; unanswered optional fields are omitted entirely.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SingleDishRequirements {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cuisine: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    pub difficulty: Difficulty,
    pub servings: u32,
    pub meal_type: MealType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    pub high_protein: bool,
    pub low_fat: bool,
    pub low_carbs: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blacklisted_ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequirements {
    pub days: u32,
    pub meals_per_day: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meal_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cuisine: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_per_day: Option<u32>,
    pub difficulty: Difficulty,
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_per_day: Option<u32>,
    pub high_protein: bool,
    pub low_fat: bool,
    pub low_carbs: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blacklisted_ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,
}

/// Parameters for generating a replacement dish: the nutrition profile the
/// new dish should match, taken from the dish being swapped out.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementTarget {
    pub calories: u32,
    pub protein: u32,
    pub fat: u32,
    pub carbs: u32,
    pub meal_type: MealType,
    pub servings: u32,
}

impl ReplacementTarget {
    pub fn for_dish(dish: &Dish, meal_type: MealType) -> Self {
        Self {
            calories: dish.calories,
            protein: dish.macros.protein,
            fat: dish.macros.fat,
            carbs: dish.macros.carbs,
            meal_type,
            servings: dish.servings,
        }
    }
}
