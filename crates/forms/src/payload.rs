use platewise_shared::{MealPlanRequirements, SingleDishRequirements};

use crate::schema::Category;
use crate::state::FormState;

#[derive(Clone, Debug, PartialEq)]
pub enum Requirements {
    SingleDish(SingleDishRequirements),
    MealPlan(MealPlanRequirements),
}

pub fn requirements(category: Category, form: &FormState) -> Requirements {
    match category {
        Category::SingleDish => Requirements::SingleDish(single_dish_requirements(form)),
        Category::MealPlan => Requirements::MealPlan(meal_plan_requirements(form)),
    }
}

fn non_empty_text(form: &FormState, key: &str) -> Option<String> {
    form.text(key)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

pub fn single_dish_requirements(form: &FormState) -> SingleDishRequirements {
    SingleDishRequirements {
        ingredients: form.items("ingredients").to_vec(),
        cuisine: form.items("cuisine").to_vec(),
        time: form.number("time"),
        difficulty: form
            .choice("difficulty")
            .and_then(|choice| choice.parse().ok())
            .unwrap_or_default(),
        servings: form.number("servings").unwrap_or(1),
        meal_type: form
            .choice("mealType")
            .and_then(|choice| choice.parse().ok())
            .unwrap_or_default(),
        diet_type: non_empty_text(form, "dietType"),
        calories: form.number("calories"),
        high_protein: form.toggled("highProtein"),
        low_fat: form.toggled("lowFat"),
        low_carbs: form.toggled("lowCarbs"),
        blacklisted_ingredients: form.items("blacklistedIngredients").to_vec(),
        allergens: form.items("allergens").to_vec(),
    }
}

pub fn meal_plan_requirements(form: &FormState) -> MealPlanRequirements {
    MealPlanRequirements {
        days: form.number("days").unwrap_or(7),
        meals_per_day: form.number("mealsPerDay").unwrap_or(3),
        meal_types: form.items("mealTypes").to_vec(),
        ingredients: form.items("ingredients").to_vec(),
        cuisine: form.items("cuisine").to_vec(),
        time_per_day: form.number("timePerDay"),
        difficulty: form
            .choice("difficulty")
            .and_then(|choice| choice.parse().ok())
            .unwrap_or_default(),
        servings: form.number("servings").unwrap_or(1),
        diet_type: non_empty_text(form, "dietType"),
        calories_per_day: form.number("caloriesPerDay"),
        high_protein: form.toggled("highProtein"),
        low_fat: form.toggled("lowFat"),
        low_carbs: form.toggled("lowCarbs"),
        blacklisted_ingredients: form.items("blacklistedIngredients").to_vec(),
        allergens: form.items("allergens").to_vec(),
    }
}
