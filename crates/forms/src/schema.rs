use std::str::FromStr;

use platewise_shared::{Difficulty, MealType};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::error::FormsError;
use crate::state::{FieldValue, FormState};

/// Which requirement wizard is being run. Fixed for the lifetime of a
/// wizard session.
#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Category {
    SingleDish,
    MealPlan,
}

impl Category {
    pub fn parse(raw: &str) -> Result<Self, FormsError> {
        Self::from_str(raw).map_err(|_| FormsError::UnknownCategory(raw.to_owned()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::SingleDish => "Single Dish",
            Category::MealPlan => "Meal Plan",
        }
    }
}

#[derive(AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Select,
    ListOfStrings,
}

pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
}

pub struct StepDescriptor {
    pub title: &'static str,
    pub fields: &'static [FieldDescriptor],
}

const SINGLE_DISH_TASTE: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "ingredients",
        label: "Ingredients",
        description: "What ingredients do you want to use?",
        kind: FieldKind::ListOfStrings,
    },
    FieldDescriptor {
        key: "cuisine",
        label: "Cuisine",
        description: "What cuisine are you interested in?",
        kind: FieldKind::ListOfStrings,
    },
];

const SINGLE_DISH_PRACTICAL: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "time",
        label: "Time",
        description: "How much time do you have?",
        kind: FieldKind::Number,
    },
    FieldDescriptor {
        key: "difficulty",
        label: "Difficulty",
        description: "How difficult do you want it to be?",
        kind: FieldKind::Select,
    },
    FieldDescriptor {
        key: "servings",
        label: "Servings",
        description: "How many servings do you want?",
        kind: FieldKind::Number,
    },
    FieldDescriptor {
        key: "mealType",
        label: "Meal Type",
        description: "What meal type do you need? (eg. lunch, dinner, etc.)",
        kind: FieldKind::Select,
    },
];

const SINGLE_DISH_DIETARY: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "dietType",
        label: "Diet Type",
        description: "Do you follow any specific diet type?",
        kind: FieldKind::Text,
    },
    FieldDescriptor {
        key: "calories",
        label: "Calories",
        description: "How many calories do you want?",
        kind: FieldKind::Number,
    },
    FieldDescriptor {
        key: "highProtein",
        label: "High Protein",
        description: "Do you want it to be rich in protein?",
        kind: FieldKind::Boolean,
    },
    FieldDescriptor {
        key: "lowFat",
        label: "Low Fat",
        description: "Do you want it to be low fat?",
        kind: FieldKind::Boolean,
    },
    FieldDescriptor {
        key: "lowCarbs",
        label: "Low Carbs",
        description: "Do you want it to be low carbs?",
        kind: FieldKind::Boolean,
    },
];

const SINGLE_DISH_BLACKLIST: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "blacklistedIngredients",
        label: "Ingredients",
        description: "What ingredients do you want to avoid?",
        kind: FieldKind::ListOfStrings,
    },
    FieldDescriptor {
        key: "allergens",
        label: "Allergens",
        description: "What allergens do you want to avoid?",
        kind: FieldKind::ListOfStrings,
    },
];

const SINGLE_DISH_STEPS: &[StepDescriptor] = &[
    StepDescriptor {
        title: "Taste",
        fields: SINGLE_DISH_TASTE,
    },
    StepDescriptor {
        title: "Practical",
        fields: SINGLE_DISH_PRACTICAL,
    },
    StepDescriptor {
        title: "Dietary",
        fields: SINGLE_DISH_DIETARY,
    },
    StepDescriptor {
        title: "Blacklist",
        fields: SINGLE_DISH_BLACKLIST,
    },
];

const MEAL_PLAN_STRUCTURE: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "days",
        label: "Days",
        description: "How many days should the plan cover?",
        kind: FieldKind::Number,
    },
    FieldDescriptor {
        key: "mealsPerDay",
        label: "Meals per Day",
        description: "How many meals do you want each day?",
        kind: FieldKind::Number,
    },
    FieldDescriptor {
        key: "mealTypes",
        label: "Meal Types",
        description: "Which meal types should each day include?",
        kind: FieldKind::ListOfStrings,
    },
];

const MEAL_PLAN_TASTE: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "ingredients",
        label: "Ingredients",
        description: "What ingredients do you want to use?",
        kind: FieldKind::ListOfStrings,
    },
    FieldDescriptor {
        key: "cuisine",
        label: "Cuisine",
        description: "What cuisine are you interested in?",
        kind: FieldKind::ListOfStrings,
    },
];

const MEAL_PLAN_PRACTICAL: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "timePerDay",
        label: "Time per Day",
        description: "How much cooking time do you have each day?",
        kind: FieldKind::Number,
    },
    FieldDescriptor {
        key: "difficulty",
        label: "Difficulty",
        description: "How difficult do you want it to be?",
        kind: FieldKind::Select,
    },
    FieldDescriptor {
        key: "servings",
        label: "Servings",
        description: "How many servings do you want?",
        kind: FieldKind::Number,
    },
];

const MEAL_PLAN_DIETARY: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "dietType",
        label: "Diet Type",
        description: "Do you follow any specific diet type?",
        kind: FieldKind::Text,
    },
    FieldDescriptor {
        key: "caloriesPerDay",
        label: "Calories per Day",
        description: "How many calories do you want each day?",
        kind: FieldKind::Number,
    },
    FieldDescriptor {
        key: "highProtein",
        label: "High Protein",
        description: "Do you want it to be rich in protein?",
        kind: FieldKind::Boolean,
    },
    FieldDescriptor {
        key: "lowFat",
        label: "Low Fat",
        description: "Do you want it to be low fat?",
        kind: FieldKind::Boolean,
    },
    FieldDescriptor {
        key: "lowCarbs",
        label: "Low Carbs",
        description: "Do you want it to be low carbs?",
        kind: FieldKind::Boolean,
    },
];

const MEAL_PLAN_BLACKLIST: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "blacklistedIngredients",
        label: "Ingredients",
        description: "What ingredients do you want to avoid?",
        kind: FieldKind::ListOfStrings,
    },
    FieldDescriptor {
        key: "allergens",
        label: "Allergens",
        description: "What allergens do you want to avoid?",
        kind: FieldKind::ListOfStrings,
    },
];

const MEAL_PLAN_STEPS: &[StepDescriptor] = &[
    StepDescriptor {
        title: "Structure",
        fields: MEAL_PLAN_STRUCTURE,
    },
    StepDescriptor {
        title: "Taste",
        fields: MEAL_PLAN_TASTE,
    },
    StepDescriptor {
        title: "Practical",
        fields: MEAL_PLAN_PRACTICAL,
    },
    StepDescriptor {
        title: "Dietary",
        fields: MEAL_PLAN_DIETARY,
    },
    StepDescriptor {
        title: "Blacklist",
        fields: MEAL_PLAN_BLACKLIST,
    },
];

/// Ordered wizard steps for a category. Step count is always derived from
/// this table, never hard-coded at call sites.
pub fn steps(category: Category) -> &'static [StepDescriptor] {
    match category {
        Category::SingleDish => SINGLE_DISH_STEPS,
        Category::MealPlan => MEAL_PLAN_STEPS,
    }
}

pub fn descriptor(category: Category, key: &str) -> Option<&'static FieldDescriptor> {
    steps(category)
        .iter()
        .flat_map(|step| step.fields.iter())
        .find(|field| field.key == key)
}

/// Closed option sets for Select fields, looked up by field key.
pub fn options_for(key: &str) -> Option<&'static [&'static str]> {
    match key {
        "difficulty" => Some(Difficulty::VARIANTS),
        "mealType" => Some(MealType::VARIANTS),
        _ => None,
    }
}

/// Hand-authored starting answers for a category.
pub fn default_state(category: Category) -> FormState {
    match category {
        Category::SingleDish => FormState::from_entries([
            ("ingredients", FieldValue::Items(Vec::new())),
            ("cuisine", FieldValue::Items(Vec::new())),
            ("time", FieldValue::Number(None)),
            ("difficulty", FieldValue::Choice("Casual".to_owned())),
            ("servings", FieldValue::Number(Some(1))),
            ("mealType", FieldValue::Choice("Any".to_owned())),
            ("dietType", FieldValue::Text(String::new())),
            ("calories", FieldValue::Number(None)),
            ("highProtein", FieldValue::Toggle(false)),
            ("lowFat", FieldValue::Toggle(false)),
            ("lowCarbs", FieldValue::Toggle(false)),
            ("blacklistedIngredients", FieldValue::Items(Vec::new())),
            ("allergens", FieldValue::Items(Vec::new())),
        ]),
        Category::MealPlan => FormState::from_entries([
            ("days", FieldValue::Number(Some(7))),
            ("mealsPerDay", FieldValue::Number(Some(3))),
            (
                "mealTypes",
                FieldValue::Items(vec![
                    "Breakfast".to_owned(),
                    "Lunch".to_owned(),
                    "Dinner".to_owned(),
                ]),
            ),
            ("ingredients", FieldValue::Items(Vec::new())),
            ("cuisine", FieldValue::Items(Vec::new())),
            ("timePerDay", FieldValue::Number(None)),
            ("difficulty", FieldValue::Choice("Casual".to_owned())),
            ("servings", FieldValue::Number(Some(1))),
            ("dietType", FieldValue::Text(String::new())),
            ("caloriesPerDay", FieldValue::Number(None)),
            ("highProtein", FieldValue::Toggle(false)),
            ("lowFat", FieldValue::Toggle(false)),
            ("lowCarbs", FieldValue::Toggle(false)),
            ("blacklistedIngredients", FieldValue::Items(Vec::new())),
            ("allergens", FieldValue::Items(Vec::new())),
        ]),
    }
}
