use std::collections::BTreeSet;

use platewise_forms::schema::{self, Category, FieldKind};

#[test]
fn every_category_has_a_non_empty_step_sequence() {
    for category in [Category::SingleDish, Category::MealPlan] {
        let steps = schema::steps(category);
        assert!(!steps.is_empty(), "{category} has no steps");
        for step in steps {
            assert!(!step.fields.is_empty(), "{category} step {} is empty", step.title);
        }
    }
}

#[test]
fn default_state_covers_exactly_the_declared_field_keys() {
    for category in [Category::SingleDish, Category::MealPlan] {
        let declared: BTreeSet<&str> = schema::steps(category)
            .iter()
            .flat_map(|step| step.fields.iter().map(|field| field.key))
            .collect();
        let state = schema::default_state(category);
        let seeded: BTreeSet<&str> = state.keys().collect();

        assert_eq!(declared, seeded, "{category} defaults drift from schema");
    }
}

#[test]
fn field_keys_are_unique_within_a_category() {
    for category in [Category::SingleDish, Category::MealPlan] {
        let keys: Vec<&str> = schema::steps(category)
            .iter()
            .flat_map(|step| step.fields.iter().map(|field| field.key))
            .collect();
        let unique: BTreeSet<&str> = keys.iter().copied().collect();
        assert_eq!(keys.len(), unique.len(), "duplicate key in {category}");
    }
}

#[test]
fn single_dish_has_four_steps_and_meal_plan_five() {
    assert_eq!(schema::steps(Category::SingleDish).len(), 4);
    assert_eq!(schema::steps(Category::MealPlan).len(), 5);
}

#[test]
fn select_fields_all_have_an_option_set() {
    for category in [Category::SingleDish, Category::MealPlan] {
        for step in schema::steps(category) {
            for field in step.fields {
                if matches!(field.kind, FieldKind::Select) {
                    let options = schema::options_for(field.key);
                    assert!(
                        options.is_some_and(|opts| !opts.is_empty()),
                        "select field {} has no options",
                        field.key
                    );
                }
            }
        }
    }
}

#[test]
fn difficulty_and_meal_type_option_sets_are_keyed_by_field_identity() {
    assert_eq!(
        schema::options_for("difficulty"),
        Some(["Easy", "Casual", "Hard"].as_slice())
    );
    let meal_types = schema::options_for("mealType").unwrap();
    assert!(meal_types.contains(&"Breakfast"));
    assert!(meal_types.contains(&"Any"));
    assert_eq!(schema::options_for("servings"), None);
}

#[test]
fn meal_plan_defaults_to_a_week_of_three_meals() {
    let state = schema::default_state(Category::MealPlan);
    assert_eq!(state.number("days"), Some(7));
    assert_eq!(state.number("mealsPerDay"), Some(3));
    assert_eq!(
        state.items("mealTypes").to_vec(),
        vec!["Breakfast".to_owned(), "Lunch".to_owned(), "Dinner".to_owned()]
    );
}

#[test]
fn category_parses_from_route_segments() {
    assert_eq!(Category::parse("single-dish").unwrap(), Category::SingleDish);
    assert_eq!(Category::parse("meal-plan").unwrap(), Category::MealPlan);
    assert!(Category::parse("dessert-cart").is_err());
}
