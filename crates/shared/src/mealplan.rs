use serde::{Deserialize, Serialize};

use crate::dish::{Dish, MealType};

/// Per-day nutrition totals. Must equal the sum of the day's per-serving
/// meal nutrition whenever the plan is displayed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub calories: u32,
    pub protein: u32,
    pub fat: u32,
    pub carbs: u32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyTargets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub dish: Dish,
}

/// One day of a plan. `day` is 1-based.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u32,
    pub estimated_time: u32,
    pub totals: DayTotals,
    pub meals: Vec<Meal>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub days: u32,
    pub meals_per_day: u32,
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_targets: Option<DailyTargets>,
    pub plan: Vec<DayPlan>,
}

impl MealPlan {
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Whether `plan` covers exactly the days 1..=days in order. The day
    /// grid renders only when this holds; anything else fails closed.
    pub fn days_are_contiguous(&self) -> bool {
        self.plan.len() as u32 == self.days
            && self
                .plan
                .iter()
                .enumerate()
                .all(|(i, day)| day.day == i as u32 + 1)
    }

    pub fn day(&self, day: u32) -> Option<&DayPlan> {
        self.plan.iter().find(|d| d.day == day)
    }

    pub fn day_mut(&mut self, day: u32) -> Option<&mut DayPlan> {
        self.plan.iter_mut().find(|d| d.day == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> DayPlan {
        DayPlan {
            day: n,
            estimated_time: 0,
            totals: DayTotals::default(),
            meals: Vec::new(),
        }
    }

    fn plan(days: Vec<DayPlan>) -> MealPlan {
        MealPlan {
            id: None,
            title: "Test plan".into(),
            description: String::new(),
            days: days.len() as u32,
            meals_per_day: 3,
            servings: 1,
            daily_targets: None,
            plan: days,
        }
    }

    #[test]
    fn contiguous_days_are_accepted() {
        assert!(plan(vec![day(1), day(2), day(3)]).days_are_contiguous());
    }

    #[test]
    fn gaps_and_reordering_fail_closed() {
        assert!(!plan(vec![day(1), day(3)]).days_are_contiguous());
        assert!(!plan(vec![day(2), day(1)]).days_are_contiguous());
    }

    #[test]
    fn meal_type_uses_the_type_wire_name() {
        let meal = Meal {
            meal_type: MealType::Lunch,
            dish: Dish::default(),
        };
        let value = serde_json::to_value(&meal).unwrap();
        assert_eq!(value["type"], "Lunch");
    }
}
