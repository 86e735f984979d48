use platewise_shared::{DayPlan, Dish, MealPlan, MealType, ReplacementTarget};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplaceError {
    #[error("{action} is not valid without a pending replacement")]
    InvalidTransition { action: &'static str },

    #[error("Day {day} has no meal at position {meal_index}")]
    TargetMissing { day: u32, meal_index: usize },
}

/// A staged, not-yet-committed substitution of one dish within a plan.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplacementPreview {
    pub day: u32,
    pub meal_index: usize,
    pub meal_type: MealType,
    pub old_dish: Dish,
    pub new_dish: Option<Dish>,
    pub loading: bool,
}

impl ReplacementPreview {
    pub fn is_ready(&self) -> bool {
        !self.loading && self.new_dish.is_some()
    }

    pub fn target(&self) -> ReplacementTarget {
        ReplacementTarget::for_dish(&self.old_dish, self.meal_type)
    }
}

/// The preview/accept/cancel/retry cycle for swapping one meal-plan dish.
/// At most one preview is staged per result view; beginning a new
/// replacement while one is pending discards the prior preview.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Replacement {
    #[default]
    Idle,
    Previewing(ReplacementPreview),
}

impl Replacement {
    pub fn preview(&self) -> Option<&ReplacementPreview> {
        match self {
            Replacement::Previewing(preview) => Some(preview),
            Replacement::Idle => None,
        }
    }

    /// Captures the dish at (day, meal_index) and enters the loading
    /// preview. Returns the generation parameters the caller sends to the
    /// backend. A prior preview, in any state, is discarded.
    pub fn begin(
        &mut self,
        plan: &MealPlan,
        day: u32,
        meal_index: usize,
    ) -> Result<ReplacementTarget, ReplaceError> {
        let meal = plan
            .day(day)
            .and_then(|day_plan| day_plan.meals.get(meal_index))
            .ok_or(ReplaceError::TargetMissing { day, meal_index })?;

        let preview = ReplacementPreview {
            day,
            meal_index,
            meal_type: meal.meal_type,
            old_dish: meal.dish.clone(),
            new_dish: None,
            loading: true,
        };
        let target = preview.target();
        *self = Replacement::Previewing(preview);
        Ok(target)
    }

    /// Marks the pending preview as loaded with the generated alternative.
    pub fn loaded(&mut self, dish: Dish) -> Result<(), ReplaceError> {
        match self {
            Replacement::Previewing(preview) => {
                preview.new_dish = Some(dish);
                preview.loading = false;
                Ok(())
            }
            Replacement::Idle => Err(ReplaceError::InvalidTransition { action: "loaded" }),
        }
    }

    /// Generation failure: the preview is discarded. A failure report that
    /// arrives after a cancel is tolerated as a no-op.
    pub fn failed(&mut self) {
        *self = Replacement::Idle;
    }

    /// Re-issues the same generation call: resets the pending preview to
    /// loading and returns the original parameters.
    pub fn retry(&mut self) -> Result<ReplacementTarget, ReplaceError> {
        match self {
            Replacement::Previewing(preview) => {
                preview.new_dish = None;
                preview.loading = true;
                Ok(preview.target())
            }
            Replacement::Idle => Err(ReplaceError::InvalidTransition { action: "retry" }),
        }
    }

    /// Drops the preview without touching the plan.
    pub fn cancel(&mut self) {
        *self = Replacement::Idle;
    }

    /// Commits the staged substitution: swaps the dish at the captured
    /// position and recomputes that day's totals and estimated time. The
    /// caller persists the updated plan afterwards when it carries an id;
    /// a remote failure never rolls the local mutation back.
    pub fn accept(&mut self, plan: &mut MealPlan) -> Result<(), ReplaceError> {
        let Replacement::Previewing(preview) = &*self else {
            return Err(ReplaceError::InvalidTransition { action: "accept" });
        };
        let Some(new_dish) = preview.new_dish.clone().filter(|_| preview.is_ready()) else {
            return Err(ReplaceError::InvalidTransition { action: "accept" });
        };

        let (day, meal_index) = (preview.day, preview.meal_index);
        let day_plan = plan
            .day_mut(day)
            .filter(|day_plan| meal_index < day_plan.meals.len())
            .ok_or(ReplaceError::TargetMissing { day, meal_index })?;

        day_plan.meals[meal_index].dish = new_dish;
        recompute_day(day_plan);
        *self = Replacement::Idle;
        Ok(())
    }
}

/// Restores the day invariant: totals are the exact sum of the day's
/// per-serving meal nutrition, estimated time the sum of meal times.
pub fn recompute_day(day_plan: &mut DayPlan) {
    let mut totals = platewise_shared::DayTotals::default();
    let mut estimated_time = 0;
    for meal in &day_plan.meals {
        totals.calories += meal.dish.calories;
        totals.protein += meal.dish.macros.protein;
        totals.fat += meal.dish.macros.fat;
        totals.carbs += meal.dish.macros.carbs;
        estimated_time += meal.dish.estimated_time;
    }
    day_plan.totals = totals;
    day_plan.estimated_time = estimated_time;
}
