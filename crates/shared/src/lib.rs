pub mod auth;
pub mod dish;
pub mod mealplan;
pub mod requirements;
pub mod shopping;

pub use auth::{AuthData, AuthUser};
pub use dish::{Difficulty, Dish, Macros, MealType};
pub use mealplan::{DailyTargets, DayPlan, DayTotals, Meal, MealPlan};
pub use requirements::{MealPlanRequirements, ReplacementTarget, SingleDishRequirements};
pub use shopping::{ShoppingList, ShoppingListItem};
