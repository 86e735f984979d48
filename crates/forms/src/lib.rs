pub mod error;
pub mod payload;
pub mod schema;
pub mod state;
pub mod wizard;

pub use error::{FormsError, WizardError};
pub use payload::{Requirements, meal_plan_requirements, single_dish_requirements};
pub use schema::{Category, FieldDescriptor, FieldKind, StepDescriptor};
pub use state::{FieldValue, FormState};
pub use wizard::{Generated, Phase, WizardSession};
