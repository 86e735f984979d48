use platewise_shared::{Dish, MealPlan};

use crate::error::WizardError;
use crate::payload::{self, Requirements};
use crate::schema::{self, Category, StepDescriptor};
use crate::state::FormState;

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Collecting,
    Submitting,
    ShowingDish(Dish),
    ShowingMealPlan(MealPlan),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Generated {
    Dish(Dish),
    MealPlan(MealPlan),
}

/// One multi-step requirement collection. Owns the step cursor, the answer
/// set, and the collect/submit/show phase; every transition is guarded so
/// an out-of-phase action surfaces as an error instead of corrupting state.
#[derive(Clone, Debug, PartialEq)]
pub struct WizardSession {
    category: Category,
    step: usize,
    pub form: FormState,
    phase: Phase,
    last_error: Option<String>,
}

impl WizardSession {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            step: 0,
            form: schema::default_state(category),
            phase: Phase::Collecting,
            last_error: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    pub fn step_count(&self) -> usize {
        schema::steps(self.category).len()
    }

    pub fn is_last_step(&self) -> bool {
        self.step + 1 == self.step_count()
    }

    pub fn current_step(&self) -> &'static StepDescriptor {
        &schema::steps(self.category)[self.step]
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.phase, Phase::Collecting)
    }

    pub fn next(&mut self) -> Result<(), WizardError> {
        if !self.is_collecting() || self.is_last_step() {
            return Err(WizardError::invalid("next"));
        }
        self.step += 1;
        self.last_error = None;
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), WizardError> {
        if !self.is_collecting() || self.step == 0 {
            return Err(WizardError::invalid("back"));
        }
        self.step -= 1;
        self.last_error = None;
        Ok(())
    }

    /// Enters Submitting and hands back the request payload. The caller
    /// performs the generation call and reports the outcome through
    /// [`WizardSession::submit_succeeded`] or [`WizardSession::submit_failed`].
    pub fn begin_submit(&mut self) -> Result<Requirements, WizardError> {
        if !self.is_collecting() || !self.is_last_step() {
            return Err(WizardError::invalid("submit"));
        }
        self.phase = Phase::Submitting;
        self.last_error = None;
        Ok(payload::requirements(self.category, &self.form))
    }

    pub fn submit_succeeded(&mut self, result: Generated) -> Result<(), WizardError> {
        if !matches!(self.phase, Phase::Submitting) {
            return Err(WizardError::invalid("submit_succeeded"));
        }
        self.phase = match result {
            Generated::Dish(dish) => Phase::ShowingDish(dish),
            Generated::MealPlan(plan) => Phase::ShowingMealPlan(plan),
        };
        Ok(())
    }

    /// Returns control to Collecting at the same step, carrying the failure
    /// message for display.
    pub fn submit_failed(&mut self, message: impl Into<String>) -> Result<(), WizardError> {
        if !matches!(self.phase, Phase::Submitting) {
            return Err(WizardError::invalid("submit_failed"));
        }
        self.phase = Phase::Collecting;
        self.last_error = Some(message.into());
        Ok(())
    }
}
