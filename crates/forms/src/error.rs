use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormsError {
    #[error("Unknown requirement category: {0}")]
    UnknownCategory(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("\"{input}\" is not a valid number")]
    InvalidNumber { input: String },

    #[error("\"{input}\" is not an option for {key}")]
    InvalidChoice { key: String, input: String },

    #[error("Field {key} is not a {expected} field")]
    KindMismatch {
        key: String,
        expected: &'static str,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("{action} is not valid in the current wizard state")]
    InvalidTransition { action: &'static str },
}

impl WizardError {
    pub fn invalid(action: &'static str) -> Self {
        Self::InvalidTransition { action }
    }
}
