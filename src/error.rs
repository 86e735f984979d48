use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use platewise_client::ApiError;
use platewise_forms::{FormsError, WizardError};
use platewise_mealplan::ReplaceError;
use platewise_shared::AuthUser;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Forms(#[from] FormsError),

    #[error("{0}")]
    Wizard(#[from] WizardError),

    #[error("{0}")]
    Replace(#[from] ReplaceError),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("There is no result to show yet")]
    NothingToShow,
}

#[derive(Template)]
#[template(path = "pages/error.html")]
pub struct ErrorPageTemplate {
    pub user: Option<AuthUser>,
    pub status_code: u16,
    pub error_title: String,
    pub error_message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_display = self.to_string();
        let (status_code, error_title, error_message) = match self {
            AppError::Api(err) => {
                tracing::error!(err = %err, "backend call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Backend Unavailable".to_string(),
                    err.to_string(),
                )
            }
            AppError::Forms(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid Input".to_string(),
                err.to_string(),
            ),
            AppError::Wizard(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid Action".to_string(),
                err.to_string(),
            ),
            AppError::Replace(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid Action".to_string(),
                err.to_string(),
            ),
            AppError::Template(err) => {
                tracing::error!(err = %err, "template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(err = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::NothingToShow => (
                StatusCode::NOT_FOUND,
                "Nothing Here Yet".to_string(),
                "Generate a recipe or a meal plan first.".to_string(),
            ),
        };

        let template = ErrorPageTemplate {
            user: None,
            status_code: status_code.as_u16(),
            error_title,
            error_message,
        };

        match template.render() {
            Ok(html) => (status_code, Html(html)).into_response(),
            Err(err) => {
                tracing::error!("Failed to render error page: {:?}", err);
                (status_code, format!("An error occurred: {}", error_display)).into_response()
            }
        }
    }
}
