use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use platewise_client::ApiClient;
use tower_http::trace::TraceLayer;

use crate::error::ErrorPageTemplate;
use crate::session::SessionStore;

mod auth;
mod cookbook;
mod dish;
mod health;
mod index;
mod meal_plan;
mod shopping;
mod wizard;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub api: ApiClient,
    pub sessions: SessionStore,
}

/// Dismissible notification rendered at the top of a page.
pub struct Flash {
    pub kind: &'static str,
    pub message: String,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success",
            message: message.into(),
        }
    }
}

pub async fn fallback() -> Response {
    let template = ErrorPageTemplate {
        user: None,
        status_code: 404,
        error_title: "Not Found".to_string(),
        error_message: "The page you are looking for does not exist.".to_string(),
    };

    match askama::Template::render(&template) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(err) => {
            tracing::error!("Failed to render 404 page: {:?}", err);
            (StatusCode::NOT_FOUND, "404 Not Found").into_response()
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route("/login", get(auth::login_page).post(auth::login_action))
        .route(
            "/register",
            get(auth::register_page).post(auth::register_action),
        )
        .route("/logout", post(auth::logout))
        .route("/plan/{category}", get(wizard::page))
        .route("/plan/{category}/step", post(wizard::step_action))
        .route("/plan/{category}/toggle/{key}", post(wizard::toggle_action))
        .route(
            "/plan/{category}/items/{key}/add",
            post(wizard::add_item_action),
        )
        .route(
            "/plan/{category}/items/{key}/remove",
            post(wizard::remove_item_action),
        )
        .route("/dish", get(dish::page))
        .route("/dish/save", post(dish::save_action))
        .route("/meal-plan", get(meal_plan::page))
        .route("/meal-plan/save", post(meal_plan::save_action))
        .route(
            "/meal-plan/replace/{day}/{meal}",
            post(meal_plan::replace_action),
        )
        .route("/meal-plan/replace/retry", post(meal_plan::retry_action))
        .route("/meal-plan/replace/cancel", post(meal_plan::cancel_action))
        .route("/meal-plan/replace/accept", post(meal_plan::accept_action))
        .route("/cookbook", get(cookbook::page))
        .route("/cookbook/recipes/{id}", get(cookbook::open_recipe))
        .route(
            "/cookbook/recipes/{id}/delete",
            post(cookbook::delete_recipe),
        )
        .route("/cookbook/meal-plans/{id}", get(cookbook::open_meal_plan))
        .route(
            "/cookbook/meal-plans/{id}/delete",
            post(cookbook::delete_meal_plan),
        )
        .route("/shopping/toggle", post(shopping::toggle_action))
        .route("/shopping/pin", post(shopping::pin_action))
        .route("/static/{*path}", get(crate::assets::serve))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
