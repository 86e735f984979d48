use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use platewise_shared::{AuthUser, Dish};

use crate::auth::MaybeUser;
use crate::error::AppError;
use crate::routes::{AppState, Flash};
use crate::session;

#[derive(Template)]
#[template(path = "pages/dish.html")]
pub struct DishTemplate {
    pub user: Option<AuthUser>,
    pub dish: Dish,
    pub can_save: bool,
    pub flash: Option<Flash>,
}

fn dish_view(user: Option<AuthUser>, dish: Dish, flash: Option<Flash>) -> DishTemplate {
    let can_save = user.is_some() && !dish.is_saved();
    DishTemplate {
        user,
        dish,
        can_save,
        flash,
    }
}

pub async fn page(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let session_id = session::session_id(&jar).ok_or(AppError::NothingToShow)?;
    let dish = app
        .sessions
        .with(&session_id, |state| state.dish.clone())
        .ok_or(AppError::NothingToShow)?;

    let template = dish_view(user.map(|auth| auth.user), dish, None);
    Ok(Html(template.render()?).into_response())
}

/// Saving is idempotent at this layer: once the dish carries a persisted
/// id, further save requests change nothing.
pub async fn save_action(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let session_id = session::session_id(&jar).ok_or(AppError::NothingToShow)?;
    let dish = app
        .sessions
        .with(&session_id, |state| state.dish.clone())
        .ok_or(AppError::NothingToShow)?;

    let Some(auth) = user else {
        let template = dish_view(None, dish, Some(Flash::error("Sign in to save recipes.")));
        return Ok(Html(template.render()?).into_response());
    };

    if dish.is_saved() {
        let template = dish_view(Some(auth.user), dish, None);
        return Ok(Html(template.render()?).into_response());
    }

    match app.api.save_recipe(&dish, &auth.user.id, &auth.token).await {
        Ok(saved) => {
            app.sessions.with(&session_id, |state| {
                state.dish = Some(saved.clone());
            });
            let template = dish_view(
                Some(auth.user),
                saved,
                Some(Flash::success("Recipe saved to your cookbook.")),
            );
            Ok(Html(template.render()?).into_response())
        }
        Err(err) => {
            tracing::error!(err = %err, "saving recipe failed");
            let template = dish_view(Some(auth.user), dish, Some(Flash::error(err.to_string())));
            Ok(Html(template.render()?).into_response())
        }
    }
}
