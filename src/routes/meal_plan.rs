use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use platewise_shared::{AuthData, AuthUser, Dish, MealPlan, ReplacementTarget};

use crate::auth::MaybeUser;
use crate::error::AppError;
use crate::routes::{AppState, Flash};
use crate::session;

#[derive(Template)]
#[template(path = "pages/meal_plan.html")]
pub struct MealPlanTemplate {
    pub user: Option<AuthUser>,
    pub plan: MealPlan,
    pub contiguous: bool,
    pub can_save: bool,
    pub preview: Option<PreviewView>,
    pub flash: Option<Flash>,
}

pub struct PreviewView {
    pub day: u32,
    pub meal_type: String,
    pub loading: bool,
    pub old: Dish,
    pub new: Option<Dish>,
}

/// Renders the plan currently held by the session, or reports that there is
/// nothing to show. The day grid fails closed on non-contiguous day
/// numbers.
fn plan_view(
    app: &AppState,
    session_id: &str,
    user: Option<AuthUser>,
    flash: Option<Flash>,
) -> Result<MealPlanTemplate, AppError> {
    let (plan, preview) = app
        .sessions
        .with(session_id, |state| {
            state.plan.clone().map(|plan| {
                let preview = state.replacement.preview().map(|preview| PreviewView {
                    day: preview.day,
                    meal_type: preview.meal_type.to_string(),
                    loading: preview.loading,
                    old: preview.old_dish.clone(),
                    new: preview.new_dish.clone(),
                });
                (plan, preview)
            })
        })
        .ok_or(AppError::NothingToShow)?;

    let contiguous = plan.days_are_contiguous();
    let can_save = user.is_some() && !plan.is_saved();

    Ok(MealPlanTemplate {
        user,
        plan,
        contiguous,
        can_save,
        preview,
        flash,
    })
}

pub async fn page(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let session_id = session::session_id(&jar).ok_or(AppError::NothingToShow)?;
    let template = plan_view(&app, &session_id, user.map(|auth| auth.user), None)?;
    Ok(Html(template.render()?).into_response())
}

pub async fn save_action(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let session_id = session::session_id(&jar).ok_or(AppError::NothingToShow)?;
    let plan = app
        .sessions
        .with(&session_id, |state| state.plan.clone())
        .ok_or(AppError::NothingToShow)?;

    let Some(auth) = user else {
        let template = plan_view(
            &app,
            &session_id,
            None,
            Some(Flash::error("Sign in to save meal plans.")),
        )?;
        return Ok(Html(template.render()?).into_response());
    };

    if plan.is_saved() {
        let template = plan_view(&app, &session_id, Some(auth.user), None)?;
        return Ok(Html(template.render()?).into_response());
    }

    let flash = match app
        .api
        .save_meal_plan(&plan, &auth.user.id, &auth.token)
        .await
    {
        Ok(saved) => {
            app.sessions.with(&session_id, |state| {
                state.plan = Some(saved);
            });
            Flash::success("Meal plan saved to your cookbook.")
        }
        Err(err) => {
            tracing::error!(err = %err, "saving meal plan failed");
            Flash::error(err.to_string())
        }
    };

    let template = plan_view(&app, &session_id, Some(auth.user), Some(flash))?;
    Ok(Html(template.render()?).into_response())
}

/// Issues the replacement generation for a begun or retried preview and
/// records the outcome. The preview survives only on success.
async fn run_generation(
    app: &AppState,
    session_id: &str,
    target: ReplacementTarget,
    user: &Option<AuthData>,
) -> Option<Flash> {
    let token = user.as_ref().map(|auth| auth.token.as_str());

    match app.api.generate_replacement(&target, token).await {
        Ok(dish) => {
            app.sessions.with(session_id, |state| {
                if let Err(err) = state.replacement.loaded(dish) {
                    // The preview was cancelled while the call was in
                    // flight; the late result is dropped.
                    tracing::debug!(err = %err, "discarding late replacement result");
                }
            });
            None
        }
        Err(err) => {
            tracing::error!(err = %err, "replacement generation failed");
            app.sessions.with(session_id, |state| {
                state.replacement.failed();
            });
            Some(Flash::error(err.to_string()))
        }
    }
}

pub async fn replace_action(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
    Path((day, meal)): Path<(u32, usize)>,
) -> Result<Response, AppError> {
    let session_id = session::session_id(&jar).ok_or(AppError::NothingToShow)?;

    let begun = app.sessions.with(&session_id, |state| {
        let plan = state.plan.as_ref()?;
        Some(state.replacement.begin(plan, day, meal))
    });

    let flash = match begun.ok_or(AppError::NothingToShow)? {
        Ok(target) => run_generation(&app, &session_id, target, &user).await,
        Err(err) => Some(Flash::error(err.to_string())),
    };

    let template = plan_view(&app, &session_id, user.map(|auth| auth.user), flash)?;
    Ok(Html(template.render()?).into_response())
}

pub async fn retry_action(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let session_id = session::session_id(&jar).ok_or(AppError::NothingToShow)?;

    let retried = app
        .sessions
        .with(&session_id, |state| state.replacement.retry());

    let flash = match retried {
        Ok(target) => run_generation(&app, &session_id, target, &user).await,
        Err(err) => Some(Flash::error(err.to_string())),
    };

    let template = plan_view(&app, &session_id, user.map(|auth| auth.user), flash)?;
    Ok(Html(template.render()?).into_response())
}

pub async fn cancel_action(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let session_id = session::session_id(&jar).ok_or(AppError::NothingToShow)?;

    app.sessions.with(&session_id, |state| {
        state.replacement.cancel();
    });

    let template = plan_view(&app, &session_id, user.map(|auth| auth.user), None)?;
    Ok(Html(template.render()?).into_response())
}

enum AcceptOutcome {
    Applied {
        plan_id: Option<String>,
        plan: MealPlan,
    },
    Rejected(String),
    NoPlan,
}

pub async fn accept_action(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let session_id = session::session_id(&jar).ok_or(AppError::NothingToShow)?;

    let outcome = app.sessions.with(&session_id, |state| {
        let Some(plan) = state.plan.as_mut() else {
            return AcceptOutcome::NoPlan;
        };
        match state.replacement.accept(plan) {
            Ok(()) => AcceptOutcome::Applied {
                plan_id: plan.id.clone(),
                plan: plan.clone(),
            },
            Err(err) => AcceptOutcome::Rejected(err.to_string()),
        }
    });

    let flash = match outcome {
        AcceptOutcome::NoPlan => return Err(AppError::NothingToShow),
        AcceptOutcome::Rejected(message) => Some(Flash::error(message)),
        AcceptOutcome::Applied { plan_id, plan } => match (plan_id, &user) {
            (Some(plan_id), Some(auth)) => {
                // Persistence failure is surfaced but never rolls back the
                // local mutation; the session's copy stays authoritative.
                match app
                    .api
                    .update_meal_plan(&plan_id, &plan, &auth.token)
                    .await
                {
                    Ok(()) => Some(Flash::success("Meal replaced and plan updated.")),
                    Err(err) => {
                        tracing::error!(err = %err, plan_id, "meal plan update failed");
                        Some(Flash::error(format!(
                            "Meal replaced locally, but updating the saved plan failed: {err}"
                        )))
                    }
                }
            }
            _ => Some(Flash::success("Meal replaced.")),
        },
    };

    let template = plan_view(&app, &session_id, user.map(|auth| auth.user), flash)?;
    Ok(Html(template.render()?).into_response())
}
