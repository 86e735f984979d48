use std::collections::BTreeMap;

use askama::Template;
use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use platewise_forms::schema::{self, Category, FieldKind};
use platewise_forms::{Generated, Requirements, WizardSession};
use platewise_shared::{AuthData, AuthUser};

use crate::auth::MaybeUser;
use crate::error::AppError;
use crate::routes::{AppState, Flash};
use crate::session;

#[derive(Template)]
#[template(path = "pages/wizard.html")]
pub struct WizardTemplate {
    pub user: Option<AuthUser>,
    pub category: String,
    pub category_label: &'static str,
    pub steps: Vec<StepMarker>,
    pub step_number: usize,
    pub step_count: usize,
    pub step_title: &'static str,
    pub fields: Vec<FieldView>,
    pub is_first: bool,
    pub is_last: bool,
    pub flash: Option<Flash>,
}

pub struct StepMarker {
    pub title: &'static str,
    pub state: &'static str,
}

pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub kind: &'static str,
    pub text_value: String,
    pub toggled: bool,
    pub options: Vec<ChoiceView>,
    pub items: Vec<String>,
}

pub struct ChoiceView {
    pub value: &'static str,
    pub selected: bool,
}

fn field_view(wizard: &WizardSession, field: &'static schema::FieldDescriptor) -> FieldView {
    let form = &wizard.form;
    let mut view = FieldView {
        key: field.key,
        label: field.label,
        description: field.description,
        kind: field.kind.as_ref(),
        text_value: String::new(),
        toggled: false,
        options: Vec::new(),
        items: Vec::new(),
    };

    match field.kind {
        FieldKind::Text => {
            view.text_value = form.text(field.key).unwrap_or_default().to_owned();
        }
        FieldKind::Number => {
            view.text_value = form
                .number(field.key)
                .map(|value| value.to_string())
                .unwrap_or_default();
        }
        FieldKind::Boolean => {
            view.toggled = form.toggled(field.key);
        }
        FieldKind::Select => {
            let current = form.choice(field.key).unwrap_or_default();
            view.options = schema::options_for(field.key)
                .unwrap_or_default()
                .iter()
                .map(|value| ChoiceView {
                    value,
                    selected: *value == current,
                })
                .collect();
        }
        FieldKind::ListOfStrings => {
            view.items = form.items(field.key).to_vec();
        }
    }

    view
}

fn wizard_view(
    user: Option<AuthUser>,
    wizard: &WizardSession,
    flash: Option<Flash>,
) -> WizardTemplate {
    let category = wizard.category();
    let step_index = wizard.step();
    let steps = schema::steps(category)
        .iter()
        .enumerate()
        .map(|(index, step)| StepMarker {
            title: step.title,
            state: if index < step_index {
                "done"
            } else if index == step_index {
                "active"
            } else {
                "todo"
            },
        })
        .collect();

    WizardTemplate {
        user,
        category: category.to_string(),
        category_label: category.label(),
        steps,
        step_number: step_index + 1,
        step_count: wizard.step_count(),
        step_title: wizard.current_step().title,
        fields: wizard
            .current_step()
            .fields
            .iter()
            .map(|field| field_view(wizard, field))
            .collect(),
        is_first: step_index == 0,
        is_last: wizard.is_last_step(),
        flash: flash.or_else(|| wizard.last_error().map(Flash::error)),
    }
}

pub async fn page(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
    Path((category,)): Path<(String,)>,
) -> Result<Response, AppError> {
    let category = Category::parse(&category)?;
    let (session_id, jar) = session::ensure_session(jar);
    let auth_user = user.map(|auth| auth.user);

    let template = app.sessions.with(&session_id, |state| {
        let wizard = match &mut state.wizard {
            Some(wizard) if wizard.category() == category && wizard.is_collecting() => wizard,
            slot => slot.insert(WizardSession::new(category)),
        };
        wizard_view(auth_user, wizard, None)
    });

    Ok((jar, Html(template.render()?)).into_response())
}

enum MutationOutcome {
    Page(Box<WizardTemplate>),
    Submit(Requirements),
    Restart,
}

fn restart(category: Category) -> Response {
    Redirect::to(&format!("/plan/{category}")).into_response()
}

/// Folds the posted scalar values (text, number, select) into the form.
/// Keys without a matching scalar descriptor are control parameters of the
/// posting button and are skipped. A rejected value stops the fold and is
/// reported; everything applied before it sticks.
fn apply_scalar_inputs(
    wizard: &mut WizardSession,
    category: Category,
    values: &BTreeMap<String, String>,
) -> Option<Flash> {
    for (key, raw) in values {
        let Some(field) = schema::descriptor(category, key) else {
            continue;
        };
        if !matches!(
            field.kind,
            FieldKind::Text | FieldKind::Number | FieldKind::Select
        ) {
            continue;
        }
        match wizard.form.clone().apply_input(field, raw) {
            Ok(updated) => wizard.form = updated,
            Err(err) => return Some(Flash::error(err.to_string())),
        }
    }
    None
}

/// Applies the posted scalar values, then runs `mutate` against the
/// session's wizard and renders the resulting step. Requests arriving
/// without a live wizard bounce back to the wizard start. A scalar value
/// rejection skips `mutate` and surfaces the rejection instead.
fn mutate_wizard(
    app: &AppState,
    session_id: &str,
    category: Category,
    auth_user: Option<AuthUser>,
    values: &BTreeMap<String, String>,
    mutate: impl FnOnce(&mut WizardSession) -> Option<Flash>,
) -> MutationOutcome {
    app.sessions.with(session_id, |state| {
        let Some(wizard) = state
            .wizard
            .as_mut()
            .filter(|wizard| wizard.category() == category && wizard.is_collecting())
        else {
            return MutationOutcome::Restart;
        };

        let flash = match apply_scalar_inputs(wizard, category, values) {
            Some(flash) => Some(flash),
            None => mutate(wizard),
        };
        MutationOutcome::Page(Box::new(wizard_view(auth_user, wizard, flash)))
    })
}

pub async fn step_action(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
    Path((category,)): Path<(String,)>,
    Form(mut input): Form<BTreeMap<String, String>>,
) -> Result<Response, AppError> {
    let category = Category::parse(&category)?;
    let Some(session_id) = session::session_id(&jar) else {
        return Ok(restart(category));
    };
    let action = input.remove("action").unwrap_or_default();
    let auth_user = user.as_ref().map(|auth| auth.user.clone());

    let outcome = app.sessions.with(&session_id, |state| {
        let Some(wizard) = state
            .wizard
            .as_mut()
            .filter(|wizard| wizard.category() == category && wizard.is_collecting())
        else {
            return MutationOutcome::Restart;
        };

        if let Some(flash) = apply_scalar_inputs(wizard, category, &input) {
            return MutationOutcome::Page(Box::new(wizard_view(
                auth_user.clone(),
                wizard,
                Some(flash),
            )));
        }

        let flash = match action.as_str() {
            "next" => wizard.next().err().map(|err| Flash::error(err.to_string())),
            "back" => wizard.back().err().map(|err| Flash::error(err.to_string())),
            "submit" => match wizard.begin_submit() {
                Ok(requirements) => return MutationOutcome::Submit(requirements),
                Err(err) => Some(Flash::error(err.to_string())),
            },
            other => Some(Flash::error(format!("Unknown action: {other}"))),
        };

        MutationOutcome::Page(Box::new(wizard_view(auth_user.clone(), wizard, flash)))
    });

    match outcome {
        MutationOutcome::Restart => Ok(restart(category)),
        MutationOutcome::Page(template) => Ok(Html(template.render()?).into_response()),
        MutationOutcome::Submit(requirements) => {
            submit(app, session_id, category, user, requirements).await
        }
    }
}

/// Drives the generation call for a wizard that just entered Submitting.
/// Success shows the result; failure returns the wizard to the same step
/// with the backend message attached.
async fn submit(
    app: AppState,
    session_id: String,
    category: Category,
    user: Option<AuthData>,
    requirements: Requirements,
) -> Result<Response, AppError> {
    let token = user.as_ref().map(|auth| auth.token.as_str());
    let auth_user = user.as_ref().map(|auth| auth.user.clone());

    let generated = match &requirements {
        Requirements::SingleDish(requirements) => app
            .api
            .generate_single_dish(requirements, token)
            .await
            .map(Generated::Dish),
        Requirements::MealPlan(requirements) => app
            .api
            .generate_meal_plan(requirements, token)
            .await
            .map(Generated::MealPlan),
    };

    match generated {
        Ok(Generated::Dish(mut dish)) => {
            // Illustration is nice-to-have; a failure only gets logged.
            match app.api.generate_dish_image(&dish, token).await {
                Ok(url) => dish.image_url = Some(url),
                Err(err) => tracing::warn!(err = %err, "dish image generation failed"),
            }

            app.sessions.with(&session_id, |state| {
                if let Some(wizard) = state.wizard.as_mut() {
                    if let Err(err) = wizard.submit_succeeded(Generated::Dish(dish.clone())) {
                        tracing::warn!(err = %err, "wizard left Submitting mid-flight");
                    }
                }
                state.dish = Some(dish.clone());
            });

            Ok(Redirect::to("/dish").into_response())
        }
        Ok(Generated::MealPlan(plan)) => {
            app.sessions.with(&session_id, |state| {
                if let Some(wizard) = state.wizard.as_mut() {
                    if let Err(err) = wizard.submit_succeeded(Generated::MealPlan(plan.clone())) {
                        tracing::warn!(err = %err, "wizard left Submitting mid-flight");
                    }
                }
                state.plan = Some(plan.clone());
                state.replacement.cancel();
            });

            Ok(Redirect::to("/meal-plan").into_response())
        }
        Err(err) => {
            tracing::error!(err = %err, category = %category, "generation failed");

            let template = app.sessions.with(&session_id, |state| {
                let wizard = state.wizard.as_mut()?;
                if let Err(err) = wizard.submit_failed(err.to_string()) {
                    tracing::warn!(err = %err, "wizard left Submitting mid-flight");
                }
                Some(Box::new(wizard_view(auth_user.clone(), wizard, None)))
            });

            match template {
                Some(template) => Ok(Html(template.render()?).into_response()),
                None => Ok(restart(category)),
            }
        }
    }
}

pub async fn toggle_action(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
    Path((category, key)): Path<(String, String)>,
    Form(input): Form<BTreeMap<String, String>>,
) -> Result<Response, AppError> {
    let category = Category::parse(&category)?;
    let Some(session_id) = session::session_id(&jar) else {
        return Ok(restart(category));
    };
    let auth_user = user.map(|auth| auth.user);

    let outcome = mutate_wizard(&app, &session_id, category, auth_user, &input, |wizard| {
        match wizard.form.clone().toggle(&key) {
            Ok(updated) => {
                wizard.form = updated;
                None
            }
            Err(err) => Some(Flash::error(err.to_string())),
        }
    });

    match outcome {
        MutationOutcome::Page(template) => Ok(Html(template.render()?).into_response()),
        _ => Ok(restart(category)),
    }
}

pub async fn add_item_action(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
    Path((category, key)): Path<(String, String)>,
    Form(input): Form<BTreeMap<String, String>>,
) -> Result<Response, AppError> {
    let category = Category::parse(&category)?;
    let Some(session_id) = session::session_id(&jar) else {
        return Ok(restart(category));
    };
    let auth_user = user.map(|auth| auth.user);
    let text = input
        .get(&format!("new-{key}"))
        .cloned()
        .unwrap_or_default();

    let outcome = mutate_wizard(&app, &session_id, category, auth_user, &input, |wizard| {
        match wizard.form.clone().push_item(&key, &text) {
            Ok(updated) => {
                wizard.form = updated;
                None
            }
            Err(err) => Some(Flash::error(err.to_string())),
        }
    });

    match outcome {
        MutationOutcome::Page(template) => Ok(Html(template.render()?).into_response()),
        _ => Ok(restart(category)),
    }
}

pub async fn remove_item_action(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
    Path((category, key)): Path<(String, String)>,
    Form(input): Form<BTreeMap<String, String>>,
) -> Result<Response, AppError> {
    let category = Category::parse(&category)?;
    let Some(session_id) = session::session_id(&jar) else {
        return Ok(restart(category));
    };
    let auth_user = user.map(|auth| auth.user);
    let index = input.get("index").and_then(|raw| raw.parse::<usize>().ok());

    let outcome = mutate_wizard(&app, &session_id, category, auth_user, &input, |wizard| {
        let Some(index) = index else {
            return None;
        };
        match wizard.form.clone().remove_item(&key, index) {
            Ok(updated) => {
                wizard.form = updated;
                None
            }
            Err(err) => Some(Flash::error(err.to_string())),
        }
    });

    match outcome {
        MutationOutcome::Page(template) => Ok(Html(template.render()?).into_response()),
        _ => Ok(restart(category)),
    }
}
