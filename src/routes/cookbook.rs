use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use platewise_shared::{AuthData, AuthUser, Dish, MealPlan, ShoppingList};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::routes::{AppState, Flash};
use crate::session;

#[derive(Template)]
#[template(path = "pages/cookbook.html")]
pub struct CookbookTemplate {
    pub user: Option<AuthUser>,
    pub tab: String,
    pub recipes: Vec<Dish>,
    pub meal_plans: Vec<MealPlan>,
    pub shopping_lists: Vec<ShoppingListView>,
    pub flash: Option<Flash>,
}

pub struct ShoppingListView {
    pub index: usize,
    pub title: String,
    pub has_id: bool,
    pub is_pinned: bool,
    pub shopping_day: u32,
    pub valid_label: String,
    pub checked: usize,
    pub total: usize,
    pub progress_percent: u32,
    pub groups: Vec<GroupView>,
}

pub struct GroupView {
    pub category: String,
    pub items: Vec<ItemView>,
}

pub struct ItemView {
    pub index: usize,
    pub ingredient: String,
    pub checked: bool,
    pub use_by: u32,
    pub shelf_life: u32,
}

fn empty_template(user: AuthUser, tab: &str, flash: Option<Flash>) -> CookbookTemplate {
    CookbookTemplate {
        user: Some(user),
        tab: tab.to_owned(),
        recipes: Vec::new(),
        meal_plans: Vec::new(),
        shopping_lists: Vec::new(),
        flash,
    }
}

fn shopping_list_view(index: usize, list: &ShoppingList) -> ShoppingListView {
    let checked = list.checked_count();
    let total = list.items.len();
    let valid_label = match (list.valid_for_days.first(), list.valid_for_days.last()) {
        (Some(first), Some(last)) if first != last => format!("Days {first}-{last}"),
        (Some(first), _) => format!("Day {first}"),
        _ => String::new(),
    };

    ShoppingListView {
        index,
        title: list
            .meal_plan_title
            .clone()
            .unwrap_or_else(|| "Shopping List".to_owned()),
        has_id: list.is_saved(),
        is_pinned: list.is_pinned,
        shopping_day: list.shopping_day,
        valid_label,
        checked,
        total,
        progress_percent: if total == 0 {
            0
        } else {
            (checked * 100 / total) as u32
        },
        groups: list
            .grouped_by_category()
            .into_iter()
            .map(|(category, items)| GroupView {
                category: category.to_owned(),
                items: items
                    .into_iter()
                    .map(|(index, item)| ItemView {
                        index,
                        ingredient: item.ingredient.clone(),
                        checked: item.checked,
                        use_by: item.used_in_days.iter().copied().max().unwrap_or_default(),
                        shelf_life: item.estimated_shelf_life,
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Renders the shopping tab from the lists the session already holds,
/// without refetching. Check/pin actions render through this so a local
/// toggle on an unsaved list never causes a backend call.
pub fn render_shopping(
    app: &AppState,
    session_id: &str,
    user: AuthUser,
    flash: Option<Flash>,
) -> Result<Response, AppError> {
    let views = app.sessions.with(session_id, |state| {
        state
            .shopping_lists
            .iter()
            .enumerate()
            .map(|(index, list)| shopping_list_view(index, list))
            .collect::<Vec<_>>()
    });

    let template = CookbookTemplate {
        shopping_lists: views,
        ..empty_template(user, "shopping-lists", flash)
    };
    Ok(Html(template.render()?).into_response())
}

#[derive(Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}

pub async fn page(
    State(app): State<AppState>,
    CurrentUser(auth): CurrentUser,
    jar: CookieJar,
    Query(query): Query<TabQuery>,
) -> Result<Response, AppError> {
    let tab = query.tab.as_deref().unwrap_or("recipes");

    match tab {
        "meal-plans" => meal_plans_tab(&app, auth, None).await,
        "shopping-lists" => {
            let (session_id, jar) = session::ensure_session(jar);
            let flash = match app
                .api
                .shopping_lists_by_user(&auth.user.id, &auth.token)
                .await
            {
                Ok(lists) => {
                    app.sessions.with(&session_id, |state| {
                        state.shopping_lists = lists;
                    });
                    None
                }
                Err(err) => {
                    tracing::error!(err = %err, "loading shopping lists failed");
                    Some(Flash::error(err.to_string()))
                }
            };
            let page = render_shopping(&app, &session_id, auth.user, flash)?;
            Ok((jar, page).into_response())
        }
        _ => recipes_tab(&app, auth, None).await,
    }
}

pub async fn open_recipe(
    State(app): State<AppState>,
    CurrentUser(auth): CurrentUser,
    jar: CookieJar,
    Path((id,)): Path<(String,)>,
) -> Result<Response, AppError> {
    let dish = app.api.recipe(&id, &auth.token).await?;

    let (session_id, jar) = session::ensure_session(jar);
    app.sessions.with(&session_id, |state| {
        state.dish = Some(dish.clone());
    });

    Ok((jar, Redirect::to("/dish")).into_response())
}

pub async fn open_meal_plan(
    State(app): State<AppState>,
    CurrentUser(auth): CurrentUser,
    jar: CookieJar,
    Path((id,)): Path<(String,)>,
) -> Result<Response, AppError> {
    let plan = app.api.meal_plan(&id, &auth.token).await?;

    let (session_id, jar) = session::ensure_session(jar);
    app.sessions.with(&session_id, |state| {
        state.plan = Some(plan.clone());
        state.replacement.cancel();
    });

    Ok((jar, Redirect::to("/meal-plan")).into_response())
}

async fn recipes_tab(app: &AppState, auth: AuthData, flash: Option<Flash>) -> Result<Response, AppError> {
    let (recipes, flash) = match app.api.recipes_by_user(&auth.user.id, &auth.token).await {
        Ok(recipes) => (recipes, flash),
        Err(err) => {
            tracing::error!(err = %err, "loading saved recipes failed");
            (Vec::new(), Some(Flash::error(err.to_string())))
        }
    };
    let template = CookbookTemplate {
        recipes,
        ..empty_template(auth.user, "recipes", flash)
    };
    Ok(Html(template.render()?).into_response())
}

async fn meal_plans_tab(
    app: &AppState,
    auth: AuthData,
    flash: Option<Flash>,
) -> Result<Response, AppError> {
    let (meal_plans, flash) = match app.api.meal_plans_by_user(&auth.user.id, &auth.token).await {
        Ok(plans) => (plans, flash),
        Err(err) => {
            tracing::error!(err = %err, "loading saved meal plans failed");
            (Vec::new(), Some(Flash::error(err.to_string())))
        }
    };
    let template = CookbookTemplate {
        meal_plans,
        ..empty_template(auth.user, "meal-plans", flash)
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn delete_recipe(
    State(app): State<AppState>,
    CurrentUser(auth): CurrentUser,
    Path((id,)): Path<(String,)>,
) -> Result<Response, AppError> {
    let flash = match app.api.delete_recipe(&id, &auth.token).await {
        Ok(()) => Flash::success("Recipe deleted."),
        Err(err) => {
            tracing::error!(err = %err, recipe = id, "deleting recipe failed");
            Flash::error(err.to_string())
        }
    };

    recipes_tab(&app, auth, Some(flash)).await
}

pub async fn delete_meal_plan(
    State(app): State<AppState>,
    CurrentUser(auth): CurrentUser,
    Path((id,)): Path<(String,)>,
) -> Result<Response, AppError> {
    let flash = match app.api.delete_meal_plan(&id, &auth.token).await {
        Ok(()) => Flash::success("Meal plan deleted."),
        Err(err) => {
            tracing::error!(err = %err, plan = id, "deleting meal plan failed");
            Flash::error(err.to_string())
        }
    };

    meal_plans_tab(&app, auth, Some(flash)).await
}
