use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::routes::cookbook::render_shopping;
use crate::routes::{AppState, Flash};
use crate::session;

#[derive(Deserialize)]
pub struct ToggleForm {
    pub list: usize,
    pub item: usize,
}

enum ToggleOutcome {
    /// Flipped locally; persist when the list has an id.
    Flipped { list_id: Option<String>, checked: bool },
    Missing,
}

/// Optimistic per-item check: the local state flips first, the backend is
/// told afterwards when the list is saved. A persistence failure reverts
/// the flip and reports it. Unsaved lists never cause a network call.
pub async fn toggle_action(
    State(app): State<AppState>,
    CurrentUser(auth): CurrentUser,
    jar: CookieJar,
    Form(input): Form<ToggleForm>,
) -> Result<Response, AppError> {
    let Some(session_id) = session::session_id(&jar) else {
        return Ok(Redirect::to("/cookbook?tab=shopping-lists").into_response());
    };

    let outcome = app.sessions.with(&session_id, |state| {
        let Some(item) = state
            .shopping_lists
            .get_mut(input.list)
            .and_then(|list| list.items.get_mut(input.item))
        else {
            return ToggleOutcome::Missing;
        };
        item.checked = !item.checked;
        let checked = item.checked;

        ToggleOutcome::Flipped {
            list_id: state.shopping_lists[input.list].id.clone(),
            checked,
        }
    });

    let flash = match outcome {
        ToggleOutcome::Missing => Some(Flash::error("That item no longer exists.")),
        ToggleOutcome::Flipped {
            list_id: None,
            checked: _,
        } => None,
        ToggleOutcome::Flipped {
            list_id: Some(list_id),
            checked,
        } => {
            match app
                .api
                .set_item_checked(&list_id, input.item, checked, &auth.token)
                .await
            {
                Ok(()) => None,
                Err(err) => {
                    tracing::error!(err = %err, list = list_id, "item check update failed");
                    app.sessions.with(&session_id, |state| {
                        if let Some(item) = state
                            .shopping_lists
                            .get_mut(input.list)
                            .and_then(|list| list.items.get_mut(input.item))
                        {
                            item.checked = !checked;
                        }
                    });
                    Some(Flash::error(err.to_string()))
                }
            }
        }
    };

    render_shopping(&app, &session_id, auth.user, flash)
}

#[derive(Deserialize)]
pub struct PinForm {
    pub list: usize,
}

/// Pin/unpin toggles the backend flag first and only then flips the local
/// state; a list without an id has nothing to pin, so the action is a
/// no-op.
pub async fn pin_action(
    State(app): State<AppState>,
    CurrentUser(auth): CurrentUser,
    jar: CookieJar,
    Form(input): Form<PinForm>,
) -> Result<Response, AppError> {
    let Some(session_id) = session::session_id(&jar) else {
        return Ok(Redirect::to("/cookbook?tab=shopping-lists").into_response());
    };

    let target = app.sessions.with(&session_id, |state| {
        state
            .shopping_lists
            .get(input.list)
            .and_then(|list| list.id.clone().map(|id| (id, list.is_pinned)))
    });

    let flash = match target {
        None => None,
        Some((list_id, is_pinned)) => {
            let result = if is_pinned {
                app.api.unpin_shopping_list(&list_id, &auth.token).await
            } else {
                app.api.pin_shopping_list(&list_id, &auth.token).await
            };

            match result {
                Ok(()) => {
                    app.sessions.with(&session_id, |state| {
                        if let Some(list) = state.shopping_lists.get_mut(input.list) {
                            list.is_pinned = !is_pinned;
                        }
                    });
                    None
                }
                Err(err) => {
                    tracing::error!(err = %err, list = list_id, "pin update failed");
                    Some(Flash::error(err.to_string()))
                }
            }
        }
    };

    render_shopping(&app, &session_id, auth.user, flash)
}
