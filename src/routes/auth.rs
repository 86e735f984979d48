use askama::Template;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use platewise_shared::AuthUser;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::auth::{MaybeUser, build_auth_cookie, clear_auth_cookie};
use crate::error::AppError;
use crate::routes::AppState;

#[derive(Template)]
#[template(path = "pages/auth.html")]
pub struct AuthTemplate {
    pub user: Option<AuthUser>,
    pub mode: &'static str,
    pub email: String,
    pub error: Option<String>,
}

/// Email format gates the backend call; nothing beyond format is checked
/// on this side.
#[derive(Deserialize, Validate)]
pub struct CredentialsForm {
    #[validate(email(message = "Enter a valid e-mail address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .filter_map(|error| error.message.as_ref())
        .map(|message| message.to_string())
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}

pub async fn login_page(MaybeUser(user): MaybeUser) -> Result<impl IntoResponse, AppError> {
    let template = AuthTemplate {
        user: user.map(|auth| auth.user),
        mode: "login",
        email: String::new(),
        error: None,
    };
    Ok(Html(template.render()?))
}

pub async fn login_action(
    State(app): State<AppState>,
    jar: CookieJar,
    Form(input): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = input.validate() {
        let template = AuthTemplate {
            user: None,
            mode: "login",
            email: input.email,
            error: Some(first_message(&errors)),
        };
        return Ok(Html(template.render()?).into_response());
    }

    match app.api.sign_in(&input.email, &input.password).await {
        Ok(auth) => {
            let cookie = build_auth_cookie(&auth)?;
            Ok((jar.add(cookie), Redirect::to("/")).into_response())
        }
        Err(err) => {
            // The backend message is rendered verbatim; no session is set.
            let template = AuthTemplate {
                user: None,
                mode: "login",
                email: input.email,
                error: Some(err.to_string()),
            };
            Ok(Html(template.render()?).into_response())
        }
    }
}

pub async fn register_page(MaybeUser(user): MaybeUser) -> Result<impl IntoResponse, AppError> {
    let template = AuthTemplate {
        user: user.map(|auth| auth.user),
        mode: "register",
        email: String::new(),
        error: None,
    };
    Ok(Html(template.render()?))
}

pub async fn register_action(
    State(app): State<AppState>,
    jar: CookieJar,
    Form(input): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = input.validate() {
        let template = AuthTemplate {
            user: None,
            mode: "register",
            email: input.email,
            error: Some(first_message(&errors)),
        };
        return Ok(Html(template.render()?).into_response());
    }

    match app.api.register(&input.email, &input.password).await {
        Ok(auth) => {
            let cookie = build_auth_cookie(&auth)?;
            Ok((jar.add(cookie), Redirect::to("/")).into_response())
        }
        Err(err) => {
            let template = AuthTemplate {
                user: None,
                mode: "register",
                email: input.email,
                error: Some(err.to_string()),
            };
            Ok(Html(template.render()?).into_response())
        }
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(clear_auth_cookie()), Redirect::to("/"))
}
