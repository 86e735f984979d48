use askama::Template;
use axum::response::{Html, IntoResponse};
use platewise_shared::AuthUser;

use crate::auth::MaybeUser;
use crate::error::AppError;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub user: Option<AuthUser>,
}

pub async fn page(MaybeUser(user): MaybeUser) -> Result<impl IntoResponse, AppError> {
    let template = HomeTemplate {
        user: user.map(|auth| auth.user),
    };
    Ok(Html(template.render()?))
}
