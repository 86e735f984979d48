use axum::{extract::FromRequestParts, http::request::Parts, response::Redirect};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use platewise_shared::AuthData;
use std::convert::Infallible;

const AUTH_COOKIE_NAME: &str = "platewise_auth";

/// The backend owns credentials; the client only keeps the returned session
/// in an HTTP-only cookie and replays the token on authenticated calls.
pub fn build_auth_cookie(auth: &AuthData) -> anyhow::Result<Cookie<'static>> {
    let encoded = URL_SAFE_NO_PAD.encode(serde_json::to_vec(auth)?);

    Ok(Cookie::build((AUTH_COOKIE_NAME, encoded))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build())
}

pub fn clear_auth_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

/// A cookie that fails to decode counts as signed out.
pub fn auth_from_jar(jar: &CookieJar) -> Option<AuthData> {
    let raw = jar.get(AUTH_COOKIE_NAME)?.value().to_owned();
    let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Signed-in user, or a redirect to the login page.
pub struct CurrentUser(pub AuthData);

impl FromRequestParts<crate::routes::AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::routes::AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login"))?;

        auth_from_jar(&jar)
            .map(CurrentUser)
            .ok_or(Redirect::to("/login"))
    }
}

/// Possibly-absent user. Actions that need an identifier treat `None` as
/// "render without the action", never as an error.
pub struct MaybeUser(pub Option<AuthData>);

impl FromRequestParts<crate::routes::AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::routes::AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(_) => return Ok(MaybeUser(None)),
        };

        Ok(MaybeUser(auth_from_jar(&jar)))
    }
}
