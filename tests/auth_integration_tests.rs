//! Login and registration flows against a stub auth backend.

mod helpers;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use helpers::{Cookies, app_for, get, post_form, spawn_backend};

#[tokio::test]
async fn rejected_login_surfaces_the_exact_message_and_sets_no_session() {
    let backend = spawn_backend(Router::new().route(
        "/auth/sign-in",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"message": "Invalid login credentials"})),
            )
        }),
    ))
    .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();

    let (status, body) = post_form(
        &app,
        &mut cookies,
        "/login",
        &[("email", "kim@example.com"), ("password", "wrong")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Invalid login credentials"));
    assert!(!cookies.contains("platewise_auth"));
}

#[tokio::test]
async fn successful_login_sets_the_auth_cookie_and_redirects_home() {
    let backend = spawn_backend(Router::new().route(
        "/auth/sign-in",
        post(|| async {
            Json(serde_json::json!({
                "user": {"id": "u-1", "username": "kim@example.com"},
                "token": "tok-1"
            }))
        }),
    ))
    .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();

    let (status, _) = post_form(
        &app,
        &mut cookies,
        "/login",
        &[("email", "kim@example.com"), ("password", "hunter2")],
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(cookies.contains("platewise_auth"));

    // The nav now greets the signed-in user.
    let (_, body) = get(&app, &mut cookies, "/").await;
    assert!(body.contains("kim@example.com"));
}

#[tokio::test]
async fn malformed_email_never_reaches_the_backend() {
    let backend = spawn_backend(Router::new()).await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();

    let (status, body) = post_form(
        &app,
        &mut cookies,
        "/login",
        &[("email", "not-an-email"), ("password", "hunter2")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Enter a valid e-mail address"));
    assert!(backend.recorded().is_empty());
    assert!(!cookies.contains("platewise_auth"));
}

#[tokio::test]
async fn registration_uses_the_user_endpoint() {
    let backend = spawn_backend(Router::new().route(
        "/user",
        post(|| async {
            Json(serde_json::json!({
                "user": {"id": "u-2", "username": "new@example.com"},
                "token": "tok-2"
            }))
        }),
    ))
    .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();

    let (status, _) = post_form(
        &app,
        &mut cookies,
        "/register",
        &[("email", "new@example.com"), ("password", "hunter2")],
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(backend.count_of("POST", "/user"), 1);
    assert!(cookies.contains("platewise_auth"));
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let backend = spawn_backend(Router::new()).await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();
    helpers::sign_in(&mut cookies);

    let (status, _) = post_form(&app, &mut cookies, "/logout", &[]).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(!cookies.contains("platewise_auth"));
}
