//! Saved results browsing, saving, and deletion.

mod helpers;

use axum::extract::Json as ExtractJson;
use axum::http::StatusCode;
use axum::routing::{delete, get as axum_get, post};
use axum::{Json, Router};
use helpers::{Cookies, app_for, get, post_form, sign_in, spawn_backend};
use platewise_shared::{Dish, Macros};

fn saved_dish(id: &str, title: &str) -> Dish {
    Dish {
        id: Some(id.to_string()),
        title: title.to_string(),
        cuisine: "Italian".to_string(),
        description: "A classic".to_string(),
        ingredients: vec!["pasta".to_string()],
        instructions: vec!["Boil".to_string()],
        estimated_time: 25,
        servings: 2,
        calories: 610,
        macros: Macros {
            protein: 20,
            fat: 18,
            carbs: 80,
        },
        difficulty: Default::default(),
        image_url: None,
    }
}

#[tokio::test]
async fn cookbook_requires_sign_in() {
    let backend = spawn_backend(Router::new()).await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();

    let (status, _) = get(&app, &mut cookies, "/cookbook").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(backend.recorded().is_empty());
}

#[tokio::test]
async fn saved_recipes_are_listed() {
    let backend = spawn_backend(Router::new().route(
        "/recipe/by-user/u-1",
        axum_get(|| async { Json(vec![saved_dish("r-1", "Cacio e pepe")]) }),
    ))
    .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();
    sign_in(&mut cookies);

    let (status, body) = get(&app, &mut cookies, "/cookbook").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Cacio e pepe"));
    assert!(body.contains("/cookbook/recipes/r-1"));
}

#[tokio::test]
async fn deleting_a_recipe_hits_the_backend_and_rerenders_the_listing() {
    let backend = spawn_backend(
        Router::new()
            .route(
                "/recipe/by-user/u-1",
                axum_get(|| async { Json(Vec::<Dish>::new()) }),
            )
            .route(
                "/recipe/{id}",
                delete(|| async { Json(serde_json::json!({"ok": true})) }),
            ),
    )
    .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();
    sign_in(&mut cookies);

    let (status, body) = post_form(&app, &mut cookies, "/cookbook/recipes/r-9/delete", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Recipe deleted."));
    assert_eq!(backend.count_of("DELETE", "/recipe/r-9"), 1);
}

#[tokio::test]
async fn opening_a_saved_recipe_shows_it_with_save_disabled() {
    let backend = spawn_backend(Router::new().route(
        "/recipe/{id}",
        axum_get(|| async { Json(saved_dish("r-1", "Cacio e pepe")) }),
    ))
    .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();
    sign_in(&mut cookies);

    let (status, _) = get(&app, &mut cookies, "/cookbook/recipes/r-1").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, body) = get(&app, &mut cookies, "/dish").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Cacio e pepe"));
    assert!(body.contains("Saved"), "a persisted dish cannot be re-saved");
}

#[tokio::test]
async fn saving_a_generated_dish_is_idempotent() {
    let generated = Dish {
        id: None,
        ..saved_dish("unused", "Fresh carbonara")
    };
    let backend = spawn_backend(
        Router::new()
            .route(
                "/openai/single-dish-default",
                post(move || {
                    let dish = generated.clone();
                    async move { Json(dish) }
                }),
            )
            .route(
                "/openai/single-dish-image",
                post(|| async { Json(serde_json::json!({"url": "https://img.example/c.png"})) }),
            )
            .route(
                "/recipe",
                post(|ExtractJson(mut body): ExtractJson<serde_json::Value>| async move {
                    assert_eq!(body["userId"], "u-1");
                    body["id"] = serde_json::json!("r-42");
                    body.as_object_mut().map(|map| map.remove("userId"));
                    Json(body)
                }),
            ),
    )
    .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();
    sign_in(&mut cookies);

    // Generate a dish through the wizard.
    let _ = get(&app, &mut cookies, "/plan/single-dish").await;
    for _ in 0..3 {
        let _ = post_form(
            &app,
            &mut cookies,
            "/plan/single-dish/step",
            &[("action", "next")],
        )
        .await;
    }
    let _ = post_form(
        &app,
        &mut cookies,
        "/plan/single-dish/step",
        &[("action", "submit")],
    )
    .await;

    let (status, body) = post_form(&app, &mut cookies, "/dish/save", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Recipe saved to your cookbook."));
    assert!(body.contains("Saved"));

    // A second save finds the id already present and stays local.
    let (status, _) = post_form(&app, &mut cookies, "/dish/save", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.count_of("POST", "/recipe"), 1);
}
