//! The dish replacement cycle driven through the web layer.

mod helpers;

use axum::http::StatusCode;
use axum::routing::{get as axum_get, post, put};
use axum::{Json, Router};
use helpers::{Cookies, app_for, get, post_form, sign_in, spawn_backend};
use platewise_shared::{DayPlan, DayTotals, Dish, Macros, Meal, MealPlan, MealType};

fn dish(title: &str, calories: u32, time: u32) -> Dish {
    Dish {
        title: title.to_string(),
        calories,
        estimated_time: time,
        servings: 1,
        macros: Macros {
            protein: 30,
            fat: 10,
            carbs: 45,
        },
        ..Default::default()
    }
}

fn saved_plan() -> MealPlan {
    MealPlan {
        id: Some("mp-1".to_string()),
        title: "Mediterranean week".to_string(),
        description: "Two easy days".to_string(),
        days: 2,
        meals_per_day: 1,
        servings: 1,
        daily_targets: None,
        plan: vec![
            DayPlan {
                day: 1,
                estimated_time: 20,
                totals: DayTotals {
                    calories: 400,
                    protein: 30,
                    fat: 10,
                    carbs: 45,
                },
                meals: vec![Meal {
                    meal_type: MealType::Lunch,
                    dish: dish("Lentil soup", 400, 20),
                }],
            },
            DayPlan {
                day: 2,
                estimated_time: 35,
                totals: DayTotals {
                    calories: 600,
                    protein: 30,
                    fat: 10,
                    carbs: 45,
                },
                meals: vec![Meal {
                    meal_type: MealType::Dinner,
                    dish: dish("Chicken curry", 600, 35),
                }],
            },
        ],
    }
}

/// Stub backend: the saved plan, a replacement generator, and a PUT
/// handler for the plan update supplied by each test.
fn backend_router(
    update: axum::routing::MethodRouter,
) -> Router {
    Router::new()
        .route(
            "/meal-plan/mp-1",
            axum_get(|| async { Json(saved_plan()) }).merge(update),
        )
        .route(
            "/openai/single-dish-replacement",
            post(|| async { Json(dish("Tofu stir fry", 520, 25)) }),
        )
}

async fn open_saved_plan(app: &axum::Router, cookies: &mut Cookies) {
    let (status, _) = get(app, cookies, "/cookbook/meal-plans/mp-1").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let (status, body) = get(app, cookies, "/meal-plan").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Lentil soup"));
}

#[tokio::test]
async fn preview_accept_updates_the_day_and_persists_the_plan() {
    let backend =
        spawn_backend(backend_router(put(|| async {
            Json(serde_json::json!({"ok": true}))
        })))
        .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();
    sign_in(&mut cookies);
    open_saved_plan(&app, &mut cookies).await;

    // Begin a replacement for day 1's only meal.
    let (status, body) = post_form(&app, &mut cookies, "/meal-plan/replace/1/0", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Tofu stir fry"), "preview shows the suggestion");
    assert!(body.contains("Lentil soup"), "old dish still in the plan");

    let (status, body) = post_form(&app, &mut cookies, "/meal-plan/replace/accept", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Tofu stir fry"));
    assert!(!body.contains("Lentil soup"), "old dish is gone after accept");
    // Day 1 totals recomputed from the new dish.
    assert!(body.contains("520 kcal"));
    // Day 2 untouched.
    assert!(body.contains("600 kcal"));
    assert!(body.contains("Chicken curry"));

    assert_eq!(backend.count_of("PUT", "/meal-plan/mp-1"), 1);
}

#[tokio::test]
async fn cancel_discards_the_preview_and_touches_nothing() {
    let backend =
        spawn_backend(backend_router(put(|| async {
            Json(serde_json::json!({"ok": true}))
        })))
        .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();
    sign_in(&mut cookies);
    open_saved_plan(&app, &mut cookies).await;

    let _ = post_form(&app, &mut cookies, "/meal-plan/replace/1/0", &[]).await;
    let (status, body) = post_form(&app, &mut cookies, "/meal-plan/replace/cancel", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Lentil soup"));
    assert!(!body.contains("Tofu stir fry"), "preview is gone");
    assert!(body.contains("400 kcal"), "totals unchanged");
    // No update call was made.
    assert_eq!(backend.count_of("PUT", "/meal-plan/mp-1"), 0);
}

#[tokio::test]
async fn failed_remote_update_keeps_the_local_mutation_and_reports_it() {
    let backend = spawn_backend(backend_router(put(|| async {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"message": "update exploded"})),
        )
    })))
    .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();
    sign_in(&mut cookies);
    open_saved_plan(&app, &mut cookies).await;

    let _ = post_form(&app, &mut cookies, "/meal-plan/replace/1/0", &[]).await;
    let (status, body) = post_form(&app, &mut cookies, "/meal-plan/replace/accept", &[]).await;

    assert_eq!(status, StatusCode::OK);
    // The failure is surfaced, the local swap is not rolled back.
    assert!(body.contains("update exploded"));
    assert!(body.contains("Tofu stir fry"));
    assert!(!body.contains("Lentil soup"));
    assert!(body.contains("520 kcal"));
}

#[tokio::test]
async fn retry_generates_again_before_accepting() {
    let backend =
        spawn_backend(backend_router(put(|| async {
            Json(serde_json::json!({"ok": true}))
        })))
        .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();
    sign_in(&mut cookies);
    open_saved_plan(&app, &mut cookies).await;

    let _ = post_form(&app, &mut cookies, "/meal-plan/replace/1/0", &[]).await;
    let (status, body) = post_form(&app, &mut cookies, "/meal-plan/replace/retry", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Tofu stir fry"));
    assert_eq!(
        backend.count_of("POST", "/openai/single-dish-replacement"),
        2
    );
}

#[tokio::test]
async fn failed_generation_drops_the_preview_and_reports_it() {
    let backend = spawn_backend(
        Router::new()
            .route("/meal-plan/mp-1", axum_get(|| async { Json(saved_plan()) }))
            .route(
                "/openai/single-dish-replacement",
                post(|| async {
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        Json(serde_json::json!({"message": "kitchen closed"})),
                    )
                }),
            ),
    )
    .await;
    let app = app_for(&backend);
    let mut cookies = Cookies::default();
    sign_in(&mut cookies);
    open_saved_plan(&app, &mut cookies).await;

    let (status, body) = post_form(&app, &mut cookies, "/meal-plan/replace/1/0", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("kitchen closed"));
    assert!(body.contains("Lentil soup"), "plan untouched");

    // With the preview gone, accept is an invalid transition.
    let (_, body) = post_form(&app, &mut cookies, "/meal-plan/replace/accept", &[]).await;
    assert!(body.contains("not valid without a pending replacement"));
}
