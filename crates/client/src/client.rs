use std::time::Duration;

use platewise_shared::{
    AuthData, Dish, MealPlan, MealPlanRequirements, ReplacementTarget, ShoppingList,
    SingleDishRequirements,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct ImageBody {
    url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveDishBody<'a> {
    #[serde(flatten)]
    dish: &'a Dish,
    user_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveMealPlanBody<'a> {
    #[serde(flatten)]
    plan: &'a MealPlan,
    user_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemCheckedBody {
    index: usize,
    checked: bool,
}

/// JSON client for the generation/persistence backend. Every request sets
/// `Content-Type: application/json`; authenticated calls carry the session
/// token as a bearer credential. Non-2xx responses surface the backend's
/// `{message}` body as the error text.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self { http, base_url })
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.base_url.join(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(ApiError::Transport)?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .bytes()
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
                .map(|body| body.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("HTTP {status}"));

            tracing::debug!(status = status.as_u16(), message, "backend rejected request");
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    async fn send_ok(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await.map_err(ApiError::Transport)?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .bytes()
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
                .map(|body| body.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("HTTP {status}"));

            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    pub async fn sign_in(&self, username: &str, password: &str) -> Result<AuthData, ApiError> {
        let builder = self
            .request(Method::POST, "/auth/sign-in", None)?
            .json(&Credentials { username, password });
        self.send(builder).await
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<AuthData, ApiError> {
        let builder = self
            .request(Method::POST, "/user", None)?
            .json(&Credentials { username, password });
        self.send(builder).await
    }

    pub async fn generate_single_dish(
        &self,
        requirements: &SingleDishRequirements,
        token: Option<&str>,
    ) -> Result<Dish, ApiError> {
        let builder = self
            .request(Method::POST, "/openai/single-dish-default", token)?
            .json(requirements);
        self.send(builder).await
    }

    pub async fn generate_dish_image(
        &self,
        dish: &Dish,
        token: Option<&str>,
    ) -> Result<String, ApiError> {
        let builder = self
            .request(Method::POST, "/openai/single-dish-image", token)?
            .json(dish);
        let body: ImageBody = self.send(builder).await?;
        Ok(body.url)
    }

    pub async fn generate_meal_plan(
        &self,
        requirements: &MealPlanRequirements,
        token: Option<&str>,
    ) -> Result<MealPlan, ApiError> {
        let builder = self
            .request(Method::POST, "/openai/meal-plan-default", token)?
            .json(requirements);
        self.send(builder).await
    }

    pub async fn generate_replacement(
        &self,
        target: &ReplacementTarget,
        token: Option<&str>,
    ) -> Result<Dish, ApiError> {
        let builder = self
            .request(Method::POST, "/openai/single-dish-replacement", token)?
            .json(target);
        self.send(builder).await
    }

    pub async fn save_recipe(
        &self,
        dish: &Dish,
        user_id: &str,
        token: &str,
    ) -> Result<Dish, ApiError> {
        let builder = self
            .request(Method::POST, "/recipe", Some(token))?
            .json(&SaveDishBody { dish, user_id });
        self.send(builder).await
    }

    pub async fn recipes_by_user(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Vec<Dish>, ApiError> {
        let builder = self.request(
            Method::GET,
            &format!("/recipe/by-user/{user_id}"),
            Some(token),
        )?;
        self.send(builder).await
    }

    pub async fn recipe(&self, id: &str, token: &str) -> Result<Dish, ApiError> {
        let builder = self.request(Method::GET, &format!("/recipe/{id}"), Some(token))?;
        self.send(builder).await
    }

    pub async fn delete_recipe(&self, id: &str, token: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/recipe/{id}"), Some(token))?;
        self.send_ok(builder).await
    }

    pub async fn save_meal_plan(
        &self,
        plan: &MealPlan,
        user_id: &str,
        token: &str,
    ) -> Result<MealPlan, ApiError> {
        let builder = self
            .request(Method::POST, "/meal-plan", Some(token))?
            .json(&SaveMealPlanBody { plan, user_id });
        self.send(builder).await
    }

    pub async fn meal_plans_by_user(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Vec<MealPlan>, ApiError> {
        let builder = self.request(
            Method::GET,
            &format!("/meal-plan/by-user/{user_id}"),
            Some(token),
        )?;
        self.send(builder).await
    }

    pub async fn meal_plan(&self, id: &str, token: &str) -> Result<MealPlan, ApiError> {
        let builder = self.request(Method::GET, &format!("/meal-plan/{id}"), Some(token))?;
        self.send(builder).await
    }

    /// Pushes the full recomputed plan after an accepted replacement.
    pub async fn update_meal_plan(
        &self,
        id: &str,
        plan: &MealPlan,
        token: &str,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/meal-plan/{id}"), Some(token))?
            .json(plan);
        self.send_ok(builder).await
    }

    pub async fn delete_meal_plan(&self, id: &str, token: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/meal-plan/{id}"), Some(token))?;
        self.send_ok(builder).await
    }

    pub async fn shopping_lists_by_user(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Vec<ShoppingList>, ApiError> {
        let builder = self.request(
            Method::GET,
            &format!("/shopping-list/by-user/{user_id}"),
            Some(token),
        )?;
        self.send(builder).await
    }

    pub async fn set_item_checked(
        &self,
        list_id: &str,
        index: usize,
        checked: bool,
        token: &str,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(
                Method::PATCH,
                &format!("/shopping-list/{list_id}/item"),
                Some(token),
            )?
            .json(&ItemCheckedBody { index, checked });
        self.send_ok(builder).await
    }

    pub async fn pin_shopping_list(&self, list_id: &str, token: &str) -> Result<(), ApiError> {
        let builder = self.request(
            Method::POST,
            &format!("/shopping-list/{list_id}/pin"),
            Some(token),
        )?;
        self.send_ok(builder).await
    }

    pub async fn unpin_shopping_list(&self, list_id: &str, token: &str) -> Result<(), ApiError> {
        let builder = self.request(
            Method::POST,
            &format!("/shopping-list/{list_id}/unpin"),
            Some(token),
        )?;
        self.send_ok(builder).await
    }
}
