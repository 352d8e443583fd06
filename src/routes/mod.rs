use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use plateful_recipe::Recipe;
use plateful_shared::{Difficulty, RecipeSource};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::middleware::auth_middleware;

mod auth;
mod favorites;
mod health;
mod history;
mod preferences;
mod recipes;
mod recommendations;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt_secret: String,
    /// Bearer-token lifetime in seconds.
    pub token_ttl: u64,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// One page of results plus the total count for the query.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Recipe as the API returns it: JSON-array columns decoded, enums typed.
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: String,
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    pub cooking_time_minutes: i64,
    pub servings: i64,
    pub difficulty: Difficulty,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cuisines: Vec<String>,
    pub tags: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub image_url: Option<String>,
    pub source: RecipeSource,
    pub calories: Option<i64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub popularity_score: f64,
    pub average_rating: f64,
    pub rating_count: i64,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl From<&Recipe> for RecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            user_id: recipe.user_id.clone(),
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            cooking_time_minutes: recipe.cooking_time_minutes,
            servings: recipe.servings,
            difficulty: recipe.difficulty(),
            ingredients: recipe.ingredient_list(),
            instructions: recipe.instruction_list(),
            cuisines: recipe.cuisine_list(),
            tags: recipe.tag_list(),
            dietary_restrictions: recipe.dietary_restriction_list(),
            image_url: recipe.image_url.clone(),
            source: recipe.source(),
            calories: recipe.calories,
            protein: recipe.protein,
            carbs: recipe.carbs,
            fat: recipe.fat,
            popularity_score: recipe.popularity_score,
            average_rating: recipe.average_rating,
            rating_count: recipe.rating_count,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// Assemble the application router. Health probes sit outside `/api/v1` and
/// skip auth; everything mutating or user-scoped sits behind the bearer
/// token middleware.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/recipes", get(recipes::list))
        .route("/recipes/{id}", get(recipes::detail))
        .route("/recipes/{id}/ratings", get(recipes::list_ratings))
        .route("/recipes/{id}/similar", get(recommendations::similar));

    let protected = Router::new()
        .route("/recipes", post(recipes::create))
        .route("/recipes/{id}", put(recipes::update).delete(recipes::remove))
        .route("/recipes/{id}/ratings", post(recipes::rate))
        .route("/user/recipes", get(recipes::own))
        .route("/favorites", get(favorites::list).post(favorites::add))
        .route("/favorites/{recipe_id}", delete(favorites::remove))
        .route("/history", get(history::list).post(history::create))
        .route("/history/{id}", put(history::update).delete(history::remove))
        .route(
            "/preferences",
            get(preferences::show).put(preferences::update),
        )
        .route("/recommendations", post(recommendations::recommend))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state.pool.clone())
        .merge(
            Router::new()
                .nest("/api/v1", public.merge(protected))
                .with_state(state),
        )
}
