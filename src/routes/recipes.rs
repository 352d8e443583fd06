use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use plateful_recipe::{
    store, CreateRecipeInput, RateRecipeInput, RecipeFilter, UpdateRecipeInput,
};
use plateful_shared::{Difficulty, RecipeSource};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::{default_page, default_per_page, AppState, Page, PageParams, RecipeResponse};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    pub source: Option<RecipeSource>,
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<String>,
    pub search: Option<String>,
}

/// GET /api/v1/recipes
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = RecipeFilter {
        source: params.source,
        difficulty: params.difficulty,
        cuisine: params.cuisine,
        search: params.search,
        user_id: None,
        page: params.page,
        per_page: params.per_page,
    };

    let (recipes, total) = store::list_recipes(&state.pool, &filter).await?;
    Ok(Json(Page {
        data: recipes.iter().map(RecipeResponse::from).collect(),
        page: params.page.max(1),
        per_page: params.per_page.clamp(1, 100),
        total,
    }))
}

/// GET /api/v1/user/recipes - the caller's own recipes.
pub async fn own(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = RecipeFilter {
        user_id: Some(auth.user_id),
        page: params.page,
        per_page: params.per_page,
        ..Default::default()
    };

    let (recipes, total) = store::list_recipes(&state.pool, &filter).await?;
    Ok(Json(Page {
        data: recipes.iter().map(RecipeResponse::from).collect(),
        page: params.page.max(1),
        per_page: params.per_page.clamp(1, 100),
        total,
    }))
}

/// GET /api/v1/recipes/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = store::get_recipe(&state.pool, &id).await?;
    Ok(Json(RecipeResponse::from(&recipe)))
}

/// POST /api/v1/recipes - create a recipe owned by the caller.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(input): Json<CreateRecipeInput>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = store::create_recipe(
        &state.pool,
        Some(&auth.user_id),
        RecipeSource::User,
        &input,
    )
    .await?;
    tracing::info!(recipe_id = %recipe.id, user_id = %auth.user_id, "recipe created");

    Ok((StatusCode::CREATED, Json(RecipeResponse::from(&recipe))))
}

/// PUT /api/v1/recipes/{id} - owner only.
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    Json(input): Json<UpdateRecipeInput>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = store::update_recipe(&state.pool, &id, &auth.user_id, &input).await?;
    Ok(Json(RecipeResponse::from(&recipe)))
}

/// DELETE /api/v1/recipes/{id} - owner only.
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store::delete_recipe(&state.pool, &id, &auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/recipes/{id}/ratings - rate a recipe, replacing any earlier
/// rating by the same user.
pub async fn rate(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    Json(input): Json<RateRecipeInput>,
) -> Result<impl IntoResponse, AppError> {
    let rating = store::rate_recipe(&state.pool, &id, &auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

/// GET /api/v1/recipes/{id}/ratings
pub async fn list_ratings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let ratings = store::list_ratings(&state.pool, &id).await?;
    Ok(Json(ratings))
}
