use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use plateful_recipe::store;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::{AppState, Page, PageParams, RecipeResponse};

#[derive(Debug, Deserialize)]
pub struct AddFavoriteInput {
    pub recipe_id: String,
}

/// GET /api/v1/favorites
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let (recipes, total) =
        store::list_favorites(&state.pool, &auth.user_id, params.page, params.per_page).await?;

    Ok(Json(Page {
        data: recipes.iter().map(RecipeResponse::from).collect(),
        page: params.page.max(1),
        per_page: params.per_page.clamp(1, 100),
        total,
    }))
}

/// POST /api/v1/favorites - attach; attaching twice is a no-op.
pub async fn add(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(input): Json<AddFavoriteInput>,
) -> Result<impl IntoResponse, AppError> {
    store::add_favorite(&state.pool, &auth.user_id, &input.recipe_id).await?;
    Ok(Json(json!({"message": "Recipe added to favorites"})))
}

/// DELETE /api/v1/favorites/{recipe_id}
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(recipe_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store::remove_favorite(&state.pool, &auth.user_id, &recipe_id).await?;
    Ok(Json(json!({"message": "Recipe removed from favorites"})))
}
