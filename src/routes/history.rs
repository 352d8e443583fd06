use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use plateful_recipe::{store, LogCookInput, UpdateCookInput};

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::AppState;

/// GET /api/v1/history - the caller's cooking history, newest first.
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Result<impl IntoResponse, AppError> {
    let entries = store::list_history(&state.pool, &auth.user_id).await?;
    Ok(Json(entries))
}

/// POST /api/v1/history - record a cook.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(input): Json<LogCookInput>,
) -> Result<impl IntoResponse, AppError> {
    let entry = store::log_cook(&state.pool, &auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/v1/history/{id} - owner only.
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCookInput>,
) -> Result<impl IntoResponse, AppError> {
    let entry = store::update_cook(&state.pool, &id, &auth.user_id, &input).await?;
    Ok(Json(entry))
}

/// DELETE /api/v1/history/{id} - owner only.
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store::delete_cook(&state.pool, &id, &auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
