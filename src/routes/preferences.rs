use axum::{extract::State, response::IntoResponse, Extension, Json};
use plateful_shared::SkillLevel;
use plateful_user::{store, PreferencesInput, UserPreference};
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferred_cuisines: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub cooking_skill_level: SkillLevel,
    pub seasonal_preferences: bool,
}

impl From<&UserPreference> for PreferencesResponse {
    fn from(prefs: &UserPreference) -> Self {
        Self {
            preferred_cuisines: prefs.preferred_cuisine_list(),
            dietary_restrictions: prefs.dietary_restriction_list(),
            cooking_skill_level: prefs.skill_level(),
            seasonal_preferences: prefs.seasonal_preferences,
        }
    }
}

impl Default for PreferencesResponse {
    fn default() -> Self {
        Self {
            preferred_cuisines: Vec::new(),
            dietary_restrictions: Vec::new(),
            cooking_skill_level: SkillLevel::Beginner,
            seasonal_preferences: true,
        }
    }
}

/// GET /api/v1/preferences - defaults until the user saves a row.
pub async fn show(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Result<impl IntoResponse, AppError> {
    let response = store::get_preferences(&state.pool, &auth.user_id)
        .await?
        .as_ref()
        .map(PreferencesResponse::from)
        .unwrap_or_default();
    Ok(Json(response))
}

/// PUT /api/v1/preferences - create or replace the caller's preferences.
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(input): Json<PreferencesInput>,
) -> Result<impl IntoResponse, AppError> {
    let prefs = store::upsert_preferences(&state.pool, &auth.user_id, &input).await?;
    Ok(Json(PreferencesResponse::from(&prefs)))
}
