use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use plateful_recipe::{store, Recipe};
use plateful_recommend::{
    similar_recipes, PreferenceProfile, RecipeProfile, Recommender, Season,
};
use plateful_shared::RecipeSource;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::{AppState, RecipeResponse};

fn to_profile(recipe: &Recipe) -> RecipeProfile {
    RecipeProfile {
        id: recipe.id.clone(),
        title: recipe.title.clone(),
        ingredients: recipe.ingredient_list(),
        instructions: recipe.instruction_list(),
        cuisines: recipe.cuisine_list(),
        tags: recipe.tag_list(),
        difficulty: recipe.difficulty(),
        cooking_time_minutes: recipe.cooking_time_minutes.max(0) as u32,
        servings: recipe.servings.max(0) as u32,
        popularity_score: recipe.popularity_score,
    }
}

async fn preference_profile(
    state: &AppState,
    user_id: &str,
) -> Result<PreferenceProfile, AppError> {
    let profile = plateful_user::store::get_preferences(&state.pool, user_id)
        .await?
        .map(|prefs| PreferenceProfile {
            preferred_cuisines: prefs.preferred_cuisine_list(),
            dietary_restrictions: prefs.dietary_restriction_list(),
            skill_level: Some(prefs.skill_level()),
            seasonal_preferences: prefs.seasonal_preferences,
        })
        .unwrap_or_default();
    Ok(profile)
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationEntry {
    pub recipe: RecipeResponse,
    pub score: f64,
    pub normalized_score: f64,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/v1/recommendations - rank catalog recipes against the searched
/// ingredients and the caller's preferences.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(request): Json<RecommendationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prefs = preference_profile(&state, &auth.user_id).await?;
    let candidates = store::list_by_source(&state.pool, RecipeSource::Ai).await?;

    let profiles: Vec<RecipeProfile> = candidates.iter().map(to_profile).collect();
    let outcome =
        Recommender::new(Season::current()).recommend(&profiles, &prefs, &request.ingredients);

    let by_id: HashMap<&str, &Recipe> = candidates.iter().map(|r| (r.id.as_str(), r)).collect();
    let message = outcome.explanation();
    let recommendations = outcome
        .recommendations
        .into_iter()
        .filter_map(|rec| {
            by_id.get(rec.recipe_id.as_str()).map(|recipe| RecommendationEntry {
                recipe: RecipeResponse::from(*recipe),
                score: rec.score,
                normalized_score: rec.normalized_score,
                confidence: rec.confidence,
            })
        })
        .collect();

    Ok(Json(RecommendationResponse {
        recommendations,
        message,
    }))
}

fn default_limit() -> usize {
    3
}

fn default_min_similarity() -> f64 {
    0.3
}

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
}

#[derive(Debug, Serialize)]
pub struct SimilarEntry {
    pub recipe: RecipeResponse,
    pub similarity_score: f64,
}

#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    pub similar_recipes: Vec<SimilarEntry>,
}

/// GET /api/v1/recipes/{id}/similar - recipes closest to the given one.
pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SimilarParams>,
) -> Result<impl IntoResponse, AppError> {
    let target = store::get_recipe(&state.pool, &id).await?;
    let catalog = store::list_all(&state.pool).await?;

    let target_profile = to_profile(&target);
    let profiles: Vec<RecipeProfile> = catalog.iter().map(to_profile).collect();
    let ranked = similar_recipes(
        &target_profile,
        &profiles,
        params.limit.min(50),
        params.min_similarity,
    );

    let by_id: HashMap<&str, &Recipe> = catalog.iter().map(|r| (r.id.as_str(), r)).collect();
    let entries = ranked
        .into_iter()
        .filter_map(|entry| {
            by_id.get(entry.recipe_id.as_str()).map(|recipe| SimilarEntry {
                recipe: RecipeResponse::from(*recipe),
                similarity_score: entry.similarity,
            })
        })
        .collect();

    Ok(Json(SimilarResponse {
        similar_recipes: entries,
    }))
}
