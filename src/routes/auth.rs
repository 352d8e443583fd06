use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use plateful_user::{generate_jwt, store, LoginInput, RegisterInput, User};
use serde::Serialize;

use crate::error::AppError;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
    Ok(generate_jwt(
        user.id.clone(),
        user.email.clone(),
        &state.jwt_secret,
        state.token_ttl,
    )?)
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse, AppError> {
    let user = store::register(&state.pool, &input).await?;
    tracing::info!(user_id = %user.id, "user registered");

    let token = issue_token(&state, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse, AppError> {
    let user = store::authenticate(&state.pool, &input).await?;

    let token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
