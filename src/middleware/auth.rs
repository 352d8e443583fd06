use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use plateful_user::validate_jwt;

use crate::error::AppError;
use crate::routes::AppState;

/// Auth extension containing the user id extracted from the bearer token.
#[derive(Clone, Debug)]
pub struct Auth {
    pub user_id: String,
}

fn unauthorized(message: &str) -> Response {
    AppError::Unauthorized(message.to_string()).into_response()
}

/// Authentication middleware validating `Authorization: Bearer <jwt>`.
///
/// The token's subject is re-checked against the users table so tokens of
/// deleted accounts stop working immediately.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
    {
        Some(token) => token.trim(),
        None => {
            tracing::warn!("missing bearer token");
            return unauthorized("Missing bearer token");
        }
    };

    let claims = match validate_jwt(token, &state.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(error = %e, "invalid bearer token");
            return unauthorized("Invalid or expired token");
        }
    };

    match plateful_user::store::find_by_id(&state.pool, &claims.sub).await {
        Ok(Some(_)) => {
            req.extensions_mut().insert(Auth {
                user_id: claims.sub,
            });
            next.run(req).await
        }
        Ok(None) => {
            tracing::warn!(user_id = %claims.sub, "token subject no longer exists");
            unauthorized("Invalid or expired token")
        }
        Err(e) => {
            tracing::error!(error = %e, "user lookup failed during auth");
            AppError::User(e).into_response()
        }
    }
}
