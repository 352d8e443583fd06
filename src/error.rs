use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use plateful_recipe::RecipeError;
use plateful_user::UserError;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Recipe error: {0}")]
    Recipe(#[from] RecipeError),

    #[error("User error: {0}")]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(String),
}

/// Field -> messages map for a 422 body.
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), json!(messages));
    }
    Value::Object(details)
}

fn error_body(message: &str, details: Option<Value>) -> Json<Value> {
    match details {
        Some(details) => Json(json!({"error": {"message": message, "details": details}})),
        None => Json(json!({"error": {"message": message}})),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(errors)
            | AppError::Recipe(RecipeError::ValidationError(errors))
            | AppError::User(UserError::ValidationError(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                error_body("Validation failed", Some(validation_details(errors))),
            ),
            AppError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, error_body(message, None))
            }
            AppError::Recipe(RecipeError::NotFound) => (
                StatusCode::NOT_FOUND,
                error_body("Recipe not found", None),
            ),
            AppError::Recipe(RecipeError::PermissionDenied) => (
                StatusCode::FORBIDDEN,
                error_body("You do not have permission to access this record", None),
            ),
            AppError::User(UserError::EmailTaken) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                error_body(
                    "Email is already registered",
                    Some(json!({"email": ["already registered"]})),
                ),
            ),
            AppError::User(UserError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                error_body("Invalid email or password", None),
            ),
            AppError::User(UserError::TokenError(_)) => (
                StatusCode::UNAUTHORIZED,
                error_body("Invalid or expired token", None),
            ),
            AppError::User(UserError::NotFound) => {
                (StatusCode::NOT_FOUND, error_body("User not found", None))
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body("An unexpected error occurred. Please try again later.", None),
                )
            }
        };

        (status, body).into_response()
    }
}
