//! sqlx queries for users and their preferences.

use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::input::{LoginInput, PreferencesInput, RegisterInput};
use crate::password::{hash_password, verify_password};
use crate::read_model::{User, UserPreference};

fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// Register a new account. The email is stored lowercased and must be
/// unique.
pub async fn register(pool: &SqlitePool, input: &RegisterInput) -> UserResult<User> {
    input.validate()?;

    let id = Ulid::new().to_string();
    let email = input.email.trim().to_lowercase();
    let password_hash = hash_password(&input.password)?;

    let result = sqlx::query(
        "INSERT INTO users (id, email, password_hash, name, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&id)
    .bind(&email)
    .bind(&password_hash)
    .bind(input.name.as_deref().unwrap_or_default())
    .bind(now())
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(e) => {
            if e.as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false)
            {
                return Err(UserError::EmailTaken);
            }
            return Err(e.into());
        }
    }

    find_by_id(pool, &id).await?.ok_or(UserError::NotFound)
}

/// Check credentials and return the account. The same error covers unknown
/// email and bad password so responses don't reveal which one failed.
pub async fn authenticate(pool: &SqlitePool, input: &LoginInput) -> UserResult<User> {
    input.validate()?;

    let email = input.email.trim().to_lowercase();
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .ok_or(UserError::InvalidCredentials)?;

    if !verify_password(&input.password, &user.password_hash)? {
        return Err(UserError::InvalidCredentials);
    }

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> UserResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn get_preferences(
    pool: &SqlitePool,
    user_id: &str,
) -> UserResult<Option<UserPreference>> {
    let prefs = sqlx::query_as::<_, UserPreference>(
        "SELECT * FROM user_preferences WHERE user_id = ?1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(prefs)
}

/// Create or replace the caller's preference row.
pub async fn upsert_preferences(
    pool: &SqlitePool,
    user_id: &str,
    input: &PreferencesInput,
) -> UserResult<UserPreference> {
    input.validate()?;

    sqlx::query(
        r#"
        INSERT INTO user_preferences (
            user_id, preferred_cuisines, dietary_restrictions,
            cooking_skill_level, seasonal_preferences, updated_at
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(user_id) DO UPDATE SET
            preferred_cuisines = excluded.preferred_cuisines,
            dietary_restrictions = excluded.dietary_restrictions,
            cooking_skill_level = excluded.cooking_skill_level,
            seasonal_preferences = excluded.seasonal_preferences,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(user_id)
    .bind(serde_json::to_string(&input.preferred_cuisines)?)
    .bind(serde_json::to_string(&input.dietary_restrictions)?)
    .bind(input.cooking_skill_level.to_string())
    .bind(input.seasonal_preferences)
    .bind(now())
    .execute(pool)
    .await?;

    get_preferences(pool, user_id)
        .await?
        .ok_or(UserError::NotFound)
}
