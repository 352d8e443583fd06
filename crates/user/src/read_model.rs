use plateful_shared::SkillLevel;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: i64,
}

/// Preference row; list columns are JSON text like the recipe read model.
#[derive(Debug, Clone, FromRow)]
pub struct UserPreference {
    pub user_id: String,
    pub preferred_cuisines: String,
    pub dietary_restrictions: String,
    pub cooking_skill_level: String,
    pub seasonal_preferences: bool,
    pub updated_at: i64,
}

impl UserPreference {
    pub fn preferred_cuisine_list(&self) -> Vec<String> {
        serde_json::from_str(&self.preferred_cuisines).unwrap_or_default()
    }

    pub fn dietary_restriction_list(&self) -> Vec<String> {
        serde_json::from_str(&self.dietary_restrictions).unwrap_or_default()
    }

    pub fn skill_level(&self) -> SkillLevel {
        self.cooking_skill_level.parse().unwrap_or_default()
    }
}
