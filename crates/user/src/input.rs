use plateful_shared::SkillLevel;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PreferencesInput {
    #[serde(default)]
    pub preferred_cuisines: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    pub cooking_skill_level: SkillLevel,
    #[serde(default = "default_seasonal")]
    pub seasonal_preferences: bool,
}

fn default_seasonal() -> bool {
    true
}
