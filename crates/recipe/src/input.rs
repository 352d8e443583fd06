use plateful_shared::Difficulty;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1, max = 1440))]
    pub cooking_time_minutes: u32,
    #[validate(range(min = 1, max = 100))]
    pub servings: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[validate(length(min = 1))]
    pub ingredients: Vec<String>,
    #[validate(length(min = 1))]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub calories: Option<u32>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRecipeInput {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(range(min = 1, max = 1440))]
    pub cooking_time_minutes: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    #[validate(length(min = 1))]
    pub ingredients: Option<Vec<String>>,
    #[validate(length(min = 1))]
    pub instructions: Option<Vec<String>>,
    pub cuisines: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub dietary_restrictions: Option<Vec<String>>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub calories: Option<u32>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RateRecipeInput {
    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: f64,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogCookInput {
    #[validate(length(min = 1))]
    pub recipe_id: String,
    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: f64,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCookInput {
    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: f64,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}
