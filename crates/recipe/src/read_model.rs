use plateful_shared::{Difficulty, RecipeSource};
use serde::Serialize;
use sqlx::prelude::FromRow;

fn decode_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// A recipe row. List-valued columns (ingredients, instructions, cuisines,
/// tags, dietary_restrictions) are stored as JSON text; the accessor methods
/// decode them.
#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: String,
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    pub cooking_time_minutes: i64,
    pub servings: i64,
    pub difficulty: String,
    pub ingredients: String,
    pub instructions: String,
    pub cuisines: String,
    pub tags: String,
    pub dietary_restrictions: String,
    pub image_url: Option<String>,
    pub source: String,
    pub calories: Option<i64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub popularity_score: f64,
    pub average_rating: f64,
    pub rating_count: i64,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl Recipe {
    pub fn ingredient_list(&self) -> Vec<String> {
        decode_list(&self.ingredients)
    }

    pub fn instruction_list(&self) -> Vec<String> {
        decode_list(&self.instructions)
    }

    pub fn cuisine_list(&self) -> Vec<String> {
        decode_list(&self.cuisines)
    }

    pub fn tag_list(&self) -> Vec<String> {
        decode_list(&self.tags)
    }

    pub fn dietary_restriction_list(&self) -> Vec<String> {
        decode_list(&self.dietary_restrictions)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty.parse().unwrap_or_default()
    }

    pub fn source(&self) -> RecipeSource {
        self.source.parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeRating {
    pub id: String,
    pub recipe_id: String,
    pub user_id: String,
    pub rating: f64,
    pub comment: Option<String>,
    pub created_at: i64,
}

/// A cooking-history row joined with the recipe title for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CookingHistoryEntry {
    pub id: String,
    pub user_id: String,
    pub recipe_id: String,
    pub recipe_title: String,
    pub rating: f64,
    pub notes: Option<String>,
    pub cooked_at: i64,
}
