use plateful_shared::{Difficulty, SkillLevel};

/// The slice of a recipe the scorers look at.
#[derive(Debug, Clone)]
pub struct RecipeProfile {
    pub id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cuisines: Vec<String>,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub cooking_time_minutes: u32,
    pub servings: u32,
    /// Aggregated popularity in 0..=1.
    pub popularity_score: f64,
}

/// The requesting user's preferences as the engine sees them.
///
/// `skill_level` of `None` disables the skill filter entirely; the
/// preference sub-score still assumes a beginner in that case.
#[derive(Debug, Clone, Default)]
pub struct PreferenceProfile {
    pub preferred_cuisines: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub skill_level: Option<SkillLevel>,
    pub seasonal_preferences: bool,
}
