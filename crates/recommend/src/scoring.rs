use plateful_shared::{Difficulty, SkillLevel};

use crate::profile::{PreferenceProfile, RecipeProfile};
use crate::season::Season;

/// Ingredients a restriction forbids; matching is case-insensitive
/// substring, so "almond milk" trips both dairy-free ("milk") and nut-free
/// ("almonds") style entries only when they literally occur.
const FORBIDDEN_INGREDIENTS: &[(&str, &[&str])] = &[
    (
        "vegetarian",
        &["beef", "pork", "chicken", "lamb", "fish", "seafood", "meat"],
    ),
    (
        "vegan",
        &[
            "beef", "pork", "chicken", "lamb", "fish", "seafood", "meat", "milk", "cheese",
            "yogurt", "butter", "cream", "eggs", "honey",
        ],
    ),
    (
        "gluten-free",
        &["wheat", "barley", "rye", "bread", "pasta", "flour"],
    ),
    ("dairy-free", &["milk", "cheese", "yogurt", "butter", "cream"]),
    (
        "nut-free",
        &["peanuts", "almonds", "walnuts", "cashews", "pecans", "hazelnuts"],
    ),
    ("halal", &["pork", "alcohol", "wine", "beer"]),
    ("kosher", &["pork", "shellfish"]),
];

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// How well the recipe covers the searched ingredients: exact match 1.0,
/// substring containment either way 0.8, summed and divided by the number of
/// search terms. Empty search scores 0 here; the engine treats an empty
/// search as "no constraint" before calling this.
pub fn ingredient_match(recipe_ingredients: &[String], search: &[String]) -> f64 {
    if search.is_empty() {
        return 0.0;
    }

    let recipe: Vec<String> = recipe_ingredients.iter().map(|i| normalize(i)).collect();

    let mut matches = 0.0;
    for term in search {
        let term = normalize(term);
        let mut best = 0.0f64;
        for ingredient in &recipe {
            if *ingredient == term {
                best = 1.0;
                break;
            }
            if ingredient.contains(&term) || term.contains(ingredient.as_str()) {
                best = 0.8;
            }
        }
        matches += best;
    }

    matches / search.len() as f64
}

/// Rough effort estimate from counts and difficulty; deliberately not
/// clamped, very long recipes can exceed 1.
pub fn complexity(recipe: &RecipeProfile) -> f64 {
    let ingredients = recipe.ingredients.len() as f64;
    let instructions = recipe.instructions.len() as f64;

    (ingredients * 0.4 + instructions * 0.4 + recipe.difficulty.weight() * 0.2) / 10.0
}

/// Share of the season's produce the recipe uses, weighted by category
/// (vegetables 0.5, fruits 0.3, herbs 0.2).
pub fn seasonal(recipe: &RecipeProfile, season: Season) -> f64 {
    if recipe.ingredients.is_empty() {
        return 0.0;
    }

    let lowered: Vec<String> = recipe.ingredients.iter().map(|i| normalize(i)).collect();

    let mut score = 0.0;
    for category in season.categories() {
        let matches = category
            .ingredients
            .iter()
            .filter(|seasonal| lowered.iter().any(|i| i.contains(*seasonal)))
            .count();
        score += matches as f64 / category.ingredients.len() as f64 * category.weight;
    }

    score
}

fn skill_affinity(skill: SkillLevel, difficulty: Difficulty) -> f64 {
    match (skill, difficulty) {
        (SkillLevel::Beginner, Difficulty::Easy) => 1.0,
        (SkillLevel::Beginner, Difficulty::Medium) => 0.3,
        (SkillLevel::Beginner, Difficulty::Hard) => 0.0,
        (SkillLevel::Intermediate, Difficulty::Easy) => 0.5,
        (SkillLevel::Intermediate, Difficulty::Medium) => 1.0,
        (SkillLevel::Intermediate, Difficulty::Hard) => 0.5,
        (SkillLevel::Advanced, Difficulty::Easy) => 0.3,
        (SkillLevel::Advanced, Difficulty::Medium) => 0.7,
        (SkillLevel::Advanced, Difficulty::Hard) => 1.0,
    }
}

/// Blend of cuisine overlap (0.4), skill affinity (0.3) and the dietary
/// score (0.3). Cuisine and dietary parts only contribute when the user
/// stated preferences for them.
pub fn preference(recipe: &RecipeProfile, prefs: &PreferenceProfile) -> f64 {
    let mut score = 0.0;

    if !prefs.preferred_cuisines.is_empty() {
        let recipe_cuisines: Vec<String> = recipe.cuisines.iter().map(|c| normalize(c)).collect();
        let common = prefs
            .preferred_cuisines
            .iter()
            .filter(|c| recipe_cuisines.contains(&normalize(c)))
            .count();
        score += common as f64 / prefs.preferred_cuisines.len() as f64 * 0.4;
    }

    let skill = prefs.skill_level.unwrap_or_default();
    score += skill_affinity(skill, recipe.difficulty) * 0.3;

    if !prefs.dietary_restrictions.is_empty() {
        score += dietary(&recipe.ingredients, &prefs.dietary_restrictions) * 0.3;
    }

    score
}

/// Hard dietary gate: 0 as soon as any restricted ingredient shows up,
/// 1 otherwise. Unknown restriction labels are ignored.
pub fn dietary(recipe_ingredients: &[String], restrictions: &[String]) -> f64 {
    if restrictions.is_empty() {
        return 1.0;
    }

    let lowered: Vec<String> = recipe_ingredients.iter().map(|i| normalize(i)).collect();

    for restriction in restrictions {
        let restriction = normalize(restriction);
        let Some((_, forbidden)) = FORBIDDEN_INGREDIENTS
            .iter()
            .find(|(name, _)| *name == restriction)
        else {
            continue;
        };

        for banned in *forbidden {
            if lowered.iter().any(|i| i.contains(banned)) {
                return 0.0;
            }
        }
    }

    1.0
}

/// The model score: ingredient match 0.4, preferences 0.3, complexity 0.2,
/// seasonal 0.1.
pub fn model_score(
    recipe: &RecipeProfile,
    prefs: &PreferenceProfile,
    search: &[String],
    season: Season,
) -> f64 {
    ingredient_match(&recipe.ingredients, search) * 0.4
        + preference(recipe, prefs) * 0.3
        + complexity(recipe) * 0.2
        + seasonal(recipe, season) * 0.1
}

/// Confidence in a candidate: weighted mean of ingredient match (0.4),
/// complexity (0.2) and preference fit (0.2); the seasonal score joins with
/// weight 0.2 when the user opted into seasonal suggestions.
pub fn confidence(
    recipe: &RecipeProfile,
    prefs: &PreferenceProfile,
    search: &[String],
    season: Season,
) -> f64 {
    let mut weighted = ingredient_match(&recipe.ingredients, search) * 0.4
        + complexity(recipe) * 0.2
        + preference(recipe, prefs) * 0.2;
    let mut weight_sum = 0.8;

    if prefs.seasonal_preferences {
        weighted += seasonal(recipe, season) * 0.2;
        weight_sum += 0.2;
    }

    weighted / weight_sum
}
