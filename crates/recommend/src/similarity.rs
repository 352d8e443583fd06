use std::collections::HashSet;

use crate::profile::RecipeProfile;

/// Cuisine families used to credit near-matches: an exact label match scores
/// 1.0, two labels from the same family 0.8, substring containment 0.6.
const CUISINE_FAMILIES: &[&[&str]] = &[
    &["italian", "mediterranean", "tuscan", "sicilian", "roman"],
    &["mexican", "tex-mex", "latin american"],
    &["chinese", "cantonese", "sichuan", "hunan", "dim sum"],
    &["japanese", "sushi", "ramen", "izakaya"],
    &["indian", "curry", "spicy", "tandoori"],
    &["thai", "thailand", "southeast asian"],
    &["american", "southern", "cajun", "creole"],
    &["mediterranean", "greek", "turkish", "lebanese"],
    &["french", "provencal", "bistro"],
    &["korean", "bbq", "kimchi"],
];

/// |intersection| / |union| over exact string sets. Empty input on either
/// side scores 0.
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    intersection as f64 / union as f64
}

fn same_family(a: &str, b: &str) -> bool {
    CUISINE_FAMILIES
        .iter()
        .any(|family| family.contains(&a) && family.contains(&b))
}

pub(crate) fn cuisine_similarity(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a: Vec<String> = a.iter().map(|c| c.to_lowercase()).collect();
    let b: Vec<String> = b.iter().map(|c| c.to_lowercase()).collect();

    let mut score = 0.0;
    for c1 in &a {
        let mut best = 0.0f64;
        for c2 in &b {
            if c1 == c2 {
                best = 1.0;
                break;
            }
            if same_family(c1, c2) {
                best = best.max(0.8);
            } else if c1.contains(c2.as_str()) || c2.contains(c1.as_str()) {
                best = best.max(0.6);
            }
        }
        score += best;
    }

    score / a.len() as f64
}

pub(crate) fn tag_similarity(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let common = b.iter().filter(|t| set_a.contains(t.as_str())).count();

    common as f64 / a.len().max(b.len()) as f64
}

/// Closeness of two cooking times against a fixed 60 minute scale.
fn time_similarity(t1: u32, t2: u32) -> f64 {
    1.0 - (t1 as f64 - t2 as f64).abs() / 60.0
}

/// Closeness on a ratio scale: 1 when equal, 1 when both are zero.
fn ratio_similarity(v1: f64, v2: f64) -> f64 {
    let max = v1.max(v2);
    if max > 0.0 { 1.0 - (v1 - v2).abs() / max } else { 1.0 }
}

/// Weighted recipe-to-recipe similarity used for diversity checks:
/// ingredients 0.35, cuisines 0.20, difficulty 0.10, cooking time 0.10,
/// tags 0.15, popularity 0.10.
pub fn recipe_similarity(a: &RecipeProfile, b: &RecipeProfile) -> f64 {
    let ingredients = jaccard(&a.ingredients, &b.ingredients);
    let cuisines = cuisine_similarity(&a.cuisines, &b.cuisines);
    let difficulty = 1.0 - (a.difficulty.weight() - b.difficulty.weight()).abs() / 2.0;
    let time = time_similarity(a.cooking_time_minutes, b.cooking_time_minutes);
    let tags = tag_similarity(&a.tags, &b.tags);
    let popularity = 1.0 - (a.popularity_score - b.popularity_score).abs();

    ingredients * 0.35
        + cuisines * 0.20
        + difficulty * 0.10
        + time * 0.10
        + tags * 0.15
        + popularity * 0.10
}

/// Pairwise similarity backing the "similar recipes" endpoint: ingredient
/// Jaccard 0.4, cooking-time closeness 0.2, difficulty equality 0.2,
/// servings closeness 0.2.
pub fn pairwise_similarity(a: &RecipeProfile, b: &RecipeProfile) -> f64 {
    let ingredients = jaccard(&a.ingredients, &b.ingredients);
    let time = ratio_similarity(a.cooking_time_minutes as f64, b.cooking_time_minutes as f64);
    let difficulty = if a.difficulty == b.difficulty { 1.0 } else { 0.0 };
    let servings = ratio_similarity(a.servings as f64, b.servings as f64);

    ingredients * 0.4 + time * 0.2 + difficulty * 0.2 + servings * 0.2
}

#[derive(Debug, Clone)]
pub struct SimilarRecipe {
    pub recipe_id: String,
    pub similarity: f64,
}

/// Rank `candidates` against `target`, keeping those at or above
/// `min_similarity`, most similar first, at most `limit` results. The target
/// itself is skipped if it appears among the candidates.
pub fn similar_recipes(
    target: &RecipeProfile,
    candidates: &[RecipeProfile],
    limit: usize,
    min_similarity: f64,
) -> Vec<SimilarRecipe> {
    let mut ranked: Vec<SimilarRecipe> = candidates
        .iter()
        .filter(|c| c.id != target.id)
        .map(|c| SimilarRecipe {
            recipe_id: c.id.clone(),
            similarity: pairwise_similarity(target, c),
        })
        .filter(|s| s.similarity >= min_similarity)
        .collect();

    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    ranked.truncate(limit);
    ranked
}
