use serde::Serialize;

use crate::profile::{PreferenceProfile, RecipeProfile};
use crate::scoring;
use crate::season::Season;
use crate::similarity;

/// Cap on results returned from a single recommendation request.
const MAX_RESULTS: usize = 15;

/// Two candidates at least this similar are considered near-duplicates.
const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Score multiplier penalty applied to near-duplicates of a higher-ranked
/// candidate.
const DIVERSITY_PENALTY: f64 = 0.2;

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub recipe_id: String,
    /// Raw ingredient-coverage score (1.0 when no ingredients were searched).
    pub score: f64,
    /// Score relative to the best-ranked result, in 0..=1.
    pub normalized_score: f64,
    /// Blend of model confidence and model score, kept for display.
    pub confidence: f64,
}

/// Why candidates were rejected, bucketed by the filter that dropped them.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RejectionCounts {
    pub ingredients: usize,
    pub dietary: usize,
    pub skill_level: usize,
    pub cuisine: usize,
}

impl RejectionCounts {
    fn hints(&self) -> Vec<&'static str> {
        let mut hints = Vec::new();
        if self.ingredients > 0 {
            hints.push("Try different ingredients");
        }
        if self.dietary > 0 {
            hints.push("No recipes match your dietary restrictions");
        }
        if self.skill_level > 0 {
            hints.push("No recipes match your cooking skill level");
        }
        if self.cuisine > 0 {
            hints.push("No recipes match your preferred cuisines");
        }
        hints
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOutcome {
    pub recommendations: Vec<Recommendation>,
    pub rejections: RejectionCounts,
}

impl RecommendationOutcome {
    /// Human-readable explanation for an empty result, built from the
    /// rejection counters. `None` while there are recommendations.
    pub fn explanation(&self) -> Option<String> {
        if !self.recommendations.is_empty() {
            return None;
        }

        let mut message = String::from("No recipes found that match your criteria.");
        for hint in self.rejections.hints() {
            message.push(' ');
            message.push_str(hint);
            message.push('.');
        }
        Some(message)
    }
}

struct Scored {
    idx: usize,
    score: f64,
    confidence: f64,
}

/// The heuristic recommender. Holds the season so a whole request is scored
/// against one consistent calendar position.
pub struct Recommender {
    season: Season,
}

impl Recommender {
    pub fn new(season: Season) -> Self {
        Self { season }
    }

    /// Score `candidates` for a user described by `prefs` searching for
    /// `search` ingredients. An empty search means "anything goes" and only
    /// the preference/dietary/skill filters apply.
    pub fn recommend(
        &self,
        candidates: &[RecipeProfile],
        prefs: &PreferenceProfile,
        search: &[String],
    ) -> RecommendationOutcome {
        let mut rejections = RejectionCounts::default();
        let mut scored: Vec<Scored> = Vec::new();

        for (idx, recipe) in candidates.iter().enumerate() {
            let model = scoring::model_score(recipe, prefs, search, self.season);
            if model == 0.0 {
                continue;
            }

            let ingredient_score = if search.is_empty() {
                1.0
            } else {
                scoring::ingredient_match(&recipe.ingredients, search)
            };
            if !search.is_empty() && ingredient_score <= 0.0 {
                rejections.ingredients += 1;
                continue;
            }

            if !prefs.dietary_restrictions.is_empty()
                && scoring::dietary(&recipe.ingredients, &prefs.dietary_restrictions) == 0.0
            {
                rejections.dietary += 1;
                continue;
            }

            if let Some(skill) = prefs.skill_level {
                if !skill.accepts(recipe.difficulty) {
                    rejections.skill_level += 1;
                    continue;
                }
            }

            let conf = scoring::confidence(recipe, prefs, search, self.season);
            scored.push(Scored {
                idx,
                score: ingredient_score,
                confidence: conf * 0.6 + model * 0.4,
            });
        }

        if scored.is_empty() {
            let outcome = RecommendationOutcome {
                recommendations: Vec::new(),
                rejections,
            };
            tracing::info!(
                ingredients = outcome.rejections.ingredients,
                dietary = outcome.rejections.dietary,
                skill_level = outcome.rejections.skill_level,
                explanation = outcome.explanation().as_deref().unwrap_or_default(),
                "no recommendations survived filtering"
            );
            return outcome;
        }

        RecommendationOutcome {
            recommendations: Self::rank(candidates, scored),
            rejections,
        }
    }

    /// Rank survivors: sort by score, penalize near-duplicates of
    /// higher-ranked picks, re-sort, truncate, normalize against the best.
    fn rank(candidates: &[RecipeProfile], mut scored: Vec<Scored>) -> Vec<Recommendation> {
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        let mut kept: Vec<usize> = Vec::new();
        for entry in scored.iter_mut() {
            let near_duplicate = kept.iter().any(|&prev| {
                similarity::recipe_similarity(&candidates[entry.idx], &candidates[prev])
                    >= SIMILARITY_THRESHOLD
            });
            if near_duplicate {
                entry.score *= 1.0 - DIVERSITY_PENALTY;
            }
            kept.push(entry.idx);
        }

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(MAX_RESULTS);

        let max_score = scored.iter().map(|s| s.score).fold(0.0f64, f64::max);

        scored
            .into_iter()
            .map(|s| Recommendation {
                recipe_id: candidates[s.idx].id.clone(),
                score: s.score,
                normalized_score: if max_score > 0.0 {
                    s.score / max_score
                } else {
                    0.0
                },
                confidence: s.confidence,
            })
            .collect()
    }
}
