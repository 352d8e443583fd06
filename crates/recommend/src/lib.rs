//! Ingredient-based recipe recommendation and similarity ranking.
//!
//! Everything in this crate is a deterministic computation over in-memory
//! profiles; callers load candidate recipes however they like and map them
//! into [`RecipeProfile`] values. No I/O happens here.

mod engine;
mod profile;
mod scoring;
mod season;
mod similarity;

pub use engine::{Recommendation, RecommendationOutcome, Recommender, RejectionCounts};
pub use profile::{PreferenceProfile, RecipeProfile};
pub use season::Season;
pub use similarity::{jaccard, pairwise_similarity, recipe_similarity, similar_recipes, SimilarRecipe};
