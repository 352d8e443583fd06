//! Recipe domain: rows, validated inputs and the sqlx store functions for
//! recipes, ratings, favorites and cooking history.

mod error;
mod input;
mod read_model;
pub mod store;

pub use error::{RecipeError, RecipeResult};
pub use input::{
    CreateRecipeInput, LogCookInput, RateRecipeInput, UpdateCookInput, UpdateRecipeInput,
};
pub use read_model::{CookingHistoryEntry, Recipe, RecipeRating};
pub use store::RecipeFilter;
