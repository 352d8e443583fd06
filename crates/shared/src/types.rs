use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Default,
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Ordinal weight used by the scoring blends (easy 1, medium 2, hard 3).
    pub fn weight(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 2.0,
            Difficulty::Hard => 3.0,
        }
    }
}

/// Where a recipe came from: submitted by a user, generated for the
/// recommendation catalog, or imported from an external site.
#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Default,
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RecipeSource {
    #[default]
    User,
    Ai,
    Web,
}

#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Default,
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Difficulties a cook at this level is comfortable with.
    pub fn allowed_difficulties(&self) -> &'static [Difficulty] {
        match self {
            SkillLevel::Beginner => &[Difficulty::Easy],
            SkillLevel::Intermediate => &[Difficulty::Easy, Difficulty::Medium],
            SkillLevel::Advanced => &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard],
        }
    }

    pub fn accepts(&self, difficulty: Difficulty) -> bool {
        self.allowed_difficulties().contains(&difficulty)
    }
}
