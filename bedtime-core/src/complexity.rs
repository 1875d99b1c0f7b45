use serde::{Deserialize, Serialize};

use crate::StoryError;

/// Narrative complexity, derived from the mean age of the children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    VerySimple,
    Simple,
    Moderate,
    Advanced,
}

impl ComplexityTier {
    /// Lower bound of each tier, checked from the top down. Bounds are inclusive.
    const THRESHOLDS: [(f64, ComplexityTier); 3] = [
        (10.0, ComplexityTier::Advanced),
        (8.0, ComplexityTier::Moderate),
        (5.0, ComplexityTier::Simple),
    ];

    pub fn from_mean_age(mean_age: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(lower, _)| mean_age >= *lower)
            .map(|(_, tier)| *tier)
            .unwrap_or(ComplexityTier::VerySimple)
    }

    /// The phrase embedded into the prompt for this tier.
    pub fn description(self) -> &'static str {
        match self {
            ComplexityTier::VerySimple => "very simple with short sentences and basic vocabulary",
            ComplexityTier::Simple => {
                "simple with easy-to-understand concepts and some new vocabulary"
            }
            ComplexityTier::Moderate => {
                "moderately complex with some challenging words and concepts"
            }
            ComplexityTier::Advanced => {
                "more sophisticated with advanced vocabulary and complex storylines"
            }
        }
    }
}

/// Maps children's ages to a tier and their mean age.
///
/// The range of each age is not re-checked here; [`crate::StoryRequest::new`]
/// already did that. An empty slice is rejected before any division happens.
pub fn classify(ages: &[u8]) -> Result<(ComplexityTier, f64), StoryError> {
    if ages.is_empty() {
        return Err(StoryError::invalid_input(
            "cannot classify complexity without any ages",
        ));
    }
    let total: u32 = ages.iter().map(|age| u32::from(*age)).sum();
    let mean_age = f64::from(total) / ages.len() as f64;
    Ok((ComplexityTier::from_mean_age(mean_age), mean_age))
}
