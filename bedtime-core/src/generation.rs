use std::fmt;

use serde::{Deserialize, Serialize};

use crate::moderation::is_flagged;

/// The final natural-language request sent to a provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationPrompt(String);

impl GenerationPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for GenerationPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GenerationPrompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Output of one provider call. Never mutated after creation. `moderated`
/// is decided here, once, from the raw text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub elapsed_seconds: f64,
    pub moderated: bool,
}

impl GenerationResult {
    pub fn new(text: String, elapsed_seconds: f64) -> Self {
        Self {
            moderated: is_flagged(&text),
            text,
            elapsed_seconds: round_tenths(elapsed_seconds),
        }
    }
}

/// Rounds to one decimal place.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
