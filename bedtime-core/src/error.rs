use thiserror::Error;

/// The only text a caller ever sees for a failed provider call.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Something went wrong while creating the story. Please try again.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),
    /// Provider detail is logged where the failure happens and never carried here.
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    GenerationFailed,
    #[error("Content was flagged: {explanation}")]
    ModeratedContent { explanation: String },
}

impl StoryError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        StoryError::InvalidInput(reason.into())
    }

    pub fn is_moderated(&self) -> bool {
        matches!(self, StoryError::ModeratedContent { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_failed_display_is_generic() {
        assert_eq!(
            StoryError::GenerationFailed.to_string(),
            GENERATION_FAILED_MESSAGE
        );
    }

    #[test]
    fn moderated_content_carries_explanation() {
        let err = StoryError::ModeratedContent {
            explanation: "inappropriate language".to_string(),
        };
        assert!(err.is_moderated());
        assert_eq!(err.to_string(), "Content was flagged: inappropriate language");
    }
}
