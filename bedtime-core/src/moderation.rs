use crate::{GenerationResult, StoryError};

/// Marker a provider is told to open its reply with when the inputs are
/// unsuitable for children. Must match the prompt wording byte for byte.
pub const SENTINEL: &str = "MODERATION_FLAG:";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModerationVerdict {
    Story(String),
    Flagged { explanation: String },
}

impl ModerationVerdict {
    /// Classifies raw provider output. Only an exact prefix counts; text that
    /// merely contains the sentinel further in is a story.
    pub fn inspect(raw_text: String) -> Self {
        let flagged = is_flagged(&raw_text);
        Self::classified(raw_text, flagged)
    }

    fn classified(raw_text: String, flagged: bool) -> Self {
        if !flagged {
            return ModerationVerdict::Story(raw_text);
        }
        let explanation = raw_text.strip_prefix(SENTINEL).unwrap_or(&raw_text);
        ModerationVerdict::Flagged {
            explanation: explanation.trim().to_string(),
        }
    }

    pub fn into_result(self) -> Result<String, StoryError> {
        match self {
            ModerationVerdict::Story(story) => Ok(story),
            ModerationVerdict::Flagged { explanation } => {
                Err(StoryError::ModeratedContent { explanation })
            }
        }
    }
}

impl From<GenerationResult> for ModerationVerdict {
    /// Uses the flag decided when the result was created.
    fn from(result: GenerationResult) -> Self {
        Self::classified(result.text, result.moderated)
    }
}

/// True when `raw_text` opens with [`SENTINEL`].
pub fn is_flagged(raw_text: &str) -> bool {
    raw_text.starts_with(SENTINEL)
}

/// Returns the story verbatim, or `ModeratedContent` with the explanation
/// that followed the sentinel.
pub fn check(raw_text: impl Into<String>) -> Result<String, StoryError> {
    ModerationVerdict::inspect(raw_text.into()).into_result()
}
