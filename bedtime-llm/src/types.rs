use bedtime_core::{GenerationPrompt, MAX_OUTPUT_TOKENS, TEMPERATURE};

/// What every provider receives: one user prompt and the shared sampling knobs.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

impl From<&GenerationPrompt> for CompletionRequest {
    fn from(prompt: &GenerationPrompt) -> Self {
        CompletionRequest::new(prompt.as_str())
    }
}
