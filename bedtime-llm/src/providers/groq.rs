//! Groq LLM client

use std::time::Duration;

use bedtime_core::ProviderChoice;
use secrecy::SecretString;

use crate::openai_compatible::OpenAiCompatibleClient;
use crate::{CompletionRequest, LlmError};

/// Groq serves the OpenAI wire format under an `/openai` prefix.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai";

#[derive(Clone)]
pub struct GroqClient(OpenAiCompatibleClient);

impl GroqClient {
    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, timeout, GROQ_BASE_URL)
    }

    pub fn with_base_url(
        api_key: SecretString,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        OpenAiCompatibleClient::builder()
            .base_url(base_url)?
            .api_key(api_key)
            .default_model(ProviderChoice::Groq.default_model())
            .timeout(timeout)
            .build()
            .map(Self)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.0.set_default_model(model);
        self
    }

    pub fn model(&self) -> &str {
        self.0.model()
    }

    pub async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.0.complete(request).await
    }
}
