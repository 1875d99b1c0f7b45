use std::collections::HashMap;
use std::time::{Duration, Instant};

use bedtime_core::{GenerationPrompt, GenerationResult, ProviderChoice, StoryError};
use secrecy::SecretString;

use crate::{
    AnthropicClient, CompletionRequest, GoogleClient, GroqClient, LlmError, OpenAiClient,
};

/// Applied to every provider's HTTP client unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// One configured backend. Each variant owns its request and response shape.
#[derive(Clone)]
pub enum ProviderClient {
    OpenAi(OpenAiClient),
    Anthropic(AnthropicClient),
    Google(GoogleClient),
    Groq(GroqClient),
}

impl ProviderClient {
    pub fn for_provider(
        provider: ProviderChoice,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(match provider {
            ProviderChoice::OpenAi => ProviderClient::OpenAi(OpenAiClient::new(api_key, timeout)?),
            ProviderChoice::Anthropic => {
                ProviderClient::Anthropic(AnthropicClient::new(api_key, timeout)?)
            }
            ProviderChoice::Google => ProviderClient::Google(GoogleClient::new(api_key, timeout)?),
            ProviderChoice::Groq => ProviderClient::Groq(GroqClient::new(api_key, timeout)?),
        })
    }

    pub fn provider(&self) -> ProviderChoice {
        match self {
            ProviderClient::OpenAi(_) => ProviderChoice::OpenAi,
            ProviderClient::Anthropic(_) => ProviderChoice::Anthropic,
            ProviderClient::Google(_) => ProviderChoice::Google,
            ProviderClient::Groq(_) => ProviderChoice::Groq,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            ProviderClient::OpenAi(client) => client.model(),
            ProviderClient::Anthropic(client) => client.model(),
            ProviderClient::Google(client) => client.model(),
            ProviderClient::Groq(client) => client.model(),
        }
    }

    pub async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        match self {
            ProviderClient::OpenAi(client) => client.complete(request).await,
            ProviderClient::Anthropic(client) => client.complete(request).await,
            ProviderClient::Google(client) => client.complete(request).await,
            ProviderClient::Groq(client) => client.complete(request).await,
        }
    }
}

impl From<OpenAiClient> for ProviderClient {
    fn from(client: OpenAiClient) -> Self {
        ProviderClient::OpenAi(client)
    }
}

impl From<AnthropicClient> for ProviderClient {
    fn from(client: AnthropicClient) -> Self {
        ProviderClient::Anthropic(client)
    }
}

impl From<GoogleClient> for ProviderClient {
    fn from(client: GoogleClient) -> Self {
        ProviderClient::Google(client)
    }
}

impl From<GroqClient> for ProviderClient {
    fn from(client: GroqClient) -> Self {
        ProviderClient::Groq(client)
    }
}

/// Routes prompts to whichever provider clients were configured.
#[derive(Clone, Default)]
pub struct Dispatcher {
    clients: HashMap<ProviderChoice, ProviderClient>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client, replacing any earlier one for the same provider.
    pub fn with_client(mut self, client: impl Into<ProviderClient>) -> Self {
        let client = client.into();
        self.clients.insert(client.provider(), client);
        self
    }

    pub fn is_configured(&self, provider: ProviderChoice) -> bool {
        self.clients.contains_key(&provider)
    }

    /// Model id the given provider will be asked for, if it is configured.
    pub fn model(&self, provider: ProviderChoice) -> Option<&str> {
        self.clients.get(&provider).map(ProviderClient::model)
    }

    /// Sends `prompt` to `provider` once and times the call.
    ///
    /// Provider errors are logged in full and surface only as
    /// [`StoryError::GenerationFailed`]. No retry is attempted.
    pub async fn generate(
        &self,
        prompt: &GenerationPrompt,
        provider: ProviderChoice,
    ) -> Result<GenerationResult, StoryError> {
        let client = self.clients.get(&provider).ok_or_else(|| {
            StoryError::UnsupportedProvider(format!("{provider} is not configured"))
        })?;
        let request = CompletionRequest::from(prompt);

        tracing::info!(
            provider = %provider,
            model = client.model(),
            prompt_chars = request.prompt.chars().count(),
            "dispatching story prompt"
        );

        let started = Instant::now();
        let outcome = client.complete(&request).await;
        let elapsed = started.elapsed().as_secs_f64();

        match outcome {
            Ok(text) => {
                let result = GenerationResult::new(text, elapsed);
                tracing::info!(
                    provider = %provider,
                    model = client.model(),
                    elapsed_seconds = result.elapsed_seconds,
                    moderated = result.moderated,
                    "provider returned story text"
                );
                Ok(result)
            }
            Err(error) => {
                tracing::error!(
                    provider = %provider,
                    model = client.model(),
                    elapsed_seconds = elapsed,
                    error = %error,
                    "story generation failed"
                );
                Err(StoryError::GenerationFailed)
            }
        }
    }
}
