use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::StoryError;

/// Backends a story can be generated with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderChoice {
    OpenAi,
    Anthropic,
    Google,
    Groq,
}

impl ProviderChoice {
    pub const ALL: [ProviderChoice; 4] = [
        ProviderChoice::OpenAi,
        ProviderChoice::Anthropic,
        ProviderChoice::Google,
        ProviderChoice::Groq,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProviderChoice::OpenAi => "openai",
            ProviderChoice::Anthropic => "anthropic",
            ProviderChoice::Google => "google",
            ProviderChoice::Groq => "groq",
        }
    }

    /// Model id requested from the backend; also what telemetry stores as
    /// `selected_model`.
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderChoice::OpenAi => "gpt-4o",
            ProviderChoice::Anthropic => "claude-3-5-sonnet-20241022",
            ProviderChoice::Google => "gemini-1.5-pro",
            ProviderChoice::Groq => "llama-3.1-70b-versatile",
        }
    }

    /// Config key holding this provider's credential.
    pub fn api_key_var(self) -> &'static str {
        match self {
            ProviderChoice::OpenAi => "OPENAI_API_KEY",
            ProviderChoice::Anthropic => "ANTHROPIC_API_KEY",
            ProviderChoice::Google => "GOOGLE_API_KEY",
            ProviderChoice::Groq => "GROQ_API_KEY",
        }
    }
}

impl fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderChoice {
    type Err = StoryError;

    /// Accepts a provider name or its model id, case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_lowercase();
        ProviderChoice::ALL
            .into_iter()
            .find(|provider| provider.name() == needle || provider.default_model() == needle)
            .ok_or_else(|| StoryError::UnsupportedProvider(value.trim().to_string()))
    }
}

/// How the process-wide provider was picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionSource {
    Configured,
    Random,
}

/// The provider frozen for the lifetime of the process. Resolved once at
/// startup and passed explicitly to whatever serves requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderSelection {
    provider: ProviderChoice,
    source: SelectionSource,
}

impl ProviderSelection {
    /// Uses `explicit` when given, otherwise draws uniformly from
    /// [`ProviderChoice::ALL`].
    pub fn resolve<R: Rng + ?Sized>(
        explicit: Option<&str>,
        rng: &mut R,
    ) -> Result<Self, StoryError> {
        match explicit.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => Ok(Self::pinned(value.parse()?)),
            None => {
                let provider = *ProviderChoice::ALL
                    .choose(rng)
                    .unwrap_or(&ProviderChoice::OpenAi);
                Ok(Self {
                    provider,
                    source: SelectionSource::Random,
                })
            }
        }
    }

    pub fn pinned(provider: ProviderChoice) -> Self {
        Self {
            provider,
            source: SelectionSource::Configured,
        }
    }

    pub fn provider(&self) -> ProviderChoice {
        self.provider
    }

    pub fn source(&self) -> SelectionSource {
        self.source
    }
}
