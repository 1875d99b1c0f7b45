use std::collections::HashMap;
use std::time::Duration;

use bedtime_core::{Language, ProviderChoice, ProviderSelection, StoryError};
use bedtime_llm::{Dispatcher, LlmError, ProviderClient, DEFAULT_TIMEOUT};
use bedtime_telemetry::{
    RestUsageStore, SqliteUsageStore, TelemetryError, TelemetryRecorder, DEFAULT_STORE_TIMEOUT,
};
use rand::Rng;
use secrecy::SecretString;
use thiserror::Error;

pub const MODEL_VAR: &str = "MODEL";
pub const DEFAULT_LANGUAGE_VAR: &str = "DEFAULT_LANGUAGE";
pub const DATASTORE_URL_VAR: &str = "SUPABASE_URL";
pub const DATASTORE_KEY_VAR: &str = "SUPABASE_KEY";
pub const REQUEST_TIMEOUT_VAR: &str = "REQUEST_TIMEOUT_SECS";
pub const DATASTORE_TIMEOUT_VAR: &str = "DATASTORE_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("SUPABASE_KEY is required when SUPABASE_URL is not a sqlite url")]
    MissingDatastoreKey,
    #[error(transparent)]
    Story(#[from] StoryError),
    #[error("provider client setup failed: {0}")]
    Llm(#[from] LlmError),
    #[error("usage store setup failed: {0}")]
    Telemetry(#[from] TelemetryError),
}

fn parse_timeout(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::Invalid {
            key,
            reason: format!("expected a positive number of seconds, got '{value}'"),
        })
}

/// Everything the story pipeline reads from its environment.
#[derive(Clone, Debug)]
pub struct StoryConfig {
    pub api_keys: HashMap<ProviderChoice, SecretString>,
    pub model: Option<String>,
    pub default_language: Language,
    pub datastore_url: Option<String>,
    pub datastore_key: Option<SecretString>,
    pub request_timeout: Duration,
    /// Bound on each usage store round trip.
    pub datastore_timeout: Duration,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            api_keys: HashMap::new(),
            model: None,
            default_language: Language::default(),
            datastore_url: None,
            datastore_key: None,
            request_timeout: DEFAULT_TIMEOUT,
            datastore_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

impl StoryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_keys = ProviderChoice::ALL
            .into_iter()
            .filter_map(|provider| {
                get(provider.api_key_var()).map(|key| (provider, SecretString::new(key)))
            })
            .collect();

        let default_language = match get(DEFAULT_LANGUAGE_VAR) {
            Some(value) => value.parse::<Language>().map_err(|err| ConfigError::Invalid {
                key: DEFAULT_LANGUAGE_VAR,
                reason: err.to_string(),
            })?,
            None => Language::default(),
        };

        let request_timeout = match get(REQUEST_TIMEOUT_VAR) {
            Some(value) => parse_timeout(REQUEST_TIMEOUT_VAR, &value)?,
            None => DEFAULT_TIMEOUT,
        };
        let datastore_timeout = match get(DATASTORE_TIMEOUT_VAR) {
            Some(value) => parse_timeout(DATASTORE_TIMEOUT_VAR, &value)?,
            None => DEFAULT_STORE_TIMEOUT,
        };

        Ok(Self {
            api_keys,
            model: get(MODEL_VAR),
            default_language,
            datastore_url: get(DATASTORE_URL_VAR),
            datastore_key: get(DATASTORE_KEY_VAR).map(SecretString::new),
            request_timeout,
            datastore_timeout,
        })
    }

    /// Pins `MODEL` when set, otherwise draws one provider at random.
    /// Call once per process and keep the result.
    pub fn resolve_provider<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<ProviderSelection, StoryError> {
        ProviderSelection::resolve(self.model.as_deref(), rng)
    }

    /// One client per provider that has a credential.
    pub fn dispatcher(&self) -> Result<Dispatcher, ConfigError> {
        let mut dispatcher = Dispatcher::new();
        for provider in ProviderChoice::ALL {
            if let Some(key) = self.api_keys.get(&provider) {
                dispatcher = dispatcher.with_client(ProviderClient::for_provider(
                    provider,
                    key.clone(),
                    self.request_timeout,
                )?);
            }
        }
        Ok(dispatcher)
    }

    /// The usage recorder, if a datastore is configured. `sqlite:` urls open
    /// a local database; anything else is treated as a PostgREST endpoint.
    pub async fn recorder(&self) -> Result<Option<TelemetryRecorder>, ConfigError> {
        let Some(url) = self.datastore_url.as_deref() else {
            return Ok(None);
        };

        if url.starts_with("sqlite:") {
            let store = SqliteUsageStore::builder(url).build().await?;
            return Ok(Some(TelemetryRecorder::new(store)));
        }

        let key = self
            .datastore_key
            .clone()
            .ok_or(ConfigError::MissingDatastoreKey)?;
        let store = RestUsageStore::new(url, key, self.datastore_timeout)?;
        Ok(Some(TelemetryRecorder::new(store)))
    }
}
