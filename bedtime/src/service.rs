use bedtime_core::{
    Language, ModerationVerdict, ProviderChoice, ProviderSelection, Rating, StoryError,
    StoryRequest,
};
use bedtime_llm::Dispatcher;
use bedtime_prompt::build_for_request;
use bedtime_telemetry::{RecordId, TelemetryRecorder};

use crate::{ConfigError, StoryConfig};

/// A delivered story.
#[derive(Clone, Debug, PartialEq)]
pub struct StoryOutcome {
    pub story: String,
    pub elapsed_seconds: f64,
    pub provider: ProviderChoice,
    /// Id of the usage row, for a later rating. `None` when telemetry is
    /// disabled or the write failed.
    pub record_id: Option<RecordId>,
}

/// The end-to-end story pipeline with its frozen provider selection.
#[derive(Clone)]
pub struct StoryService {
    dispatcher: Dispatcher,
    selection: ProviderSelection,
    recorder: Option<TelemetryRecorder>,
    default_language: Language,
}

impl StoryService {
    pub fn new(dispatcher: Dispatcher, selection: ProviderSelection) -> Self {
        Self {
            dispatcher,
            selection,
            recorder: None,
            default_language: Language::default(),
        }
    }

    pub fn with_recorder(mut self, recorder: TelemetryRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    /// Wires clients, the usage store and a provider selection from config.
    /// Without `MODEL`, the provider is drawn at random here, once.
    pub async fn from_config(config: &StoryConfig) -> Result<Self, ConfigError> {
        let selection = config.resolve_provider(&mut rand::thread_rng())?;
        tracing::info!(
            provider = %selection.provider(),
            source = ?selection.source(),
            "story provider selected"
        );

        let mut service = Self::new(config.dispatcher()?, selection)
            .with_default_language(config.default_language);
        if let Some(recorder) = config.recorder().await? {
            service = service.with_recorder(recorder);
        }
        Ok(service)
    }

    pub fn provider(&self) -> ProviderChoice {
        self.selection.provider()
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    fn model(&self) -> &str {
        let provider = self.provider();
        self.dispatcher
            .model(provider)
            .unwrap_or_else(|| provider.default_model())
    }

    /// Generates one story.
    ///
    /// Successful and moderated attempts each leave one usage row. A
    /// moderated reply is never returned as a story.
    pub async fn generate(&self, request: StoryRequest) -> Result<StoryOutcome, StoryError> {
        let (prompt, tier, mean_age) = build_for_request(&request)?;
        tracing::debug!(?tier, mean_age, language = %request.language(), "story prompt built");

        let provider = self.provider();
        let result = self.dispatcher.generate(&prompt, provider).await?;
        let elapsed_seconds = result.elapsed_seconds;

        match ModerationVerdict::from(result) {
            ModerationVerdict::Story(story) => {
                let record_id = match &self.recorder {
                    Some(recorder) => {
                        recorder
                            .record_generation(&request, self.model(), elapsed_seconds)
                            .await
                    }
                    None => None,
                };
                Ok(StoryOutcome {
                    story,
                    elapsed_seconds,
                    provider,
                    record_id,
                })
            }
            ModerationVerdict::Flagged { explanation } => {
                tracing::warn!(
                    provider = %provider,
                    explanation = %explanation,
                    "provider flagged story inputs"
                );
                if let Some(recorder) = &self.recorder {
                    recorder.record_moderation(&request, self.model()).await;
                }
                Err(StoryError::ModeratedContent { explanation })
            }
        }
    }

    /// Attaches a rating to an earlier story. Never fails; telemetry problems
    /// are only logged.
    pub async fn rate(&self, record_id: Option<&RecordId>, rating: Rating) {
        if let Some(recorder) = &self.recorder {
            recorder.attach_rating(record_id, rating).await;
        }
    }
}
