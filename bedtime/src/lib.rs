//! Personalized bedtime stories from a handful of structured inputs.
//!
//! [`StoryService`] runs the whole pipeline: classify the children's ages,
//! build the prompt, dispatch it to the process-wide provider, screen the
//! reply for the moderation sentinel and record usage.
//!
//! ```rust,no_run
//! use bedtime::{ChildInfo, Language, Rating, StoryConfig, StoryRequest, StoryService};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoryConfig::from_env()?;
//! let service = StoryService::from_config(&config).await?;
//!
//! let request = StoryRequest::new(
//!     vec![ChildInfo::new("Mia", 6)],
//!     "teddy bear",
//!     "kindness",
//!     Language::English,
//! )?;
//! let outcome = service.generate(request).await?;
//! println!("{}", outcome.story);
//! service.rate(outcome.record_id.as_ref(), Rating::new(5)?).await;
//! # Ok(())
//! # }
//! ```

mod config;
mod service;

pub use bedtime_core as core;
pub use bedtime_llm as llm;
pub use bedtime_prompt as prompt;
pub use bedtime_telemetry as telemetry;

pub use bedtime_core::{
    ChildInfo, ComplexityTier, Language, ProviderChoice, ProviderSelection, Rating, StoryError,
    StoryRequest,
};
pub use bedtime_telemetry::RecordId;
pub use config::{ConfigError, StoryConfig};
pub use service::{StoryOutcome, StoryService};
