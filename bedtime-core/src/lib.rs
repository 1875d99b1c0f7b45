//! Core types for bedtime story generation.
//!
//! Holds the request model, the complexity classifier, the moderation gate
//! and the provider catalogue shared by the prompt, llm and telemetry crates.

mod complexity;
mod error;
mod generation;
mod moderation;
mod provider;
mod request;

pub use complexity::{classify, ComplexityTier};
pub use error::{StoryError, GENERATION_FAILED_MESSAGE};
pub use generation::{round_tenths, GenerationPrompt, GenerationResult};
pub use moderation::{check, is_flagged, ModerationVerdict, SENTINEL};
pub use provider::{ProviderChoice, ProviderSelection, SelectionSource};
pub use request::{ChildInfo, Language, Rating, StoryRequest, MAX_AGE, MAX_CHILDREN, MIN_AGE};

/// Output token budget shared by every provider.
pub const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Sampling temperature shared by every provider.
pub const TEMPERATURE: f32 = 0.7;
