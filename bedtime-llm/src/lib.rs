//! Provider clients and the dispatcher that routes a story prompt to one of them.
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use bedtime_core::{GenerationPrompt, ProviderChoice};
//! use bedtime_llm::{Dispatcher, ProviderClient};
//! use secrecy::SecretString;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ProviderClient::for_provider(
//!     ProviderChoice::Groq,
//!     SecretString::new("gsk-...".to_string()),
//!     Duration::from_secs(60),
//! )?;
//! let dispatcher = Dispatcher::new().with_client(client);
//! let result = dispatcher
//!     .generate(&GenerationPrompt::new("Tell a story"), ProviderChoice::Groq)
//!     .await?;
//! println!("{} ({}s)", result.text, result.elapsed_seconds);
//! # Ok(())
//! # }
//! ```

mod dispatcher;
mod error;
mod types;

pub mod openai_compatible;
pub mod providers;

pub use dispatcher::{Dispatcher, ProviderClient, DEFAULT_TIMEOUT};
pub use error::LlmError;
pub use openai_compatible::{OpenAiCompatibleBuilder, OpenAiCompatibleClient};
pub use providers::anthropic::AnthropicClient;
pub use providers::google::GoogleClient;
pub use providers::groq::GroqClient;
pub use providers::openai::OpenAiClient;
pub use types::CompletionRequest;
