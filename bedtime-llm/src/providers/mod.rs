//! Provider-specific LLM clients

pub mod anthropic;
pub mod google;
pub mod groq;
pub mod openai;
