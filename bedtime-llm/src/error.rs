use thiserror::Error;

/// Provider-level failure. Carries full detail for logs; the dispatcher
/// turns every variant into a generic `StoryError::GenerationFailed`.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("provider api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("generation blocked: {0}")]
    Blocked(String),
}

impl From<reqwest::Error> for LlmError {
    /// Drops the request url first: it may carry a credential.
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            LlmError::Malformed(err.to_string())
        } else {
            LlmError::Transport(err.to_string())
        }
    }
}
