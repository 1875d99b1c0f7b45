use thiserror::Error;

use crate::RecordId;

/// A failed telemetry write. Logged and swallowed by `TelemetryRecorder`.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("usage store connection failed: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("usage store migration failed: {0}")]
    Migration(#[source] sqlx::Error),
    #[error("usage store query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("usage store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("usage store http error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("usage store returned a malformed response: {0}")]
    Malformed(String),
    #[error("usage record {0} not found")]
    NotFound(RecordId),
    #[error("invalid usage store configuration: {0}")]
    Config(String),
    #[error("failed to serialize usage payload: {0}")]
    Serialize(#[from] serde_json::Error),
}
