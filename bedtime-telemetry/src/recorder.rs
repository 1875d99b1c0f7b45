use std::sync::Arc;

use bedtime_core::{Rating, StoryRequest};

use crate::{NewUsageRecord, RecordId, UsageStore};

/// Best-effort writer of usage rows. Store failures are logged and
/// swallowed so story delivery never depends on telemetry.
#[derive(Clone)]
pub struct TelemetryRecorder {
    store: Arc<dyn UsageStore>,
}

impl TelemetryRecorder {
    pub fn new<S: UsageStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_arc(store: Arc<dyn UsageStore>) -> Self {
        Self { store }
    }

    /// Inserts one row, returning its id, or `None` if the store failed.
    pub async fn record(&self, record: &NewUsageRecord) -> Option<RecordId> {
        match self.store.insert(record).await {
            Ok(id) => {
                tracing::debug!(
                    record_id = %id,
                    moderated = record.is_moderated(),
                    "usage recorded"
                );
                Some(id)
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    moderated = record.is_moderated(),
                    "failed to record usage"
                );
                None
            }
        }
    }

    pub async fn record_generation(
        &self,
        request: &StoryRequest,
        model: &str,
        elapsed_seconds: f64,
    ) -> Option<RecordId> {
        self.record(&NewUsageRecord::generated(request, model, elapsed_seconds))
            .await
    }

    pub async fn record_moderation(&self, request: &StoryRequest, model: &str) -> Option<RecordId> {
        match NewUsageRecord::moderated(request, model) {
            Ok(record) => self.record(&record).await,
            Err(error) => {
                tracing::warn!(error = %error, "failed to build moderated usage record");
                None
            }
        }
    }

    /// Attaches `rating` to a previously recorded row. A missing id (the
    /// insert failed earlier) is a no-op.
    pub async fn attach_rating(&self, id: Option<&RecordId>, rating: Rating) {
        let Some(id) = id else {
            tracing::debug!("no usage record to rate");
            return;
        };

        if let Err(error) = self.store.set_rating(id, rating).await {
            tracing::warn!(
                record_id = %id,
                rating = rating.value(),
                error = %error,
                "failed to attach rating"
            );
        }
    }
}
