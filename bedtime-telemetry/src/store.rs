use async_trait::async_trait;
use bedtime_core::Rating;

use crate::{NewUsageRecord, RecordId, TelemetryError};

/// The narrow contract the external datastore has to honour: append a row,
/// then set its rating by id.
#[async_trait]
pub trait UsageStore: Send + Sync {
    async fn insert(&self, record: &NewUsageRecord) -> Result<RecordId, TelemetryError>;

    /// Sets or overwrites the rating. Repeating the call with the same
    /// rating leaves the row unchanged.
    async fn set_rating(&self, id: &RecordId, rating: Rating) -> Result<(), TelemetryError>;
}
