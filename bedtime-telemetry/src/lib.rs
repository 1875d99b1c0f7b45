//! Usage telemetry for story generation.
//!
//! One `usage_stats` row per generation attempt, later updated with the
//! user's rating. Writes go through a [`UsageStore`]; the
//! [`TelemetryRecorder`] wraps a store and never lets a failed write reach
//! the caller.

pub mod error;
pub mod migrations;
pub mod record;
pub mod recorder;
pub mod rest;
pub mod schema;
pub mod sqlite;
pub mod store;

pub use error::TelemetryError;
pub use record::{NewUsageRecord, RecordId, UsageRecord, MODERATED_PREFIX};
pub use recorder::TelemetryRecorder;
pub use rest::{RestUsageStore, DEFAULT_STORE_TIMEOUT};
pub use sqlite::{SqliteUsageStore, SqliteUsageStoreBuilder};
pub use store::UsageStore;
