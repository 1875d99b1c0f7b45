use std::fmt;

use bedtime_core::{ChildInfo, StoryRequest};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::TelemetryError;

/// Prepended to `values_to_teach` on rows for moderated generations.
pub const MODERATED_PREFIX: &str = "MODERATED: ";

/// Identifier the store assigned to a row. Opaque to everything but the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `usage_stats` row before insertion. Field names are the column names.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewUsageRecord {
    pub datetime: String,
    pub selected_language: String,
    pub num_children: i64,
    pub ages: String,
    pub values_to_teach: String,
    pub selected_model: String,
    pub generation_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderated_inputs: Option<String>,
}

#[derive(Serialize)]
struct ModeratedInputs<'a> {
    children: &'a [ChildInfo],
    activities_and_toys: &'a str,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn join_ages(request: &StoryRequest) -> String {
    request
        .ages()
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl NewUsageRecord {
    /// Row for a story that was delivered.
    pub fn generated(request: &StoryRequest, model: &str, elapsed_seconds: f64) -> Self {
        Self {
            datetime: now_rfc3339(),
            selected_language: request.language().label().to_string(),
            num_children: request.children().len() as i64,
            ages: join_ages(request),
            values_to_teach: request.values_to_teach().to_string(),
            selected_model: model.to_string(),
            generation_time: elapsed_seconds,
            moderated_inputs: None,
        }
    }

    /// Row for a generation the provider flagged. Keeps the raw children and
    /// activities for later review; generation time is recorded as zero.
    pub fn moderated(request: &StoryRequest, model: &str) -> Result<Self, TelemetryError> {
        let inputs = serde_json::to_string(&ModeratedInputs {
            children: request.children(),
            activities_and_toys: request.activities_and_toys(),
        })?;
        Ok(Self {
            values_to_teach: format!("{MODERATED_PREFIX}{}", request.values_to_teach()),
            generation_time: 0.0,
            moderated_inputs: Some(inputs),
            ..Self::generated(request, model, 0.0)
        })
    }

    pub fn is_moderated(&self) -> bool {
        self.moderated_inputs.is_some()
    }
}

/// A stored `usage_stats` row.
#[derive(Clone, Debug, PartialEq)]
pub struct UsageRecord {
    pub id: RecordId,
    pub datetime: String,
    pub selected_language: String,
    pub num_children: i64,
    pub ages: String,
    pub values_to_teach: String,
    pub selected_model: String,
    pub generation_time: f64,
    pub moderated_inputs: Option<String>,
    pub rating: Option<u8>,
}

impl UsageRecord {
    pub fn moderated_inputs_json(&self) -> Option<serde_json::Value> {
        self.moderated_inputs
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}
