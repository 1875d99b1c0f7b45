use std::time::Duration;

use async_trait::async_trait;
use bedtime_core::Rating;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::schema::USAGE_STATS_TABLE;
use crate::{NewUsageRecord, RecordId, TelemetryError, UsageStore};

/// Upper bound on one datastore round trip. Story delivery waits on the
/// usage write, so this has to stay short.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// `usage_stats` behind a PostgREST endpoint (as exposed by Supabase).
#[derive(Clone)]
pub struct RestUsageStore {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl RestUsageStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, TelemetryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TelemetryError::Config(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            USAGE_STATS_TABLE
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.api_key.expose_secret();
        request.header("apikey", key.as_str()).bearer_auth(key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, TelemetryError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TelemetryError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn record_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(number) => Some(RecordId::new(number.to_string())),
        Value::String(text) if !text.is_empty() => Some(RecordId::new(text.clone())),
        _ => None,
    }
}

#[async_trait]
impl UsageStore for RestUsageStore {
    async fn insert(&self, record: &NewUsageRecord) -> Result<RecordId, TelemetryError> {
        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(record);
        let rows: Vec<Value> = self.send(request).await?.json().await?;

        rows.first()
            .and_then(|row| row.get("id"))
            .and_then(record_id)
            .ok_or_else(|| TelemetryError::Malformed("inserted row has no id".to_string()))
    }

    async fn set_rating(&self, id: &RecordId, rating: Rating) -> Result<(), TelemetryError> {
        let request = self
            .client
            .patch(self.table_url())
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&json!({ "rating": rating.value() }));
        self.send(request).await?;
        Ok(())
    }
}
