use async_trait::async_trait;
use bedtime_core::Rating;
use sqlx::Row;

use crate::migrations::run_migrations;
use crate::{NewUsageRecord, RecordId, TelemetryError, UsageRecord, UsageStore};

const INSERT_SQL: &str = "INSERT INTO usage_stats (\
    datetime, selected_language, num_children, ages, values_to_teach,\
    selected_model, generation_time, moderated_inputs\
) VALUES (?, ?, ?, ?, ?, ?, ?, ?)";

const SET_RATING_SQL: &str = "UPDATE usage_stats SET rating = ? WHERE id = ?";

const SELECT_SQL: &str = "SELECT id, datetime, selected_language, num_children, ages,\
    values_to_teach, selected_model, generation_time, moderated_inputs, rating \
    FROM usage_stats WHERE id = ?";

/// `usage_stats` kept in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteUsageStore {
    pool: sqlx::SqlitePool,
}

#[derive(Debug, Clone)]
pub struct SqliteUsageStoreBuilder {
    database_url: String,
    max_connections: u32,
}

impl SqliteUsageStore {
    pub fn builder(database_url: impl Into<String>) -> SqliteUsageStoreBuilder {
        SqliteUsageStoreBuilder {
            database_url: database_url.into(),
            max_connections: 1,
        }
    }

    fn row_id(id: &RecordId) -> Result<i64, TelemetryError> {
        id.as_str()
            .parse()
            .map_err(|_| TelemetryError::NotFound(id.clone()))
    }

    pub async fn fetch(&self, id: &RecordId) -> Result<Option<UsageRecord>, TelemetryError> {
        let row = sqlx::query(SELECT_SQL)
            .bind(Self::row_id(id)?)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let rating: Option<i64> = row.try_get("rating")?;
        Ok(Some(UsageRecord {
            id: RecordId::new(row.try_get::<i64, _>("id")?.to_string()),
            datetime: row.try_get("datetime")?,
            selected_language: row.try_get("selected_language")?,
            num_children: row.try_get("num_children")?,
            ages: row.try_get("ages")?,
            values_to_teach: row.try_get("values_to_teach")?,
            selected_model: row.try_get("selected_model")?,
            generation_time: row.try_get("generation_time")?,
            moderated_inputs: row.try_get("moderated_inputs")?,
            rating: rating.and_then(|value| u8::try_from(value).ok()),
        }))
    }
}

impl SqliteUsageStoreBuilder {
    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub async fn build(self) -> Result<SqliteUsageStore, TelemetryError> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.database_url)
            .await
            .map_err(TelemetryError::Connection)?;

        run_migrations(&pool).await?;

        Ok(SqliteUsageStore { pool })
    }
}

#[async_trait]
impl UsageStore for SqliteUsageStore {
    async fn insert(&self, record: &NewUsageRecord) -> Result<RecordId, TelemetryError> {
        let result = sqlx::query(INSERT_SQL)
            .bind(&record.datetime)
            .bind(&record.selected_language)
            .bind(record.num_children)
            .bind(&record.ages)
            .bind(&record.values_to_teach)
            .bind(&record.selected_model)
            .bind(record.generation_time)
            .bind(&record.moderated_inputs)
            .execute(&self.pool)
            .await?;

        Ok(RecordId::new(result.last_insert_rowid().to_string()))
    }

    async fn set_rating(&self, id: &RecordId, rating: Rating) -> Result<(), TelemetryError> {
        let result = sqlx::query(SET_RATING_SQL)
            .bind(i64::from(rating.value()))
            .bind(Self::row_id(id)?)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TelemetryError::NotFound(id.clone()));
        }
        Ok(())
    }
}
