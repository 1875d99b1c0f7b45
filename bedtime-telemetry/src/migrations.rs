use sqlx::SqlitePool;

use crate::error::TelemetryError;
use crate::schema::MIGRATION_STATEMENTS_SQL;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), TelemetryError> {
    for statement in MIGRATION_STATEMENTS_SQL {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(TelemetryError::Migration)?;
    }

    Ok(())
}
