pub const USAGE_STATS_TABLE: &str = "usage_stats";

pub const CREATE_USAGE_STATS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS usage_stats (\
    id INTEGER PRIMARY KEY AUTOINCREMENT,\
    datetime TEXT NOT NULL,\
    selected_language TEXT NOT NULL,\
    num_children INTEGER NOT NULL,\
    ages TEXT NOT NULL,\
    values_to_teach TEXT NOT NULL,\
    selected_model TEXT NOT NULL,\
    generation_time REAL NOT NULL,\
    moderated_inputs TEXT,\
    rating INTEGER CHECK (rating BETWEEN 1 AND 5)\
)";

pub const CREATE_USAGE_STATS_DATETIME_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_usage_stats_datetime ON usage_stats (datetime)";

pub const MIGRATION_STATEMENTS_SQL: [&str; 2] = [
    CREATE_USAGE_STATS_TABLE_SQL,
    CREATE_USAGE_STATS_DATETIME_INDEX_SQL,
];
