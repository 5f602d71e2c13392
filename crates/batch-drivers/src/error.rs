use thiserror::Error;

/// All errors surfaced by a concrete [`batch_executor::BatchProcessor`]
/// implementation, one crate-wide enum per the teacher's `DbError`
/// convention rather than a type per backend.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("sql-planner failed to render statement: {0}")]
    Plan(#[from] sql_planner::PlanError),

    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("SQLite task join error: {0}")]
    SqliteJoin(#[from] tokio::task::JoinError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("KV schema for table {0:?} needs at least 2 columns, got {1}")]
    KvColumnCountTooSmall(String, usize),
}
