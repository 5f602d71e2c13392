use crate::error::DriverError;
use async_trait::async_trait;
use batch_executor::{BatchProcessor, DynError};
use batch_model::{Row, Schema, Value};
use rusqlite::Connection;
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqliteNative};
use sql_planner::{Sqlite as SqliteDialect, render_batch_insert};
use std::sync::{Arc, Mutex};

struct SqliteParam<'a>(&'a Value);

impl ToSql for SqliteParam<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let native = match self.0 {
            Value::SmallInt(v) => SqliteNative::Integer(*v as i64),
            Value::Int(v) => SqliteNative::Integer(*v as i64),
            Value::BigInt(v) => SqliteNative::Integer(*v),
            Value::UInt(v) => SqliteNative::Integer(*v as i64),
            Value::Float(v) => SqliteNative::Real(*v),
            Value::Bool(v) => SqliteNative::Integer(if *v { 1 } else { 0 }),
            Value::Text(v) => SqliteNative::Text(v.clone()),
            Value::Bytes(v) => SqliteNative::Blob(v.clone()),
            Value::Timestamp(v) => SqliteNative::Text(v.to_rfc3339()),
            Value::Null => SqliteNative::Null,
        };
        Ok(ToSqlOutput::Owned(native))
    }
}

pub struct SqliteOperations {
    statement: String,
    params: Vec<Value>,
}

/// Wraps a synchronous `rusqlite::Connection` (the only sync DB driver we
/// pull in) behind a `Mutex` and `tokio::task::spawn_blocking`, composing the
/// blocking connection with this crate's otherwise async-everywhere
/// processors.
pub struct SqliteProcessor {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProcessor {
    pub fn new(conn: Connection) -> Self {
        SqliteProcessor {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

#[async_trait]
impl BatchProcessor for SqliteProcessor {
    type Operations = SqliteOperations;

    async fn generate_operations(
        &self,
        schema: &Arc<Schema>,
        rows: &[Row],
    ) -> Result<Self::Operations, DynError> {
        let (statement, params) =
            render_batch_insert(schema, rows, &SqliteDialect).map_err(DriverError::from)?;
        Ok(SqliteOperations { statement, params })
    }

    async fn execute_operations(&self, ops: &Self::Operations) -> Result<(), DynError> {
        if ops.statement.is_empty() {
            return Ok(());
        }
        let conn = self.conn.clone();
        let statement = ops.statement.clone();
        let params = ops.params.clone();

        tokio::task::spawn_blocking(move || -> Result<(), DriverError> {
            let conn = conn.lock().expect("sqlite connection mutex poisoned");
            let sqlite_params: Vec<SqliteParam> = params.iter().map(SqliteParam).collect();
            let refs: Vec<&dyn ToSql> = sqlite_params.iter().map(|p| p as &dyn ToSql).collect();
            conn.execute(&statement, refs.as_slice())?;
            Ok(())
        })
        .await
        .map_err(DriverError::from)?
        .map_err(|e| Box::new(e) as DynError)?;

        Ok(())
    }
}
