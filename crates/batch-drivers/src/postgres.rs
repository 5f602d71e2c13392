use crate::error::DriverError;
use async_trait::async_trait;
use batch_executor::{BatchProcessor, DynError};
use batch_model::{Row, Schema, Value};
use bytes::BytesMut;
use sql_planner::{Postgres as PostgresDialect, render_batch_insert};
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// Local newtype bridging our backend-agnostic `Value` to `tokio_postgres`'s
/// `ToSql`; both the trait and `Value` are foreign to this crate, so we
/// can't implement `ToSql` on `Value` directly.
struct PgParam<'a>(&'a Value);

impl ToSql for PgParam<'_> {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self.0 {
            Value::SmallInt(v) => v.to_sql(ty, out),
            Value::Int(v) => v.to_sql(ty, out),
            Value::BigInt(v) => v.to_sql(ty, out),
            Value::UInt(v) => (*v as i64).to_sql(ty, out),
            Value::Float(v) => v.to_sql(ty, out),
            Value::Bool(v) => v.to_sql(ty, out),
            Value::Text(v) => v.to_sql(ty, out),
            Value::Bytes(v) => v.to_sql(ty, out),
            Value::Timestamp(v) => v.to_sql(ty, out),
            Value::Null => Ok(IsNull::Yes),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

pub struct PostgresOperations {
    statement: String,
    params: Vec<Value>,
}

/// Wraps a shared `tokio_postgres::Client`; the caller owns connection
/// construction and pooling (out of scope per spec.md §1), the processor
/// only issues statements against the handle it's given.
pub struct PostgresProcessor {
    client: Arc<Client>,
}

impl PostgresProcessor {
    pub fn new(client: Arc<Client>) -> Self {
        PostgresProcessor { client }
    }
}

#[async_trait]
impl BatchProcessor for PostgresProcessor {
    type Operations = PostgresOperations;

    async fn generate_operations(
        &self,
        schema: &Arc<Schema>,
        rows: &[Row],
    ) -> Result<Self::Operations, DynError> {
        let (statement, params) =
            render_batch_insert(schema, rows, &PostgresDialect).map_err(DriverError::from)?;
        Ok(PostgresOperations { statement, params })
    }

    async fn execute_operations(&self, ops: &Self::Operations) -> Result<(), DynError> {
        if ops.statement.is_empty() {
            return Ok(());
        }
        let boxed: Vec<PgParam> = ops.params.iter().map(PgParam).collect();
        let refs: Vec<&(dyn ToSql + Sync)> =
            boxed.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        self.client
            .execute(&ops.statement, &refs)
            .await
            .map_err(DriverError::from)?;
        Ok(())
    }
}
