use crate::error::DriverError;
use async_trait::async_trait;
use batch_executor::{BatchProcessor, DynError};
use batch_model::{Row, Schema, Value};
use mysql_async::prelude::Queryable;
use mysql_async::{Params, Pool, Value as MySqlValue};
use sql_planner::{MySql as MySqlDialect, render_batch_insert};
use std::sync::Arc;

fn to_mysql_value(value: &Value) -> MySqlValue {
    match value {
        Value::SmallInt(v) => MySqlValue::Int(*v as i64),
        Value::Int(v) => MySqlValue::Int(*v as i64),
        Value::BigInt(v) => MySqlValue::Int(*v),
        Value::UInt(v) => MySqlValue::UInt(*v),
        Value::Float(v) => MySqlValue::Double(*v),
        Value::Bool(v) => MySqlValue::Int(if *v { 1 } else { 0 }),
        Value::Text(v) => MySqlValue::Bytes(v.clone().into_bytes()),
        Value::Bytes(v) => MySqlValue::Bytes(v.clone()),
        Value::Timestamp(v) => {
            use chrono::{Datelike, Timelike};
            let naive = v.naive_utc();
            MySqlValue::Date(
                naive.year() as u16,
                naive.month() as u8,
                naive.day() as u8,
                naive.hour() as u8,
                naive.minute() as u8,
                naive.second() as u8,
                naive.and_utc().timestamp_subsec_micros(),
            )
        }
        Value::Null => MySqlValue::NULL,
    }
}

/// Rendered statement text plus its positional argument vector — exactly
/// what `execute_operations` needs to replay on retry without touching
/// `sql-planner` again.
pub struct MySqlOperations {
    statement: String,
    params: Vec<MySqlValue>,
}

pub struct MySqlProcessor {
    pool: Pool,
}

impl MySqlProcessor {
    pub fn new(pool: Pool) -> Self {
        MySqlProcessor { pool }
    }
}

#[async_trait]
impl BatchProcessor for MySqlProcessor {
    type Operations = MySqlOperations;

    async fn generate_operations(
        &self,
        schema: &Arc<Schema>,
        rows: &[Row],
    ) -> Result<Self::Operations, DynError> {
        let (statement, args) =
            render_batch_insert(schema, rows, &MySqlDialect).map_err(DriverError::from)?;
        let params = args.iter().map(to_mysql_value).collect();
        Ok(MySqlOperations { statement, params })
    }

    async fn execute_operations(&self, ops: &Self::Operations) -> Result<(), DynError> {
        if ops.statement.is_empty() {
            return Ok(());
        }
        let mut conn = self.pool.get_conn().await.map_err(DriverError::from)?;
        conn.exec_drop(&ops.statement, Params::Positional(ops.params.clone()))
            .await
            .map_err(DriverError::from)?;
        Ok(())
    }
}
