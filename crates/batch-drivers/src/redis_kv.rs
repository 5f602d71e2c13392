use crate::error::DriverError;
use async_trait::async_trait;
use batch_executor::{BatchProcessor, DynError};
use batch_model::{Row, Schema, Value};
use redis::aio::ConnectionManager;
use redis::Pipeline;
use std::sync::Arc;

fn to_redis_arg(value: &Value) -> Vec<u8> {
    match value {
        Value::SmallInt(v) => v.to_string().into_bytes(),
        Value::Int(v) => v.to_string().into_bytes(),
        Value::BigInt(v) => v.to_string().into_bytes(),
        Value::UInt(v) => v.to_string().into_bytes(),
        Value::Float(v) => v.to_string().into_bytes(),
        Value::Bool(v) => (if *v { "1" } else { "0" }).to_string().into_bytes(),
        Value::Text(v) => v.clone().into_bytes(),
        Value::Bytes(v) => v.clone(),
        Value::Timestamp(v) => v.to_rfc3339().into_bytes(),
        Value::Null => Vec::new(),
    }
}

/// One row read in Schema column order (`cmd, key, value, ...`).
pub struct RedisOperations {
    commands: Vec<Vec<Vec<u8>>>,
}

/// Wraps a shared `redis::aio::ConnectionManager`; each batch becomes one
/// pipeline so commands execute in enqueue (FIFO) order per spec.md §4.3.
pub struct RedisProcessor {
    manager: ConnectionManager,
}

impl RedisProcessor {
    pub fn new(manager: ConnectionManager) -> Self {
        RedisProcessor { manager }
    }
}

#[async_trait]
impl BatchProcessor for RedisProcessor {
    type Operations = RedisOperations;

    async fn generate_operations(
        &self,
        schema: &Arc<Schema>,
        rows: &[Row],
    ) -> Result<Self::Operations, DynError> {
        if schema.columns().len() < 2 {
            return Err(Box::new(DriverError::KvColumnCountTooSmall(
                schema.identifier().to_string(),
                schema.columns().len(),
            )));
        }

        let commands = rows
            .iter()
            .map(|row| {
                schema
                    .columns()
                    .iter()
                    .map(|c| to_redis_arg(row.get(c).unwrap_or(&Value::Null)))
                    .collect()
            })
            .collect();

        Ok(RedisOperations { commands })
    }

    async fn execute_operations(&self, ops: &Self::Operations) -> Result<(), DynError> {
        if ops.commands.is_empty() {
            return Ok(());
        }

        let mut pipe = Pipeline::new();
        for command in &ops.commands {
            let mut cmd = redis::cmd(&String::from_utf8_lossy(&command[0]));
            for arg in &command[1..] {
                cmd.arg(arg.as_slice());
            }
            pipe.add_command(cmd);
        }

        let mut manager = self.manager.clone();
        let _: () = pipe
            .query_async(&mut manager)
            .await
            .map_err(DriverError::from)?;
        Ok(())
    }
}
