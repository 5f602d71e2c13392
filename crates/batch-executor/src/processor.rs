use async_trait::async_trait;
use batch_model::{Row, Schema};
use std::error::Error as StdError;
use std::sync::Arc;

pub type DynError = Box<dyn StdError + Send + Sync>;

/// Two-phase backend contract. `generate_operations` is pure (no network
/// I/O) and may fail on malformed schema/rows; `execute_operations` performs
/// the actual write and may fail transiently or permanently. The split is
/// load-bearing: [`crate::executor::ThrottledExecutor`] retries only
/// `execute_operations`, never regenerating operations between attempts.
#[async_trait]
pub trait BatchProcessor: Send + Sync {
    /// Whatever a driver needs to replay the write on retry — a rendered SQL
    /// statement and argument vector, a list of KV commands, etc.
    type Operations: Send + Sync;

    async fn generate_operations(
        &self,
        schema: &Arc<Schema>,
        rows: &[Row],
    ) -> Result<Self::Operations, DynError>;

    async fn execute_operations(&self, ops: &Self::Operations) -> Result<(), DynError>;
}
