use async_trait::async_trait;
use batch_executor::{BatchProcessor, DynError};
use batch_model::{ConflictStrategy, Row, Schema, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn users_schema() -> Arc<Schema> {
    Schema::new("users", ConflictStrategy::Ignore, ["id", "name"]).expect("valid schema")
}

/// `BatchProcessor` whose `execute_operations` always fails with a
/// substring the default classifier treats as non-retryable, so the
/// failure surfaces on the first attempt.
pub struct AlwaysFailsProcessor;

#[async_trait]
impl BatchProcessor for AlwaysFailsProcessor {
    type Operations = usize;

    async fn generate_operations(
        &self,
        _schema: &Arc<Schema>,
        rows: &[Row],
    ) -> Result<Self::Operations, DynError> {
        Ok(rows.len())
    }

    async fn execute_operations(&self, _ops: &Self::Operations) -> Result<(), DynError> {
        Err("constraint violation: duplicate key".into())
    }
}

/// `BatchProcessor` that tracks how many `execute_operations` calls are in
/// flight simultaneously, for asserting a `ThrottledExecutor`'s concurrency
/// limit is actually enforced.
pub struct ConcurrencyTrackingProcessor {
    current: Arc<AtomicUsize>,
    pub observed_max: Arc<AtomicUsize>,
    hold: Duration,
}

impl ConcurrencyTrackingProcessor {
    pub fn new(hold: Duration) -> Self {
        ConcurrencyTrackingProcessor {
            current: Arc::new(AtomicUsize::new(0)),
            observed_max: Arc::new(AtomicUsize::new(0)),
            hold,
        }
    }
}

#[async_trait]
impl BatchProcessor for ConcurrencyTrackingProcessor {
    type Operations = ();

    async fn generate_operations(
        &self,
        _schema: &Arc<Schema>,
        _rows: &[Row],
    ) -> Result<Self::Operations, DynError> {
        Ok(())
    }

    async fn execute_operations(&self, _ops: &Self::Operations) -> Result<(), DynError> {
        let in_flight = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.observed_max.fetch_max(in_flight, Ordering::SeqCst);
        tokio::time::sleep(self.hold).await;
        self.current.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn row(id: i32, name: &str) -> Row {
    let mut row = Row::new();
    row.insert("id".to_string(), Value::Int(id));
    row.insert("name".to_string(), Value::Text(name.to_string()));
    row
}
