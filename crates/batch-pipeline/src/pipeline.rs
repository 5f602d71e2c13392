use crate::assembler;
use crate::error::PipelineError;
use batch_config::PipelineConfig;
use batch_executor::{BatchExecutor, ExecutorError, MetricsReporter, NoopReporter};
use batch_model::Request;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default capacity for the error channel a `Pipeline` owns. Callers needing
/// a different capacity go through `Pipeline::with_metrics`.
const DEFAULT_ERROR_CAPACITY: usize = 256;

/// Bounded ingestion queue plus the single assembler task it feeds.
/// Dropping the `Pipeline` (or calling `shutdown`) drops the request
/// sender, which closes the queue and lets the assembler drain its final
/// flush before exiting.
pub struct Pipeline {
    sender: mpsc::Sender<Request>,
    assembler_handle: JoinHandle<()>,
    error_receiver: Mutex<Option<mpsc::Receiver<ExecutorError>>>,
    metrics: Arc<dyn MetricsReporter>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, executor: Arc<dyn BatchExecutor>) -> Self {
        Self::with_metrics(
            config,
            executor,
            Arc::new(NoopReporter),
            DEFAULT_ERROR_CAPACITY,
        )
    }

    pub fn with_metrics(
        config: PipelineConfig,
        executor: Arc<dyn BatchExecutor>,
        metrics: Arc<dyn MetricsReporter>,
        error_capacity: usize,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(config.buffer_size);
        let (error_sender, error_receiver) = mpsc::channel(error_capacity);

        let assembler_handle = tokio::spawn(assembler::run(
            receiver,
            executor,
            metrics.clone(),
            config.flush_size,
            config.flush_interval,
            error_sender,
        ));

        Pipeline {
            sender,
            assembler_handle,
            error_receiver: Mutex::new(Some(error_receiver)),
            metrics,
        }
    }

    /// Enqueues `req`, blocking (backpressure) while the queue is full.
    /// Rejects synchronously on schema-validation failure; never partially
    /// enqueues an invalid request.
    pub async fn submit(&self, req: Request) -> Result<(), PipelineError> {
        req.validate()?;
        let started = Instant::now();
        self.sender
            .send(req)
            .await
            .map_err(|_| PipelineError::Closed)?;
        self.metrics.observe_enqueue_latency(started.elapsed());
        Ok(())
    }

    /// Takes ownership of the error receiver. Callers should call this once,
    /// at startup, and drain it for the pipeline's lifetime — execution
    /// failures are delivered here, never through `submit`.
    pub fn error_receiver(&self) -> mpsc::Receiver<ExecutorError> {
        self.error_receiver
            .lock()
            .expect("error receiver mutex poisoned")
            .take()
            .expect("error_receiver() called more than once")
    }

    /// Closes the ingestion queue and waits for the assembler's final flush
    /// to complete before returning. Consumes `self`: a `Pipeline` has
    /// nothing left to do once shut down.
    pub async fn shutdown(self) {
        drop(self.sender);
        let _ = self.assembler_handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batch_executor::MockExecutor;
    use batch_model::{ConflictStrategy, Schema};
    use std::time::Duration;

    #[tokio::test]
    async fn flush_size_of_one_triggers_immediate_flush_and_groups_by_schema() {
        let mock = Arc::new(MockExecutor::new());
        let config = PipelineConfig::new(10, 1, Duration::from_secs(60)).unwrap();
        let pipeline = Pipeline::new(config, mock.clone());

        let schema = Schema::new("users", ConflictStrategy::Ignore, ["id", "name"]).unwrap();
        let mut req = Request::new(schema.clone());
        req.set_int("id", 1);
        req.set_text("name", "alice");
        pipeline.submit(req).await.unwrap();

        // Give the assembler a chance to observe and flush the single row.
        tokio::time::sleep(Duration::from_millis(20)).await;

        let snapshot = mock.snapshot();
        let users = snapshot.get("users").expect("users table flushed");
        assert_eq!(users.batches, 1);
        assert_eq!(users.rows, 1);
    }

    #[tokio::test]
    async fn distinct_schema_instances_for_same_table_flush_as_separate_sub_batches() {
        let mock = Arc::new(MockExecutor::new());
        let config = PipelineConfig::new(10, 4, Duration::from_millis(20)).unwrap();
        let pipeline = Pipeline::new(config, mock.clone());

        let schema_a = Schema::new("users", ConflictStrategy::Ignore, ["id", "name"]).unwrap();
        let schema_b = Schema::new("users", ConflictStrategy::Ignore, ["id", "name"]).unwrap();

        for (schema, id) in [(&schema_a, 1), (&schema_b, 2), (&schema_a, 3)] {
            let mut req = Request::new(schema.clone());
            req.set_int("id", id);
            req.set_text("name", "x");
            pipeline.submit(req).await.unwrap();
        }

        tokio::time::sleep(Duration::from_millis(60)).await;

        let snapshot = mock.snapshot();
        let users = snapshot.get("users").expect("users table flushed");
        assert_eq!(users.batches, 2);
        assert_eq!(users.rows, 3);
    }

    #[tokio::test]
    async fn invalid_request_is_rejected_synchronously() {
        let mock = Arc::new(MockExecutor::new());
        let config = PipelineConfig::default();
        let pipeline = Pipeline::new(config, mock);

        let schema = Schema::new("users", ConflictStrategy::Ignore, ["id", "name"]).unwrap();
        let mut req = Request::new(schema);
        req.set_int("id", 1); // "name" left unset -> fails strict validation

        assert!(pipeline.submit(req).await.is_err());
    }
}
