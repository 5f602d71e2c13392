use crate::error::BatchSqlError;
use batch_config::{PipelineConfig, RetryConfig};
use batch_drivers::{MySqlProcessor, PostgresProcessor, RedisProcessor, SqliteProcessor};
use batch_executor::{BatchExecutor, ExecutorError, RetryPolicy, ThrottledExecutor};
use batch_model::Request;
use batch_pipeline::{Pipeline, PipelineError};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Public entry point: wires a backend driver into a
/// [`ThrottledExecutor`](batch_executor::ThrottledExecutor), hands that to a
/// [`Pipeline`](batch_pipeline::Pipeline), and exposes the two calls a
/// producer needs — `submit` and `error_receiver`. Everything upstream of
/// the driver (connection construction/pooling) is the caller's concern.
pub struct BatchSql {
    pipeline: Pipeline,
}

impl BatchSql {
    /// Generic constructor for callers assembling their own executor — the
    /// per-backend constructors below are thin convenience wrappers around
    /// this one.
    pub fn new(pipeline_config: PipelineConfig, executor: Arc<dyn BatchExecutor>) -> Self {
        BatchSql {
            pipeline: Pipeline::new(pipeline_config, executor),
        }
    }

    pub fn new_mysql(
        pool: mysql_async::Pool,
        pipeline_config: PipelineConfig,
        concurrency_limit: usize,
        retry_config: RetryConfig,
    ) -> Result<Self, BatchSqlError> {
        let processor = MySqlProcessor::new(pool);
        let executor = throttled(processor, concurrency_limit, retry_config)?;
        Ok(Self::new(pipeline_config, executor))
    }

    pub fn new_postgresql(
        client: Arc<tokio_postgres::Client>,
        pipeline_config: PipelineConfig,
        concurrency_limit: usize,
        retry_config: RetryConfig,
    ) -> Result<Self, BatchSqlError> {
        let processor = PostgresProcessor::new(client);
        let executor = throttled(processor, concurrency_limit, retry_config)?;
        Ok(Self::new(pipeline_config, executor))
    }

    pub fn new_sqlite(
        conn: rusqlite::Connection,
        pipeline_config: PipelineConfig,
        concurrency_limit: usize,
        retry_config: RetryConfig,
    ) -> Result<Self, BatchSqlError> {
        let processor = SqliteProcessor::new(conn);
        let executor = throttled(processor, concurrency_limit, retry_config)?;
        Ok(Self::new(pipeline_config, executor))
    }

    pub fn new_redis(
        manager: redis::aio::ConnectionManager,
        pipeline_config: PipelineConfig,
        concurrency_limit: usize,
        retry_config: RetryConfig,
    ) -> Result<Self, BatchSqlError> {
        let processor = RedisProcessor::new(manager);
        let executor = throttled(processor, concurrency_limit, retry_config)?;
        Ok(Self::new(pipeline_config, executor))
    }

    /// Enqueues `req`. Blocks (backpressure) while the ingestion queue is
    /// full; rejects synchronously on schema-validation failure.
    pub async fn submit(&self, req: Request) -> Result<(), PipelineError> {
        self.pipeline.submit(req).await
    }

    /// Takes ownership of the channel execution failures are delivered on.
    /// Call once, at startup.
    pub fn error_receiver(&self) -> mpsc::Receiver<ExecutorError> {
        self.pipeline.error_receiver()
    }

    /// Closes the ingestion queue and waits for the final flush to drain.
    pub async fn shutdown(self) {
        self.pipeline.shutdown().await
    }
}

fn throttled<P: batch_executor::BatchProcessor + 'static>(
    processor: P,
    concurrency_limit: usize,
    retry_config: RetryConfig,
) -> Result<Arc<dyn BatchExecutor>, BatchSqlError> {
    let retry = RetryPolicy::new(
        retry_config.effective_max_attempts(),
        retry_config.backoff_base,
        retry_config.max_backoff,
    );
    Ok(Arc::new(ThrottledExecutor::new(
        processor,
        concurrency_limit,
        retry,
    )))
}
