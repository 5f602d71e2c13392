use crate::classify::{Classifier, DefaultClassifier};
use crate::error::ExecutorError;
use crate::metrics::{ExecuteStatus, MetricsReporter, NoopReporter};
use crate::processor::BatchProcessor;
use crate::retry::{RetryError, RetryPolicy};
use async_trait::async_trait;
use batch_model::{Row, Schema};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// The interface the pipeline assembler dispatches flushed sub-batches
/// through. [`ThrottledExecutor`] is the production implementation;
/// [`crate::mock::MockExecutor`] implements the same trait so pipeline tests
/// never need a live backend.
#[async_trait]
pub trait BatchExecutor: Send + Sync {
    async fn execute_batch(&self, schema: &Arc<Schema>, rows: Vec<Row>) -> Result<(), ExecutorError>;
}

/// `ConcurrencyLimit` / `RetryConfig` wrapper around a [`BatchProcessor`].
///
/// Owns a `tokio::sync::Semaphore` bounding simultaneous `execute_operations`
/// invocations; `concurrency_limit == 0` means unlimited, so no semaphore is
/// acquired at all rather than constructing one with an unreachable permit
/// count.
pub struct ThrottledExecutor<P: BatchProcessor> {
    processor: P,
    semaphore: Option<Arc<Semaphore>>,
    retry: RetryPolicy,
    classifier: Arc<dyn Classifier>,
    metrics: Arc<dyn MetricsReporter>,
}

impl<P: BatchProcessor> ThrottledExecutor<P> {
    pub fn new(processor: P, concurrency_limit: usize, retry: RetryPolicy) -> Self {
        ThrottledExecutor {
            processor,
            semaphore: (concurrency_limit > 0)
                .then(|| Arc::new(Semaphore::new(concurrency_limit))),
            retry,
            classifier: Arc::new(DefaultClassifier),
            metrics: Arc::new(NoopReporter),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsReporter>) -> Self {
        self.metrics = metrics;
        self
    }

}

#[async_trait]
impl<P: BatchProcessor> BatchExecutor for ThrottledExecutor<P> {
    /// Runs the full `ExecuteBatch` algorithm: generate once, then retry the
    /// execute call under the concurrency permit and the configured backoff.
    async fn execute_batch(
        &self,
        schema: &Arc<Schema>,
        rows: Vec<Row>,
    ) -> Result<(), ExecutorError> {
        let table = schema.identifier().to_string();
        let n = rows.len();

        let ops = match self.processor.generate_operations(schema, &rows).await {
            Ok(ops) => ops,
            Err(source) => {
                self.metrics.inc_error(&table, "final:generate");
                error!(table = %table, "batch generation failed");
                return Err(ExecutorError::GenerateFailure { table, source });
            }
        };

        let _permit = match &self.semaphore {
            Some(sem) => Some(sem.clone().acquire_owned().await.expect("semaphore never closed")),
            None => None,
        };

        self.metrics.inc_inflight();
        let start = Instant::now();

        let result = self
            .retry
            .run(
                || async { self.processor.execute_operations(&ops).await },
                |err| {
                    let (_, retryable) = self.classifier.classify(&err.to_string());
                    if retryable {
                        crate::retry::RetryDisposition::Retry
                    } else {
                        crate::retry::RetryDisposition::Stop
                    }
                },
            )
            .await;

        let elapsed = start.elapsed();

        let outcome = match result {
            Ok(()) => {
                self.metrics
                    .observe_execute_duration(&table, n, elapsed, ExecuteStatus::Success);
                self.metrics.observe_batch_size(n);
                info!(table = %table, rows = n, "batch executed");
                Ok(())
            }
            Err(RetryError::Fatal(source)) => {
                let (kind, _) = self.classifier.classify(&source.to_string());
                self.metrics.inc_error(&table, &format!("final:{kind}"));
                self.metrics
                    .observe_execute_duration(&table, n, elapsed, ExecuteStatus::Fail);
                warn!(table = %table, kind = %kind, "batch execution failed, non-retryable");
                Err(ExecutorError::ExecuteFailure {
                    table: table.clone(),
                    kind,
                    attempts: 1,
                    source,
                })
            }
            Err(RetryError::AttemptsExceeded(source)) => {
                let (kind, _) = self.classifier.classify(&source.to_string());
                self.metrics.inc_error(&table, &format!("final:{kind}"));
                self.metrics
                    .observe_execute_duration(&table, n, elapsed, ExecuteStatus::Fail);
                error!(table = %table, kind = %kind, attempts = self.retry.max_attempts, "batch execution failed, retries exhausted");
                Err(ExecutorError::ExecuteFailure {
                    table,
                    kind,
                    attempts: self.retry.max_attempts,
                    source,
                })
            }
        };

        self.metrics.dec_inflight();
        outcome
    }
}
