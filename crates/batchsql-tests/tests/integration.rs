mod utils;

use batch_config::PipelineConfig;
use batch_executor::{BatchExecutor, ExecutorError, MockExecutor, RetryPolicy, ThrottledExecutor};
use batch_model::Request;
use batchsql::BatchSql;
use std::sync::Arc;
use std::time::Duration;
use tracing_test::traced_test;
use utils::{AlwaysFailsProcessor, ConcurrencyTrackingProcessor, row, users_schema};

fn request_from(schema: &Arc<batch_model::Schema>, id: i32, name: &str) -> Request {
    let mut req = Request::new(schema.clone());
    req.set_int("id", id);
    req.set_text("name", name);
    req
}

// Scenario: a producer submits several rows against one Schema and the
// facade flushes them through to the executor as a single batch once
// `flush_size` is reached.
#[traced_test]
#[tokio::test]
async fn end_to_end_submit_flushes_rows_to_executor() {
    let mock = Arc::new(MockExecutor::new());
    let config = PipelineConfig::new(10, 2, Duration::from_secs(60)).unwrap();
    let batchsql = BatchSql::new(config, mock.clone());

    let schema = users_schema();
    batchsql.submit(request_from(&schema, 1, "alice")).await.unwrap();
    batchsql.submit(request_from(&schema, 2, "bob")).await.unwrap();

    tokio::time::sleep(Duration::from_millis(30)).await;

    let snapshot = mock.snapshot();
    let users = snapshot.get("users").expect("users table flushed");
    assert_eq!(users.batches, 1);
    assert_eq!(users.rows, 2);
}

// Scenario G: two Schema instances describing the same logical table
// ("users") are distinct Arc pointers, so they must flush as separate
// sub-batches even when interleaved in the same flush window.
#[traced_test]
#[tokio::test]
async fn distinct_schema_instances_produce_separate_batches_through_facade() {
    let mock = Arc::new(MockExecutor::new());
    let config = PipelineConfig::new(10, 4, Duration::from_millis(15)).unwrap();
    let batchsql = BatchSql::new(config, mock.clone());

    let schema_a = users_schema();
    let schema_b = users_schema();

    batchsql.submit(request_from(&schema_a, 1, "a")).await.unwrap();
    batchsql.submit(request_from(&schema_b, 2, "b")).await.unwrap();
    batchsql.submit(request_from(&schema_a, 3, "c")).await.unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;

    let snapshot = mock.snapshot();
    let users = snapshot.get("users").expect("users table flushed");
    assert_eq!(users.batches, 2, "distinct Schema pointers must not merge");
    assert_eq!(users.rows, 3);
}

// Boundary behavior: `concurrency_limit` bounds how many
// `execute_operations` calls a `ThrottledExecutor` runs simultaneously,
// independent of how many batches are handed to it at once.
#[tokio::test]
async fn concurrency_limit_bounds_simultaneous_batch_executions() {
    let processor = ConcurrencyTrackingProcessor::new(Duration::from_millis(40));
    let observed_max = processor.observed_max.clone();
    let executor: Arc<dyn BatchExecutor> =
        Arc::new(ThrottledExecutor::new(processor, 2, RetryPolicy::default()));

    let schema = users_schema();
    let mut handles = Vec::new();
    for i in 0..6 {
        let executor = executor.clone();
        let schema = schema.clone();
        handles.push(tokio::spawn(async move {
            executor
                .execute_batch(&schema, vec![row(i, "x")])
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert!(
        observed_max.load(std::sync::atomic::Ordering::SeqCst) <= 2,
        "concurrency limit of 2 must never be exceeded"
    );
}

// Boundary behavior: `Submit` rejects a request synchronously when it
// fails schema validation, never enqueueing it.
#[tokio::test]
async fn submit_rejects_invalid_request_synchronously_through_facade() {
    let mock = Arc::new(MockExecutor::new());
    let config = PipelineConfig::default();
    let batchsql = BatchSql::new(config, mock.clone());

    let schema = users_schema();
    let mut req = Request::new(schema);
    req.set_int("id", 1); // "name" left unset

    assert!(batchsql.submit(req).await.is_err());
}

// A non-retryable execution failure is surfaced on the error channel,
// never through `submit`.
#[tokio::test]
async fn failing_processor_surfaces_execute_failure_on_error_receiver() {
    let retry = RetryPolicy::new(3, Duration::from_millis(1), Duration::from_millis(5));
    let executor: Arc<dyn BatchExecutor> =
        Arc::new(ThrottledExecutor::new(AlwaysFailsProcessor, 0, retry));
    let config = PipelineConfig::new(10, 1, Duration::from_secs(60)).unwrap();
    let batchsql = BatchSql::new(config, executor);
    let mut errors = batchsql.error_receiver();

    let schema = users_schema();
    batchsql.submit(request_from(&schema, 1, "alice")).await.unwrap();

    let err = tokio::time::timeout(Duration::from_secs(1), errors.recv())
        .await
        .expect("error delivered within timeout")
        .expect("error channel still open");

    match err {
        ExecutorError::ExecuteFailure { table, attempts, .. } => {
            assert_eq!(table, "users");
            assert_eq!(attempts, 1, "non-retryable failure stops after one attempt");
        }
        other => panic!("expected ExecuteFailure, got {other:?}"),
    }
}
