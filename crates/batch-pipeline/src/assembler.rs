use batch_executor::{BatchExecutor, MetricsReporter};
use batch_model::{Request, Row, Schema};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{info, warn};

/// One Schema-identity sub-batch carved out of the assembler's working
/// buffer on flush.
struct Group {
    schema: Arc<Schema>,
    rows: Vec<Row>,
}

/// Splits a flushed buffer into per-Schema sub-batches by `Arc` pointer
/// identity, preserving enqueue order both across groups (first-seen order)
/// and within each group (spec.md §8, invariant 2).
fn group_by_schema(buffer: Vec<Request>) -> Vec<Group> {
    let mut order = Vec::new();
    let mut groups: HashMap<usize, Group> = HashMap::new();

    for req in buffer {
        let ptr = Arc::as_ptr(req.schema()) as usize;
        let row = req.as_row();
        groups
            .entry(ptr)
            .or_insert_with(|| {
                order.push(ptr);
                Group {
                    schema: req.schema().clone(),
                    rows: Vec::new(),
                }
            })
            .rows
            .push(row);
    }

    order
        .into_iter()
        .filter_map(|ptr| groups.remove(&ptr))
        .collect()
}

/// Single logical worker draining the ingestion queue into size/time
/// triggered flushes. Grounded in the teacher's tick-driven actor loop
/// (`engine-runtime/src/actor/scheduler.rs`), simplified here to one
/// `tokio::select!` rather than a full actor/message-passing framework —
/// there is exactly one worker per pipeline, so the extra machinery buys
/// nothing.
pub async fn run(
    mut receiver: mpsc::Receiver<Request>,
    executor: Arc<dyn BatchExecutor>,
    metrics: Arc<dyn MetricsReporter>,
    flush_size: usize,
    flush_interval: Duration,
    error_sender: mpsc::Sender<batch_executor::ExecutorError>,
) {
    let mut buffer: Vec<Request> = Vec::new();
    let mut first_enqueued_at: Option<Instant> = None;
    let mut ticker = interval(flush_interval);
    ticker.tick().await; // first tick fires immediately; consume it

    loop {
        tokio::select! {
            maybe_req = receiver.recv() => {
                match maybe_req {
                    Some(req) => {
                        if buffer.is_empty() {
                            first_enqueued_at = Some(Instant::now());
                        }
                        buffer.push(req);
                        metrics.set_queue_length(receiver.len());
                        if buffer.len() >= flush_size {
                            flush(&mut buffer, &mut first_enqueued_at, &executor, &metrics, &error_sender).await;
                        }
                    }
                    None => {
                        flush(&mut buffer, &mut first_enqueued_at, &executor, &metrics, &error_sender).await;
                        break;
                    }
                }
            }
            _ = ticker.tick() => {
                if !buffer.is_empty() {
                    flush(&mut buffer, &mut first_enqueued_at, &executor, &metrics, &error_sender).await;
                }
            }
        }
    }

    info!("pipeline assembler shut down");
}

async fn flush(
    buffer: &mut Vec<Request>,
    first_enqueued_at: &mut Option<Instant>,
    executor: &Arc<dyn BatchExecutor>,
    metrics: &Arc<dyn MetricsReporter>,
    error_sender: &mpsc::Sender<batch_executor::ExecutorError>,
) {
    if buffer.is_empty() {
        return;
    }

    if let Some(enqueued_at) = first_enqueued_at.take() {
        metrics.observe_batch_assemble(enqueued_at.elapsed());
    }

    let batch = std::mem::take(buffer);
    let groups = group_by_schema(batch);

    for group in groups {
        if let Err(err) = executor.execute_batch(&group.schema, group.rows).await {
            if error_sender.try_send(err).is_err() {
                warn!("error channel full, dropping execute-batch error");
            }
        }
    }
}
