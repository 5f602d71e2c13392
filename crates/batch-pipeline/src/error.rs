use thiserror::Error;

/// Ingestion-side failures, returned synchronously from `Pipeline::submit`.
/// Execution failures never surface here — they go out the error channel
/// (see `batch_executor::ExecutorError`).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("request failed validation: {0}")]
    InvalidRequest(#[from] batch_model::RequestError),

    #[error("pipeline is shut down")]
    Closed,
}
