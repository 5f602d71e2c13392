use thiserror::Error;

/// Top-level facade error: everything a `BatchSql` constructor or a
/// `submit` call can surface synchronously. Execution failures from an
/// already-running pipeline go out `error_receiver`, not through this type.
#[derive(Debug, Error)]
pub enum BatchSqlError {
    #[error(transparent)]
    Config(#[from] batch_config::ConfigError),

    #[error(transparent)]
    Pipeline(#[from] batch_pipeline::PipelineError),
}
