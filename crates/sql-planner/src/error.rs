use thiserror::Error;

/// Failures raised while rendering a batch insert, before any network I/O
/// happens.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("schema {0:?} has no columns to insert")]
    EmptyColumns(String),
}
