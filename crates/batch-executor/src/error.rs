use thiserror::Error;

/// Error taxonomy for one `ExecuteBatch` invocation (spec.md §7 kinds,
/// realized as enum variants rather than a string tag).
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("generating operations for table {table:?} failed: {source}")]
    GenerateFailure {
        table: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("executing batch for table {table:?} failed after {attempts} attempt(s), kind {kind:?}: {source}")]
    ExecuteFailure {
        table: String,
        kind: String,
        attempts: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ExecutorError {
    pub fn table(&self) -> &str {
        match self {
            ExecutorError::GenerateFailure { table, .. } => table,
            ExecutorError::ExecuteFailure { table, .. } => table,
        }
    }
}
