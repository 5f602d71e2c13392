pub mod classify;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod mock;
pub mod processor;
pub mod retry;

pub use classify::{Classifier, DefaultClassifier};
pub use error::ExecutorError;
pub use executor::{BatchExecutor, ThrottledExecutor};
pub use metrics::{ExecuteStatus, MetricsReporter, NoopReporter};
pub use mock::{MockExecutor, TableStats};
pub use processor::{BatchProcessor, DynError};
pub use retry::{RetryDisposition, RetryError, RetryPolicy};
