use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("buffer_size must be positive")]
    ZeroBufferSize,

    #[error("flush_size must be positive")]
    ZeroFlushSize,

    #[error("flush_size ({flush_size}) must not exceed buffer_size ({buffer_size})")]
    FlushSizeExceedsBuffer { flush_size: usize, buffer_size: usize },

    #[error("flush_interval must be positive")]
    ZeroFlushInterval,

    #[error("max_attempts must be at least 1")]
    ZeroMaxAttempts,

    #[error("max_backoff ({max_backoff:?}) must be at least backoff_base ({backoff_base:?})")]
    MaxBackoffBelowBase {
        backoff_base: std::time::Duration,
        max_backoff: std::time::Duration,
    },
}
