use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ingestion/assembler tuning: queue capacity, per-batch row target, and the
/// wall-clock deadline that forces a flush even when `flush_size` hasn't
/// been reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub buffer_size: usize,
    pub flush_size: usize,
    #[serde(with = "duration_millis")]
    pub flush_interval: Duration,
}

impl PipelineConfig {
    pub fn new(
        buffer_size: usize,
        flush_size: usize,
        flush_interval: Duration,
    ) -> Result<Self, ConfigError> {
        if buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        if flush_size == 0 {
            return Err(ConfigError::ZeroFlushSize);
        }
        if flush_size > buffer_size {
            return Err(ConfigError::FlushSizeExceedsBuffer {
                flush_size,
                buffer_size,
            });
        }
        if flush_interval.is_zero() {
            return Err(ConfigError::ZeroFlushInterval);
        }

        Ok(PipelineConfig {
            buffer_size,
            flush_size,
            flush_interval,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            buffer_size: 10_000,
            flush_size: 500,
            flush_interval: Duration::from_millis(250),
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
