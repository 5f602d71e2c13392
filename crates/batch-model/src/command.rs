use crate::value::Value;
use std::collections::HashMap;

/// Discriminates the two operation shapes a driver can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Sql,
    Kv,
}

/// Free-form dispatch metadata attached to a [`BatchCommand`] (driver name,
/// table/namespace, and whatever else a `MetricsReporter` or log line wants
/// to key on).
#[derive(Debug, Clone, Default)]
pub struct CommandMetadata {
    pub driver: String,
    pub table: String,
    pub extra: HashMap<String, String>,
}

/// The dispatch descriptor handed from a driver's `generate_operations` to
/// a `BatchProcessor::execute_operations` call.
///
/// SQL backends populate `payload` with the rendered statement text and
/// `params` with the row-major argument vector; KV backends populate
/// `payload` with a human-readable command summary (for logging) and leave
/// the actual per-command argument tuples in `params`, one flattened vector
/// per command, joined end to end (the KV driver knows its own command
/// arity and can re-chunk `params`).
#[derive(Debug, Clone)]
pub struct BatchCommand {
    pub command_type: CommandType,
    pub payload: String,
    pub params: Vec<Value>,
    pub metadata: CommandMetadata,
}

impl BatchCommand {
    pub fn sql(statement: String, params: Vec<Value>, table: impl Into<String>) -> Self {
        BatchCommand {
            command_type: CommandType::Sql,
            payload: statement,
            params,
            metadata: CommandMetadata {
                table: table.into(),
                ..Default::default()
            },
        }
    }

    pub fn kv(summary: String, params: Vec<Value>, table: impl Into<String>) -> Self {
        BatchCommand {
            command_type: CommandType::Kv,
            payload: summary,
            params,
            metadata: CommandMetadata {
                table: table.into(),
                ..Default::default()
            },
        }
    }
}
