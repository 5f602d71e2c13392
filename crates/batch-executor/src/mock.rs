use crate::error::ExecutorError;
use crate::executor::BatchExecutor;
use async_trait::async_trait;
use batch_model::{Row, Schema, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Per-table aggregate the testing collaborator accumulates: total batches,
/// total rows, and every recorded batch's argument vector.
#[derive(Debug, Clone, Default)]
pub struct TableStats {
    pub batches: usize,
    pub rows: usize,
    pub args: Vec<Vec<Value>>,
}

/// Records `ExecuteBatch` invocations instead of touching a backend.
/// Thread-safe: concurrent callers may record into the same instance.
/// `snapshot()` returns an owned copy so callers cannot mutate internal
/// state by appending to the returned map.
#[derive(Debug, Default)]
pub struct MockExecutor {
    stats: Mutex<HashMap<String, TableStats>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        MockExecutor::default()
    }

    pub fn record_rows(&self, table: &str, rows: usize, args: Vec<Value>) {
        let mut stats = self.stats.lock().expect("mock executor mutex poisoned");
        let entry = stats.entry(table.to_string()).or_default();
        entry.batches += 1;
        entry.rows += rows;
        entry.args.push(args);
    }

    pub fn snapshot(&self) -> HashMap<String, TableStats> {
        self.stats
            .lock()
            .expect("mock executor mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl BatchExecutor for MockExecutor {
    async fn execute_batch(&self, schema: &Arc<Schema>, rows: Vec<Row>) -> Result<(), ExecutorError> {
        let mut args = Vec::with_capacity(rows.len() * schema.columns().len());
        for row in &rows {
            for column in schema.columns() {
                args.push(row.get(column).cloned().unwrap_or(Value::Null));
            }
        }
        self.record_rows(schema.identifier(), rows.len(), args);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_rows_and_args_per_table() {
        let mock = MockExecutor::new();
        mock.record_rows("users", 2, vec![Value::Int(1), Value::Int(2)]);
        mock.record_rows("users", 1, vec![Value::Int(3)]);

        let snapshot = mock.snapshot();
        let users = snapshot.get("users").unwrap();
        assert_eq!(users.batches, 2);
        assert_eq!(users.rows, 3);
        assert_eq!(users.args.len(), 2);
    }

    #[test]
    fn snapshot_is_a_defensive_copy() {
        let mock = MockExecutor::new();
        mock.record_rows("users", 1, vec![Value::Int(1)]);

        let mut snapshot = mock.snapshot();
        snapshot.insert("ghost".to_string(), TableStats::default());

        assert!(!mock.snapshot().contains_key("ghost"));
    }
}
