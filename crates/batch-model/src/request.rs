use crate::error::RequestError;
use crate::schema::Schema;
use crate::value::Value;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// One row bound to a [`Schema`].
///
/// Mutable only until submitted to a pipeline: once handed to
/// `Pipeline::submit`, the request is owned by the pipeline and must not be
/// mutated further by the producer (spec.md §3, Request ownership).
#[derive(Debug, Clone)]
pub struct Request {
    schema: Arc<Schema>,
    values: HashMap<String, Value>,
}

impl Request {
    pub fn new(schema: Arc<Schema>) -> Self {
        Request {
            schema,
            values: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Generic setter; typed setters below are thin convenience wrappers.
    pub fn set(&mut self, column: impl Into<String>, value: Value) -> &mut Self {
        self.values.insert(column.into(), value);
        self
    }

    pub fn set_small_int(&mut self, column: impl Into<String>, value: i16) -> &mut Self {
        self.set(column, Value::SmallInt(value))
    }

    pub fn set_int(&mut self, column: impl Into<String>, value: i32) -> &mut Self {
        self.set(column, Value::Int(value))
    }

    pub fn set_big_int(&mut self, column: impl Into<String>, value: i64) -> &mut Self {
        self.set(column, Value::BigInt(value))
    }

    pub fn set_uint(&mut self, column: impl Into<String>, value: u64) -> &mut Self {
        self.set(column, Value::UInt(value))
    }

    pub fn set_float(&mut self, column: impl Into<String>, value: f64) -> &mut Self {
        self.set(column, Value::Float(value))
    }

    pub fn set_bool(&mut self, column: impl Into<String>, value: bool) -> &mut Self {
        self.set(column, Value::Bool(value))
    }

    pub fn set_text(&mut self, column: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.set(column, Value::Text(value.into()))
    }

    pub fn set_bytes(&mut self, column: impl Into<String>, value: Vec<u8>) -> &mut Self {
        self.set(column, Value::Bytes(value))
    }

    pub fn set_timestamp(&mut self, column: impl Into<String>, value: DateTime<Utc>) -> &mut Self {
        self.set(column, Value::Timestamp(value))
    }

    pub fn set_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.set(column, Value::Null)
    }

    /// Validates that every schema column has an explicitly set value
    /// (including explicit null via `set_null`). This is the strict policy
    /// chosen for the Open Question in spec.md §9: a column that was never
    /// touched is an invalid request, not a silent null.
    pub fn validate(&self) -> Result<(), RequestError> {
        for column in self.schema.columns() {
            if !self.values.contains_key(column) {
                return Err(RequestError::MissingColumn {
                    table: self.schema.identifier().to_string(),
                    column: column.clone(),
                });
            }
        }
        Ok(())
    }

    /// Returns a fresh slice of values indexed by `schema.columns()` order.
    /// Columns that were never set become `Value::Null` here regardless of
    /// `validate()` — callers on the strict path always call `validate`
    /// first, so this substitution is unreachable for well-behaved callers,
    /// but the method itself stays total per spec.md §4.1.
    pub fn ordered_values(&self) -> Vec<Value> {
        self.schema
            .columns()
            .iter()
            .map(|c| self.values.get(c).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Rebuilds a column name -> value map from the request, the inverse of
    /// `ordered_values` zipped against `schema.columns()`. Used by the
    /// pipeline assembler to hand the executor `{column: value}` rows.
    pub fn as_row(&self) -> HashMap<String, Value> {
        self.schema
            .columns()
            .iter()
            .cloned()
            .zip(self.ordered_values())
            .collect()
    }
}
