use crate::value::Value;
use std::collections::HashMap;

/// A column name -> value mapping, the shape a [`crate::Request`] is
/// flattened into once it crosses from the producer into the pipeline
/// (spec.md §4.7: "rows is built from each Request's GetOrderedValues
/// remapped to `{columnName: value}`").
pub type Row = HashMap<String, Value>;
