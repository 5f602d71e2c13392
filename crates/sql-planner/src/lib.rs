pub mod ast;
pub mod dialect;
pub mod error;

pub use dialect::{Dialect, MySql, Postgres, Sqlite};
pub use error::PlanError;

use ast::Insert;
use batch_model::{Row, Schema, Value};

/// Renders a multi-row `INSERT` plus its row-major argument vector for one
/// schema and a batch of rows.
///
/// A row missing a schema column contributes an explicit `Value::Null` for
/// that cell rather than failing — the edge case named for the `Schema`
/// itself (no columns) is the only one that errors here. An empty `rows`
/// slice renders to an empty statement and an empty argument vector; callers
/// must treat that as "nothing to execute", not an error.
pub fn render_batch_insert(
    schema: &Schema,
    rows: &[Row],
    dialect: &dyn Dialect,
) -> Result<(String, Vec<Value>), PlanError> {
    if schema.columns().is_empty() {
        return Err(PlanError::EmptyColumns(schema.identifier().to_string()));
    }

    if rows.is_empty() {
        return Ok((String::new(), Vec::new()));
    }

    let mut args = Vec::with_capacity(rows.len() * schema.columns().len());
    for row in rows {
        for column in schema.columns() {
            args.push(row.get(column).cloned().unwrap_or(Value::Null));
        }
    }

    let insert = Insert {
        table: schema.identifier(),
        columns: schema.columns(),
        conflict_target: schema.conflict_target(),
        row_count: rows.len(),
        conflict: schema.conflict_strategy(),
    };

    Ok((dialect.render_insert(&insert), args))
}
