use crate::error::SchemaError;
use std::collections::HashSet;
use std::sync::Arc;

/// Duplicate-key behavior applied by the backend when an incoming row's
/// unique key collides with an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictStrategy {
    /// Keep the existing row, discard the incoming one.
    Ignore,
    /// Overwrite the whole existing row.
    Replace,
    /// Merge column-wise into the existing row.
    Update,
}

/// Immutable description of a target table/namespace.
///
/// Two `Schema`s built from identical arguments are intentionally distinct
/// values: grouping in the pipeline is keyed on `Arc` pointer identity (see
/// `Schema::same_as`), not structural equality, so that callers can
/// deliberately shard a single logical table across multiple `Schema`
/// instances.
#[derive(Debug)]
pub struct Schema {
    identifier: String,
    columns: Vec<String>,
    conflict: ConflictStrategy,
    /// Explicit conflict-target columns for PostgreSQL/SQLite `ON CONFLICT
    /// (...)` clauses. When unset, the first column is used (spec.md §9,
    /// "Open question — PostgreSQL ON CONFLICT target"; see DESIGN.md).
    conflict_columns: Option<Vec<String>>,
}

impl Schema {
    /// Builds a new schema, validating identifier and column invariants.
    ///
    /// Returns an `Arc<Schema>` because the pointer itself is the grouping
    /// key downstream — callers should construct a `Schema` once per logical
    /// table and clone the `Arc` into every `Request` that targets it.
    pub fn new(
        identifier: impl Into<String>,
        conflict: ConflictStrategy,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Arc<Self>, SchemaError> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(SchemaError::EmptyIdentifier);
        }

        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(SchemaError::EmptyColumns(identifier));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: identifier,
                    column: column.clone(),
                });
            }
        }

        Ok(Arc::new(Schema {
            identifier,
            columns,
            conflict,
            conflict_columns: None,
        }))
    }

    /// Overrides the conflict-target columns used by dialects whose
    /// `ON CONFLICT` clause names a column set explicitly. Must be called
    /// before the `Arc<Schema>` is shared, since `Schema` is otherwise
    /// immutable post-construction; prefer composing this into `new` at the
    /// call site, e.g. via `Arc::get_mut` immediately after construction.
    pub fn with_conflict_columns(mut self, columns: Vec<String>) -> Self {
        self.conflict_columns = Some(columns);
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn conflict_strategy(&self) -> ConflictStrategy {
        self.conflict
    }

    /// The columns used as the conflict target; falls back to the first
    /// schema column when none were set explicitly.
    pub fn conflict_target(&self) -> &[String] {
        match &self.conflict_columns {
            Some(cols) if !cols.is_empty() => cols,
            _ => &self.columns[..1],
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Pointer-identity comparison: the basis for schema-keyed grouping.
    pub fn same_as(self: &Arc<Self>, other: &Arc<Self>) -> bool {
        Arc::ptr_eq(self, other)
    }
}
