use batch_model::ConflictStrategy;

/// The statement shape every batch write reduces to: one multi-row `INSERT`
/// plus a conflict policy. Built by [`crate::render_batch_insert`] from a
/// `Schema` and a row count; dialect-specific rendering lives on
/// [`crate::dialect::Dialect`] implementations.
pub struct Insert<'a> {
    pub table: &'a str,
    pub columns: &'a [String],
    pub conflict_target: &'a [String],
    pub row_count: usize,
    pub conflict: ConflictStrategy,
}
