use crate::ast::Insert;
use batch_model::ConflictStrategy;

/// Per-backend placeholder and conflict-clause rules.
///
/// Column and table identifiers are emitted bare (no quoting) across every
/// dialect: the rendered statements are matched byte-for-byte by callers, so
/// this is a fixed wire contract rather than a stylistic choice a `Dialect`
/// impl gets to make.
pub trait Dialect {
    fn name(&self) -> &'static str;

    /// The placeholder for the `index`-th argument (0-based, batch-wide).
    fn placeholder(&self, index: usize) -> String;

    /// Renders the full statement text for one `Insert`. Each dialect's
    /// conflict clause diverges structurally from the others (MySQL changes
    /// the `INSERT` verb itself; PostgreSQL and SQLite append an `ON
    /// CONFLICT` suffix with different target/assignment syntax), so this is
    /// not expressed as a shared AST walk.
    fn render_insert(&self, insert: &Insert<'_>) -> String;

    fn values_clause(&self, insert: &Insert<'_>) -> String {
        let cols = insert.columns.len();
        let mut out = String::new();
        for row in 0..insert.row_count {
            if row > 0 {
                out.push_str(", ");
            }
            out.push('(');
            for col in 0..cols {
                if col > 0 {
                    out.push_str(", ");
                }
                out.push_str(&self.placeholder(row * cols + col));
            }
            out.push(')');
        }
        out
    }
}

pub struct MySql;
pub struct Postgres;
pub struct Sqlite;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn render_insert(&self, insert: &Insert<'_>) -> String {
        let verb = match insert.conflict {
            ConflictStrategy::Ignore => "INSERT IGNORE INTO",
            ConflictStrategy::Replace => "REPLACE INTO",
            ConflictStrategy::Update => "INSERT INTO",
        };
        let cols = insert.columns.join(", ");
        let mut stmt = format!(
            "{verb} {} ({cols}) VALUES {}",
            insert.table,
            self.values_clause(insert)
        );
        if matches!(insert.conflict, ConflictStrategy::Update) {
            let assignments = insert
                .columns
                .iter()
                .map(|c| format!("{c} = VALUES({c})"))
                .collect::<Vec<_>>()
                .join(", ");
            stmt.push_str(" ON DUPLICATE KEY UPDATE ");
            stmt.push_str(&assignments);
        }
        stmt
    }
}

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index + 1)
    }

    fn render_insert(&self, insert: &Insert<'_>) -> String {
        let cols = insert.columns.join(", ");
        let mut stmt = format!(
            "INSERT INTO {} ({cols}) VALUES {}",
            insert.table,
            self.values_clause(insert)
        );
        match insert.conflict {
            ConflictStrategy::Ignore => stmt.push_str(" ON CONFLICT DO NOTHING"),
            ConflictStrategy::Replace | ConflictStrategy::Update => {
                let target = insert.conflict_target.join(", ");
                let assignments = insert
                    .columns
                    .iter()
                    .map(|c| format!("{c} = EXCLUDED.{c}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                stmt.push_str(&format!(" ON CONFLICT ({target}) DO UPDATE SET {assignments}"));
            }
        }
        stmt
    }
}

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn render_insert(&self, insert: &Insert<'_>) -> String {
        let verb = match insert.conflict {
            ConflictStrategy::Ignore => "INSERT OR IGNORE INTO",
            ConflictStrategy::Replace => "INSERT OR REPLACE INTO",
            ConflictStrategy::Update => "INSERT INTO",
        };
        let cols = insert.columns.join(", ");
        let mut stmt = format!(
            "{verb} {} ({cols}) VALUES {}",
            insert.table,
            self.values_clause(insert)
        );
        if matches!(insert.conflict, ConflictStrategy::Update) {
            let assignments = insert
                .columns
                .iter()
                .map(|c| format!("{c} = excluded.{c}"))
                .collect::<Vec<_>>()
                .join(", ");
            stmt.push_str(" ON CONFLICT DO UPDATE SET ");
            stmt.push_str(&assignments);
        }
        stmt
    }
}
