//! Built statements: SQL text plus the values to bind, in order.

use crate::error::BuildError;
use crate::fields::{assemble_expression, placeholder_group};
use crate::value::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

/// The kind of statement a builder produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// SELECT query
    Select,
    /// INSERT statement
    Insert,
    /// UPDATE statement
    Update,
    /// DELETE statement
    Delete,
}

impl StatementKind {
    /// SQL keyword of the statement, e.g. `"SELECT"`.
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

/// Placeholder style of the rendered SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placeholder {
    /// `?` (MySQL / SQLite style)
    #[default]
    Question,
    /// `$1, $2, ...` (Postgres style)
    Dollar,
}

impl Placeholder {
    /// Token for the `n`-th (1-based) parameter.
    fn token(self, n: usize) -> String {
        match self {
            Placeholder::Question => "?".to_string(),
            Placeholder::Dollar => format!("${n}"),
        }
    }
}

/// SQL text under construction.
///
/// Caller text goes in through [`push`](Self::push) and bound values through
/// the `push_bind*` methods, which record where each placeholder starts. A `?`
/// that arrives as caller text (a jsonb operator, say) is never a placeholder.
#[derive(Debug, Clone, Default)]
pub(crate) struct SqlBuf {
    sql: String,
    /// Byte offset of every placeholder, in binding order
    params: Vec<usize>,
    values: Vec<Value>,
}

impl SqlBuf {
    pub(crate) fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            sql: initial_sql.into(),
            ..Self::default()
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Append raw SQL (no parameters).
    pub(crate) fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append `<field><op>?` and bind its value.
    pub(crate) fn push_expression(&mut self, field: &str, op: &str, value: Value) -> &mut Self {
        let expr = assemble_expression(field, op);
        // the trailing `?` is the only placeholder
        self.params.push(self.sql.len() + expr.len() - 1);
        self.sql.push_str(&expr);
        self.values.push(value);
        self
    }

    /// Append `(?,?,...)` and bind all values.
    pub(crate) fn push_bind_list(&mut self, values: impl IntoIterator<Item = Value>) -> &mut Self {
        let start = self.values.len();
        self.values.extend(values);
        let n = self.values.len() - start;
        let at = self.sql.len();
        self.params.extend((0..n).map(|i| at + 1 + 2 * i));
        self.sql.push_str(&placeholder_group(n));
        self
    }

    /// Append another buffer, consuming it.
    pub(crate) fn append(&mut self, other: SqlBuf) -> &mut Self {
        let shift = self.sql.len();
        self.params.extend(other.params.into_iter().map(|at| at + shift));
        self.sql.push_str(&other.sql);
        self.values.extend(other.values);
        self
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.values)
    }

    pub(crate) fn finish(self, kind: StatementKind) -> Statement {
        Statement {
            kind,
            sql: self.sql,
            values: self.values,
            params: self.params,
            placeholder: Placeholder::Question,
        }
    }
}

/// A built statement.
///
/// `values` must be passed to the driver in exactly this order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    kind: StatementKind,
    sql: String,
    values: Vec<Value>,
    /// Byte offset of every placeholder token in `sql`
    params: Vec<usize>,
    placeholder: Placeholder,
}

impl Statement {
    /// Kind of statement.
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Values to bind, in placeholder order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Current placeholder style.
    pub fn placeholder(&self) -> Placeholder {
        self.placeholder
    }

    /// Split into `(sql, values)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.values)
    }

    /// Re-render placeholders in the given style.
    ///
    /// Only placeholders emitted for bound values are rewritten; a `?` that is
    /// part of a table, column, GROUP BY or ORDER BY expression is kept as is.
    pub fn with_placeholder(mut self, style: Placeholder) -> Self {
        if style == self.placeholder {
            return self;
        }
        let mut sql = String::with_capacity(self.sql.len() + self.params.len() * 2);
        let mut params = Vec::with_capacity(self.params.len());
        let mut last = 0;
        for (i, &at) in self.params.iter().enumerate() {
            let n = i + 1;
            sql.push_str(&self.sql[last..at]);
            params.push(sql.len());
            sql.push_str(&style.token(n));
            last = at + self.placeholder.token(n).len();
        }
        sql.push_str(&self.sql[last..]);

        self.sql = sql;
        self.params = params;
        self.placeholder = style;
        self
    }

    /// Get parameters as references compatible with tokio-postgres.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect()
    }
}

// ==================== Logging ====================

const DEFAULT_MAX_LOGGED_SQL: usize = 200;
const NO_LIMIT: usize = usize::MAX;

static MAX_LOGGED_SQL: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_LOGGED_SQL);

/// Set the maximum SQL length (in bytes) included in log events.
///
/// `None` logs the full text. Defaults to `Some(200)`.
pub fn set_max_logged_sql(len: Option<usize>) {
    MAX_LOGGED_SQL.store(len.unwrap_or(NO_LIMIT), Ordering::Relaxed);
}

/// Maximum SQL length (in bytes) included in log events.
pub fn max_logged_sql() -> Option<usize> {
    match MAX_LOGGED_SQL.load(Ordering::Relaxed) {
        NO_LIMIT => None,
        len => Some(len),
    }
}

#[cfg(feature = "tracing")]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg(feature = "tracing")]
fn logged_sql(sql: &str, max_len: Option<usize>) -> &str {
    max_len.map_or(sql, |max| truncate_sql_bytes(sql, max))
}

#[cfg(feature = "tracing")]
pub(crate) fn log_built(stmt: &Statement) {
    let sql = logged_sql(&stmt.sql, max_logged_sql());
    tracing::debug!(
        target: "kvsql.sql",
        kind = stmt.kind.as_str(),
        param_count = stmt.values.len(),
        truncated = sql.len() < stmt.sql.len(),
        sql = %sql,
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn log_built(_stmt: &Statement) {}

#[cfg(feature = "tracing")]
pub(crate) fn log_rejected(kind: StatementKind, err: &BuildError) {
    tracing::debug!(target: "kvsql.sql", kind = kind.as_str(), error = %err, "build rejected");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn log_rejected(_kind: StatementKind, _err: &BuildError) {}
