use super::traits::SqlBuilder;
use crate::error::{BuildError, BuildResult};
use crate::fields::{resolve_fields, resolve_kv};
use crate::statement::{SqlBuf, Statement, StatementKind};
use crate::value::{Record, Value};

/// Multi-row INSERT builder.
///
/// The first row's field set (in canonical order) is the column list; every
/// other row must carry exactly the same fields.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    /// Table name
    table: String,
    /// Rows to insert
    rows: Vec<Record>,
}

impl InsertBuilder {
    /// Create a new INSERT builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            rows: Vec::new(),
        }
    }

    /// Append a row given as field/value pairs.
    pub fn row<I, K, V>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.rows.push(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Append a prepared record.
    pub fn record(&mut self, record: Record) -> &mut Self {
        self.rows.push(record);
        self
    }

    /// Append several prepared records.
    pub fn records(&mut self, records: impl IntoIterator<Item = Record>) -> &mut Self {
        self.rows.extend(records);
        self
    }

    /// Number of rows added so far.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl SqlBuilder for InsertBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn render(&self) -> Statement {
        let columns = self.rows.first().map(resolve_fields).unwrap_or_default();
        let mut buf = SqlBuf::new(format!(
            "INSERT INTO {} ({}) VALUES ",
            self.table,
            columns.join(",")
        ));
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                buf.push(",");
            }
            let (_, row_values) = resolve_kv(row);
            buf.push_bind_list(row_values.into_iter().cloned());
        }
        buf.finish(StatementKind::Insert)
    }

    fn validate(&self) -> BuildResult<()> {
        let Some(first) = self.rows.first() else {
            return Err(BuildError::inconsistent("INSERT requires at least one row"));
        };
        let columns = resolve_fields(first);
        if columns.is_empty() {
            return Err(BuildError::inconsistent("INSERT row has no fields"));
        }
        for (i, row) in self.rows.iter().enumerate().skip(1) {
            if resolve_fields(row) != columns {
                return Err(BuildError::inconsistent(format!(
                    "INSERT row {i} fields differ from row 0 ({})",
                    columns.join(",")
                )));
            }
        }
        Ok(())
    }
}
