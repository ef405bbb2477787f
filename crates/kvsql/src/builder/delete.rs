use super::traits::SqlBuilder;
use super::where_builder::WhereBuilder;
use crate::condition::Condition;
use crate::error::BuildResult;
use crate::statement::{SqlBuf, Statement, StatementKind};

/// DELETE builder.
///
/// Without conditions this renders an unconditional `DELETE FROM <table>`;
/// guarding against that is up to the caller.
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    /// Table name
    table: String,
    /// WHERE conditions
    where_builder: WhereBuilder,
}

impl DeleteBuilder {
    /// Create a new DELETE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_builder: WhereBuilder::new(),
        }
    }

    /// Add an AND condition.
    pub fn and_where(&mut self, cond: Condition) -> &mut Self {
        self.where_builder.push(cond);
        self
    }

    /// Add several AND conditions, keeping their order.
    pub fn and_where_all(&mut self, conds: impl IntoIterator<Item = Condition>) -> &mut Self {
        self.where_builder.extend(conds);
        self
    }

    /// Check if the statement would delete every row.
    pub fn is_unconditional(&self) -> bool {
        self.where_builder.is_empty()
    }
}

impl SqlBuilder for DeleteBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn render(&self) -> Statement {
        let mut buf = SqlBuf::new(format!("DELETE FROM {}", self.table));
        self.where_builder.append_to(&mut buf);
        buf.finish(StatementKind::Delete)
    }

    fn validate(&self) -> BuildResult<()> {
        self.where_builder.validate()
    }
}
