use super::traits::SqlBuilder;
use super::where_builder::WhereBuilder;
use crate::condition::Condition;
use crate::error::{BuildError, BuildResult};
use crate::fields::resolve_kv;
use crate::statement::{SqlBuf, Statement, StatementKind};
use crate::value::{Record, Value};

/// UPDATE builder.
///
/// SET assignments are rendered in canonical field order; SET values bind
/// before WHERE values.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    /// Table name
    table: String,
    /// SET assignments
    data: Record,
    /// WHERE conditions
    where_builder: WhereBuilder,
}

impl UpdateBuilder {
    /// Create a new UPDATE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            data: Record::new(),
            where_builder: WhereBuilder::new(),
        }
    }

    /// Set a field. Setting the same field twice keeps the last value.
    pub fn set<V: Into<Value>>(&mut self, field: &str, value: V) -> &mut Self {
        self.data.insert(field.to_string(), value.into());
        self
    }

    /// Set an optional field (None => skip).
    pub fn set_opt<V: Into<Value>>(&mut self, field: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.set(field, v);
        }
        self
    }

    /// Set every field of a record.
    pub fn set_record(&mut self, data: Record) -> &mut Self {
        self.data.extend(data);
        self
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
}

impl SqlBuilder for UpdateBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn render(&self) -> Statement {
        let mut buf = SqlBuf::new(format!("UPDATE {} SET ", self.table));
        let (fields, set_values) = resolve_kv(&self.data);
        for (i, (field, value)) in fields.into_iter().zip(set_values).enumerate() {
            if i > 0 {
                buf.push(",");
            }
            buf.push_expression(field, "=", value.clone());
        }
        self.where_builder.append_to(&mut buf);
        buf.finish(StatementKind::Update)
    }

    fn validate(&self) -> BuildResult<()> {
        if self.data.is_empty() {
            return Err(BuildError::inconsistent("UPDATE requires at least one SET field"));
        }
        self.where_builder.validate()
    }
}
