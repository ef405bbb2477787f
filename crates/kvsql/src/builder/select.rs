use super::traits::SqlBuilder;
use super::where_builder::WhereBuilder;
use crate::clause::{Limit, OrderBy};
use crate::condition::Condition;
use crate::error::{BuildError, BuildResult};
use crate::statement::{SqlBuf, Statement, StatementKind, log_built, log_rejected};

/// Structured SELECT query builder.
///
/// Clauses are always emitted in the order
/// `WHERE`, `GROUP BY`, `ORDER BY`, `LIMIT`, each only when set.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    /// Main table expression
    table: String,
    /// SELECT columns, in caller order (empty renders `*`)
    fields: Vec<String>,
    /// WHERE conditions
    where_builder: WhereBuilder,
    /// GROUP BY clause
    group_by: Option<String>,
    /// ORDER BY element
    order_by: Option<OrderBy>,
    /// LIMIT element
    limit: Option<Limit>,
    /// Build error (validated at build time)
    build_error: Option<BuildError>,
}

impl SelectBuilder {
    /// Create a new query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            fields: Vec::new(),
            where_builder: WhereBuilder::new(),
            group_by: None,
            order_by: None,
            limit: None,
            build_error: None,
        }
    }

    /// Set SELECT columns. They are rendered as given, not sorted.
    pub fn fields(&mut self, fields: &[&str]) -> &mut Self {
        self.fields = fields.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Append one SELECT column.
    pub fn add_field(&mut self, field: &str) -> &mut Self {
        self.fields.push(field.to_string());
        self
    }

    // ==================== Conditions ====================

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

    // ==================== Grouping, ordering & pagination ====================

    /// Set GROUP BY. An empty string clears it.
    pub fn group_by(&mut self, clause: &str) -> &mut Self {
        self.group_by = (!clause.is_empty()).then(|| clause.to_string());
        self
    }

    /// Set ORDER BY.
    pub fn order_by(&mut self, order: OrderBy) -> &mut Self {
        self.order_by = Some(order);
        self
    }

    /// Set ORDER BY from a raw direction token.
    ///
    /// An invalid direction is reported by `build()` as
    /// [`BuildError::InvalidOrderDirection`].
    pub fn order_by_str(&mut self, field: &str, direction: &str) -> &mut Self {
        match OrderBy::new(field, direction) {
            Ok(order) => self.order_by = Some(order),
            Err(err) => self.build_error = Some(err),
        }
        self
    }

    /// Set LIMIT.
    pub fn limit(&mut self, limit: Limit) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    /// Pagination helper, see [`Limit::page`].
    pub fn paginate(&mut self, page: u64, per_page: u64) -> &mut Self {
        self.limit = Some(Limit::page(page, per_page));
        self
    }

    // ==================== SQL build ====================

    fn push_group_by(&self, buf: &mut SqlBuf) {
        if let Some(ref group) = self.group_by {
            buf.push(" GROUP BY ").push(group);
        }
    }

    /// Build a COUNT query over the same table and conditions.
    ///
    /// ORDER BY and LIMIT are dropped. With GROUP BY the grouped query is
    /// counted as a subquery.
    pub fn build_count(&self) -> BuildResult<Statement> {
        if let Err(err) = self.validate() {
            log_rejected(StatementKind::Select, &err);
            return Err(err);
        }
        let buf = if self.group_by.is_some() {
            let mut inner = SqlBuf::new(format!("SELECT 1 FROM {}", self.table));
            self.where_builder.append_to(&mut inner);
            self.push_group_by(&mut inner);
            let mut buf = SqlBuf::new("SELECT COUNT(*) FROM (");
            buf.append(inner).push(") AS t");
            buf
        } else {
            let mut buf = SqlBuf::new(format!("SELECT COUNT(*) FROM {}", self.table));
            self.where_builder.append_to(&mut buf);
            buf
        };
        let stmt = buf.finish(StatementKind::Select);
        log_built(&stmt);
        Ok(stmt)
    }
}

impl SqlBuilder for SelectBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn render(&self) -> Statement {
        let cols = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(",")
        };
        let mut buf = SqlBuf::new(format!("SELECT {} FROM {}", cols, self.table));

        self.where_builder.append_to(&mut buf);
        self.push_group_by(&mut buf);

        if let Some(ref order) = self.order_by {
            buf.push(" ORDER BY ").push(&order.to_string());
        }

        if let Some(limit) = self.limit {
            buf.push(" ").push(&limit.to_string());
        }

        buf.finish(StatementKind::Select)
    }

    fn validate(&self) -> BuildResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        self.where_builder.validate()
    }
}
