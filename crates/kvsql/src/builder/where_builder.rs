//! Shared WHERE clause builder for SELECT, UPDATE, DELETE.

use crate::condition::Condition;
use crate::error::BuildResult;
use crate::statement::SqlBuf;
use crate::value::Value;

/// Join conditions into one parenthesized AND-expression.
///
/// Conditions are built in the order given (never re-sorted); within one
/// condition, fragments follow canonical field order. Values are concatenated
/// in the same order as the fragments. When nothing renders, the result is an
/// empty string and no values, and the caller must omit `WHERE`.
///
/// ```
/// use kvsql::{Condition, where_connector};
///
/// let (sql, values) = where_connector(&[
///     Condition::eq([("b", 2), ("a", 1)]),
///     Condition::in_list([("qq", vec![7, 8])]),
/// ]);
/// assert_eq!(sql, "(a=? AND b=? AND qq IN (?,?))");
/// assert_eq!(values.len(), 4);
/// ```
pub fn where_connector(conditions: &[Condition]) -> (String, Vec<Value>) {
    connect(conditions).into_parts()
}

fn connect(conditions: &[Condition]) -> SqlBuf {
    let mut buf = SqlBuf::default();
    for fragment in conditions.iter().flat_map(Condition::fragments) {
        buf.push(if buf.is_empty() { "(" } else { " AND " });
        buf.append(fragment);
    }
    if !buf.is_empty() {
        buf.push(")");
    }
    buf
}

/// Reusable WHERE clause builder.
///
/// Holds conditions in insertion order, providing a consistent API across
/// SelectBuilder, UpdateBuilder and DeleteBuilder.
#[derive(Debug, Clone, Default)]
pub struct WhereBuilder {
    conditions: Vec<Condition>,
}

impl WhereBuilder {
    /// Create an empty WhereBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a condition.
    pub fn push(&mut self, cond: Condition) {
        self.conditions.push(cond);
    }

    /// Append several conditions, keeping their order.
    pub fn extend(&mut self, conds: impl IntoIterator<Item = Condition>) {
        self.conditions.extend(conds);
    }

    /// Check if no condition contributes a fragment.
    pub fn is_empty(&self) -> bool {
        self.conditions.iter().all(Condition::is_empty)
    }

    /// Conditions in insertion order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Validate every condition, reporting the first failure.
    pub fn validate(&self) -> BuildResult<()> {
        self.conditions.iter().try_for_each(Condition::validate)
    }

    /// Build the WHERE expression (without "WHERE" prefix) and its values.
    pub fn build_clause(&self) -> (String, Vec<Value>) {
        where_connector(&self.conditions)
    }

    /// Append ` WHERE <expr>` to `buf` if there is anything to filter on.
    pub(crate) fn append_to(&self, buf: &mut SqlBuf) {
        let clause = connect(&self.conditions);
        if !clause.is_empty() {
            buf.push(" WHERE ");
            buf.append(clause);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{Placeholder, StatementKind};

    #[test]
    fn joins_across_conditions_in_caller_order() {
        let (sql, values) = where_connector(&[
            Condition::eq([("a", "a"), ("b", "b")]),
            Condition::ne([("foo", Value::from(1)), ("sex", Value::from("male"))]),
            Condition::in_list([("qq", vec![7, 8, 9])]),
        ]);
        assert_eq!(sql, "(a=? AND b=? AND foo!=? AND sex!=? AND qq IN (?,?,?))");
        assert_eq!(
            values,
            vec![
                Value::from("a"),
                Value::from("b"),
                Value::Int(1),
                Value::from("male"),
                Value::Int(7),
                Value::Int(8),
                Value::Int(9),
            ]
        );
    }

    #[test]
    fn conditions_are_not_reordered() {
        let (sql, _) = where_connector(&[
            Condition::eq([("z", 1)]),
            Condition::eq([("a", 2)]),
        ]);
        assert_eq!(sql, "(z=? AND a=?)");
    }

    #[test]
    fn empty_input() {
        let (sql, values) = where_connector(&[]);
        assert_eq!(sql, "");
        assert!(values.is_empty());

        let (sql, values) = where_connector(&[Condition::eq(Vec::<(String, Value)>::new())]);
        assert_eq!(sql, "");
        assert!(values.is_empty());
    }

    #[test]
    fn shape_properties() {
        let conds = [
            Condition::eq([("a", 1), ("b", 2), ("c", 3)]),
            Condition::not_in([("d", vec![1, 2])]),
            Condition::gte([("e", 5)]),
        ];
        let (sql, values) = where_connector(&conds);
        let fragments: usize = conds.iter().map(Condition::field_count).sum();
        let total_values: usize = conds.iter().map(Condition::value_count).sum();

        assert!(sql.starts_with('(') && sql.ends_with(')'));
        assert_eq!(sql.matches(" AND ").count(), fragments - 1);
        assert_eq!(values.len(), total_values);
    }

    #[test]
    fn where_builder_append() {
        let mut wb = WhereBuilder::new();
        let mut buf = SqlBuf::new("DELETE FROM tb");
        wb.append_to(&mut buf);
        assert!(wb.is_empty());
        assert_eq!(buf.clone().into_parts().0, "DELETE FROM tb");

        wb.push(Condition::eq([("id", 9)]));
        wb.append_to(&mut buf);
        let (sql, values) = buf.into_parts();
        assert_eq!(sql, "DELETE FROM tb WHERE (id=?)");
        assert_eq!(values, vec![Value::Int(9)]);
    }

    #[test]
    fn question_mark_in_field_is_not_a_placeholder() {
        let mut wb = WhereBuilder::new();
        wb.extend([
            Condition::eq([("data ? 'tag'", true)]),
            Condition::in_list([("id", vec![1, 2])]),
        ]);
        let mut buf = SqlBuf::new("DELETE FROM docs");
        wb.append_to(&mut buf);

        let stmt = buf
            .finish(StatementKind::Delete)
            .with_placeholder(Placeholder::Dollar);
        assert_eq!(
            stmt.sql(),
            "DELETE FROM docs WHERE (data ? 'tag'=$1 AND id IN ($2,$3))"
        );
        assert_eq!(stmt.values().len(), 3);
    }

    #[test]
    fn where_builder_validates_each_condition() {
        let mut wb = WhereBuilder::new();
        wb.extend([
            Condition::eq([("a", 1)]),
            Condition::in_list([("b", Vec::<i32>::new())]),
        ]);
        assert!(wb.validate().unwrap_err().is_empty_list());
    }
}
