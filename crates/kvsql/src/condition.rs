//! Condition types for WHERE clauses.
//!
//! A [`Condition`] wraps a map of field → value (or field → value list) and
//! builds one SQL fragment per field plus the values to bind, in canonical
//! field order.
//!
//! # Example
//! ```
//! use kvsql::{Condition, Value};
//!
//! let cond = Condition::eq([("foo", 1), ("bar", 2)]);
//! let (fragments, values) = cond.build();
//! assert_eq!(fragments, vec!["bar=?", "foo=?"]);
//! assert_eq!(values, vec![Value::Int(2), Value::Int(1)]);
//! ```

use crate::error::{BuildError, BuildResult};
use crate::fields::resolve_kv;
use crate::statement::SqlBuf;
use crate::value::Value;
use std::collections::HashMap;

type ScalarFields = HashMap<String, Value>;
type ListFields = HashMap<String, Vec<Value>>;

/// A set of field conditions sharing one operator.
///
/// Every field in a condition becomes its own fragment; fragments are later
/// AND-joined by the WHERE connector.
#[derive(Debug, Clone)]
pub enum Condition {
    /// `field=?`
    Eq(ScalarFields),
    /// `field!=?`
    Ne(ScalarFields),
    /// `field>?`
    Gt(ScalarFields),
    /// `field>=?`
    Gte(ScalarFields),
    /// `field<?`
    Lt(ScalarFields),
    /// `field<=?`
    Lte(ScalarFields),
    /// `field LIKE ?`
    Like(ScalarFields),
    /// `field IN (?,?,...)`
    In(ListFields),
    /// `field NOT IN (?,?,...)`
    NotIn(ListFields),
}

fn scalar_fields<I, K, V>(fields: I) -> ScalarFields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

fn list_fields<I, K, L, V>(fields: I) -> ListFields
where
    I: IntoIterator<Item = (K, L)>,
    K: Into<String>,
    L: IntoIterator<Item = V>,
    V: Into<Value>,
{
    fields
        .into_iter()
        .map(|(k, vs)| (k.into(), vs.into_iter().map(Into::into).collect()))
        .collect()
}

impl Condition {
    // ==================== Constructors ====================

    /// Create an equality condition: `field=?` for every field.
    pub fn eq<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Condition::Eq(scalar_fields(fields))
    }

    /// Create an inequality condition: `field!=?` for every field.
    pub fn ne<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Condition::Ne(scalar_fields(fields))
    }

    /// Create a greater-than condition: `field>?`
    pub fn gt<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Condition::Gt(scalar_fields(fields))
    }

    /// Create a greater-than-or-equal condition: `field>=?`
    pub fn gte<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Condition::Gte(scalar_fields(fields))
    }

    /// Create a less-than condition: `field<?`
    pub fn lt<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Condition::Lt(scalar_fields(fields))
    }

    /// Create a less-than-or-equal condition: `field<=?`
    pub fn lte<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Condition::Lte(scalar_fields(fields))
    }

    /// Create a LIKE condition: `field LIKE ?`
    pub fn like<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Condition::Like(scalar_fields(fields))
    }

    /// Create an IN condition: `field IN (?,?,...)`, one placeholder per value.
    ///
    /// Every field needs at least one value; statement builders reject empty
    /// lists via [`Condition::validate`].
    pub fn in_list<I, K, L, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Condition::In(list_fields(fields))
    }

    /// Create a NOT IN condition: `field NOT IN (?,?,...)`.
    pub fn not_in<I, K, L, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Condition::NotIn(list_fields(fields))
    }

    // ==================== Inspection ====================

    /// SQL operator token for this condition.
    pub fn operator(&self) -> &'static str {
        match self {
            Condition::Eq(_) => "=",
            Condition::Ne(_) => "!=",
            Condition::Gt(_) => ">",
            Condition::Gte(_) => ">=",
            Condition::Lt(_) => "<",
            Condition::Lte(_) => "<=",
            Condition::Like(_) => " LIKE ",
            Condition::In(_) => "IN",
            Condition::NotIn(_) => "NOT IN",
        }
    }

    /// Number of fields, which is also the number of fragments `build` emits.
    pub fn field_count(&self) -> usize {
        match self {
            Condition::In(fields) | Condition::NotIn(fields) => fields.len(),
            Condition::Eq(fields)
            | Condition::Ne(fields)
            | Condition::Gt(fields)
            | Condition::Gte(fields)
            | Condition::Lt(fields)
            | Condition::Lte(fields)
            | Condition::Like(fields) => fields.len(),
        }
    }

    /// Number of values `build` emits.
    pub fn value_count(&self) -> usize {
        match self {
            Condition::In(fields) | Condition::NotIn(fields) => {
                fields.values().map(Vec::len).sum()
            }
            _ => self.field_count(),
        }
    }

    /// Check if the condition has no fields (and so contributes nothing).
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    /// Validate the condition.
    ///
    /// IN / NOT IN need at least one value per field; `x IN ()` is not valid
    /// SQL. The first offending field in canonical order is reported.
    pub fn validate(&self) -> BuildResult<()> {
        if let Condition::In(fields) | Condition::NotIn(fields) = self {
            let (keys, groups) = resolve_kv(fields);
            if let Some((field, _)) = keys.iter().zip(groups).find(|(_, g)| g.is_empty()) {
                return Err(BuildError::empty_list(*field));
            }
        }
        Ok(())
    }

    // ==================== SQL build ====================

    /// Build fragments and values in canonical field order.
    ///
    /// `fragments.len() == self.field_count()`, and values line up with the
    /// placeholders of the fragments in order.
    pub fn build(&self) -> (Vec<String>, Vec<Value>) {
        let mut fragments = Vec::with_capacity(self.field_count());
        let mut values = Vec::with_capacity(self.value_count());
        for fragment in self.fragments() {
            let (sql, v) = fragment.into_parts();
            fragments.push(sql);
            values.extend(v);
        }
        (fragments, values)
    }

    /// One buffer per field, in canonical field order.
    pub(crate) fn fragments(&self) -> Vec<SqlBuf> {
        let op = self.operator();
        match self {
            Condition::In(fields) | Condition::NotIn(fields) => {
                let (keys, groups) = resolve_kv(fields);
                keys.into_iter()
                    .zip(groups)
                    .map(|(field, group)| {
                        let mut buf = SqlBuf::new(format!("{field} {op} "));
                        buf.push_bind_list(group.iter().cloned());
                        buf
                    })
                    .collect()
            }
            Condition::Eq(fields)
            | Condition::Ne(fields)
            | Condition::Gt(fields)
            | Condition::Gte(fields)
            | Condition::Lt(fields)
            | Condition::Lte(fields)
            | Condition::Like(fields) => {
                let (keys, vals) = resolve_kv(fields);
                keys.into_iter()
                    .zip(vals)
                    .map(|(field, value)| {
                        let mut buf = SqlBuf::default();
                        buf.push_expression(field, op, value.clone());
                        buf
                    })
                    .collect()
            }
        }
    }
}
