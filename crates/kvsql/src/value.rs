//! Bound parameter values.
//!
//! Every value that ends up in a statement is a [`Value`]. Builders never
//! inline values into SQL text; they only emit `?` placeholders and return the
//! values alongside, in binding order.

use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single bound parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer (all integer inputs are widened to i64)
    Int(i64),
    /// Floating point
    Float(f64),
    /// Text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
}

/// One row of field/value pairs (an INSERT row or an UPDATE assignment map).
pub type Record = HashMap<String, Value>;

impl Value {
    /// Check if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = BuildError;

    /// Convert a JSON scalar. Arrays and objects have no single-parameter
    /// representation and are rejected.
    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        match v {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float(f))
                } else {
                    Err(BuildError::UnsupportedValue(format!(
                        "number {n} does not fit i64 or f64"
                    )))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => Err(
                BuildError::UnsupportedValue(format!("non-scalar JSON value: {other}")),
            ),
        }
    }
}

/// Convert a JSON object into a [`Record`].
///
/// Useful when rows arrive as JSON (e.g. from an HTTP body). Every member must
/// be a JSON scalar.
pub fn record_from_json(obj: serde_json::Value) -> Result<Record, BuildError> {
    match obj {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| Ok::<_, BuildError>((k, Value::try_from(v)?)))
            .collect(),
        other => Err(BuildError::UnsupportedValue(format!(
            "expected JSON object, got {other}"
        ))),
    }
}

#[cfg(feature = "postgres")]
mod pg {
    use super::Value;
    use bytes::BytesMut;
    use std::error::Error;
    use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

    impl ToSql for Value {
        fn to_sql(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            match self {
                Value::Null => Ok(IsNull::Yes),
                Value::Bool(v) => v.to_sql_checked(ty, out),
                Value::Int(v) => {
                    if *ty == Type::INT2 {
                        i16::try_from(*v)?.to_sql_checked(ty, out)
                    } else if *ty == Type::INT4 {
                        i32::try_from(*v)?.to_sql_checked(ty, out)
                    } else {
                        v.to_sql_checked(ty, out)
                    }
                }
                #[allow(clippy::cast_possible_truncation)]
                Value::Float(v) if *ty == Type::FLOAT4 => (*v as f32).to_sql_checked(ty, out),
                Value::Float(v) => v.to_sql_checked(ty, out),
                Value::Text(v) => v.to_sql_checked(ty, out),
                Value::Bytes(v) => v.to_sql_checked(ty, out),
            }
        }

        fn accepts(_ty: &Type) -> bool {
            true
        }

        to_sql_checked!();
    }
}
