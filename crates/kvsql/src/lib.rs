//! # kvsql
//!
//! Build parameterized SQL from maps.
//!
//! ## Features
//!
//! - **Deterministic**: map input is always emitted in sorted field order, so the
//!   same logical input yields byte-identical SQL and values
//! - **Parameter-safe**: values are returned for binding, never inlined; `?` is
//!   the placeholder (`$n` on request)
//! - **Composable conditions**: `Condition` values are AND-joined into one
//!   parenthesized WHERE expression
//! - **Errors as values**: invalid input yields a [`BuildError`], never partial SQL
//!
//! ## Example
//!
//! ```
//! use kvsql::{Condition, Limit, OrderBy, build_select};
//!
//! let stmt = build_select(
//!     "tb",
//!     &["foo", "bar"],
//!     "",
//!     Some(&OrderBy::desc("foo")),
//!     Some(&Limit::new(10, 20)),
//!     &[
//!         Condition::eq([("foo", 1), ("bar", 2)]),
//!         Condition::in_list([("qq", vec![4, 5, 6])]),
//!     ],
//! )?;
//!
//! assert_eq!(
//!     stmt.sql(),
//!     "SELECT foo,bar FROM tb WHERE (bar=? AND foo=? AND qq IN (?,?,?)) ORDER BY foo DESC LIMIT 10,20"
//! );
//! assert_eq!(stmt.values().len(), 5);
//! # Ok::<(), kvsql::BuildError>(())
//! ```

pub mod builder;
pub mod clause;
pub mod condition;
pub mod error;
pub mod fields;
pub mod statement;
pub mod value;

pub use builder::{
    DeleteBuilder, InsertBuilder, SelectBuilder, SqlBuilder, UpdateBuilder, WhereBuilder,
    build_delete, build_insert, build_select, build_update, where_connector,
};
pub use clause::{Direction, Limit, OrderBy, order_by};
pub use condition::Condition;
pub use error::{BuildError, BuildResult};
pub use fields::{assemble_expression, resolve_fields, resolve_kv};
pub use statement::{Placeholder, Statement, StatementKind, max_logged_sql, set_max_logged_sql};
pub use value::{Record, Value, record_from_json};
