//! Statement builders.
//!
//! Each builder assembles full statement text plus the values to bind. The
//! `build_*` functions are one-shot forms of the builders.
//!
//! ## Design
//!
//! - Values are always bound, never inlined; `?` is the only placeholder.
//! - Map input is emitted in canonical (sorted) field order, so identical
//!   input always yields byte-identical SQL and values.
//! - Builders validate before rendering; on error no SQL is returned.

pub mod delete;
pub mod insert;
pub mod select;
pub mod traits;
pub mod update;
pub mod where_builder;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use traits::SqlBuilder;
pub use update::UpdateBuilder;
pub use where_builder::{WhereBuilder, where_connector};

use crate::clause::{Limit, OrderBy};
use crate::condition::Condition;
use crate::error::BuildResult;
use crate::statement::Statement;
use crate::value::Record;

/// Build `INSERT INTO <table> (<fields>) VALUES (?,...),(?,...)`.
///
/// Requires at least one row, and all rows must share the first row's field
/// set. Values are row-major in canonical field order.
pub fn build_insert(table: &str, rows: &[Record]) -> BuildResult<Statement> {
    InsertBuilder::new(table).records(rows.iter().cloned()).build()
}

/// Build `UPDATE <table> SET a=?,b=?[ WHERE <expr>]`.
pub fn build_update(table: &str, data: &Record, conditions: &[Condition]) -> BuildResult<Statement> {
    UpdateBuilder::new(table)
        .set_record(data.clone())
        .and_where_all(conditions.iter().cloned())
        .build()
}

/// Build `DELETE FROM <table>[ WHERE <expr>]`.
///
/// Empty `conditions` give an unconditional delete.
pub fn build_delete(table: &str, conditions: &[Condition]) -> BuildResult<Statement> {
    DeleteBuilder::new(table)
        .and_where_all(conditions.iter().cloned())
        .build()
}

/// Build `SELECT <fields> FROM <table>[ WHERE ..][ GROUP BY ..][ ORDER BY ..][ LIMIT ..]`.
///
/// An empty `group_by` is omitted.
pub fn build_select(
    table: &str,
    fields: &[&str],
    group_by: &str,
    order_by: Option<&OrderBy>,
    limit: Option<&Limit>,
    conditions: &[Condition],
) -> BuildResult<Statement> {
    let mut qb = SelectBuilder::new(table);
    qb.fields(fields)
        .group_by(group_by)
        .and_where_all(conditions.iter().cloned());
    if let Some(order) = order_by {
        qb.order_by(order.clone());
    }
    if let Some(limit) = limit {
        qb.limit(*limit);
    }
    qb.build()
}
