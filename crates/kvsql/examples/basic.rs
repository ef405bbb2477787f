//! Build each statement kind and print the SQL with its bound values.
//!
//! Run with: `cargo run --example basic -p kvsql`

use kvsql::{
    BuildResult, Condition, Limit, OrderBy, Placeholder, Record, Value, build_delete,
    build_insert, build_select, build_update,
};

fn row(name: &str, age: i64) -> Record {
    [("name", Value::from(name)), ("age", Value::Int(age))]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn main() -> BuildResult<()> {
    let insert = build_insert("users", &[row("alice", 30), row("bob", 41)])?;
    println!("{}\n  {:?}", insert.sql(), insert.values());

    let update = build_update(
        "users",
        &row("alice", 31),
        &[Condition::eq([("id", 1)])],
    )?;
    println!("{}\n  {:?}", update.sql(), update.values());

    let select = build_select(
        "users",
        &["id", "name"],
        "",
        Some(&OrderBy::desc("age")),
        Some(&Limit::page(1, 20)),
        &[
            Condition::gte([("age", 18)]),
            Condition::not_in([("status", vec!["banned", "deleted"])]),
        ],
    )?
    .with_placeholder(Placeholder::Dollar);
    println!("{}\n  {:?}", select.sql(), select.values());

    let delete = build_delete("sessions", &[Condition::lt([("expires_at", 1_700_000_000)])])?;
    println!("{}\n  {:?}", delete.sql(), delete.values());

    Ok(())
}
