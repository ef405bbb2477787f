use kvsql::{
    BuildError, Condition, DeleteBuilder, InsertBuilder, Limit, OrderBy, Placeholder, Record,
    SelectBuilder, SqlBuilder, Statement, StatementKind, UpdateBuilder, Value, WhereBuilder,
    build_delete, build_insert, build_select, build_update, max_logged_sql, order_by,
    record_from_json, set_max_logged_sql,
};
use serde_json::json;

fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn select_with_dollar_placeholders() {
    let stmt = build_select(
        "tb",
        &["foo", "bar"],
        "",
        Some(&OrderBy::new("foo", "desc").unwrap()),
        Some(&Limit::new(10, 20)),
        &[
            Condition::eq([("foo", 1), ("bar", 2)]),
            Condition::in_list([("qq", vec![4, 5, 6])]),
        ],
    )
    .unwrap();
    assert_eq!(stmt.kind(), StatementKind::Select);

    let pg = stmt.with_placeholder(Placeholder::Dollar);
    assert_eq!(
        pg.sql(),
        "SELECT foo,bar FROM tb WHERE (bar=$1 AND foo=$2 AND qq IN ($3,$4,$5)) ORDER BY foo DESC LIMIT 10,20"
    );
    let (_, values) = pg.into_parts();
    assert_eq!(
        values,
        vec![
            Value::Int(2),
            Value::Int(1),
            Value::Int(4),
            Value::Int(5),
            Value::Int(6),
        ]
    );
}

#[test]
fn insert_from_json_rows() {
    let rows = vec![
        record_from_json(json!({"name": "alice", "age": 30, "vip": true})).unwrap(),
        record_from_json(json!({"vip": false, "age": null, "name": "bob"})).unwrap(),
    ];
    let stmt = build_insert("users", &rows).unwrap();
    assert_eq!(stmt.kind(), StatementKind::Insert);
    assert_eq!(
        stmt.sql(),
        "INSERT INTO users (age,name,vip) VALUES (?,?,?),(?,?,?)"
    );
    assert_eq!(
        stmt.values(),
        &[
            Value::Int(30),
            Value::from("alice"),
            Value::Bool(true),
            Value::Null,
            Value::from("bob"),
            Value::Bool(false),
        ]
    );
}

#[test]
fn update_and_delete_share_where_rendering() {
    let conds = [
        Condition::ne([("state", "void")]),
        Condition::lte([("retries", 3)]),
    ];
    let update =
        build_update("jobs", &record(&[("state", Value::from("queued"))]), &conds).unwrap();
    let delete = build_delete("jobs", &conds).unwrap();

    assert_eq!(
        update.sql(),
        "UPDATE jobs SET state=? WHERE (state!=? AND retries<=?)"
    );
    assert_eq!(
        delete.sql(),
        "DELETE FROM jobs WHERE (state!=? AND retries<=?)"
    );
    assert_eq!(&update.values()[1..], delete.values());
}

#[test]
fn errors_return_no_sql() {
    assert_eq!(
        order_by("x", "sideways"),
        Err(BuildError::invalid_direction("sideways"))
    );
    assert!(build_insert("t", &[]).unwrap_err().is_inconsistent());

    let mut qb = SelectBuilder::new("t");
    qb.and_where(Condition::not_in([("id", Vec::<i64>::new())]));
    assert_eq!(qb.build(), Err(BuildError::empty_list("id")));
}

#[test]
fn identical_input_is_byte_identical() {
    let build = || {
        let data = record(&[
            ("zeta", Value::Int(1)),
            ("alpha", Value::Int(2)),
            ("mid", Value::Int(3)),
        ]);
        build_update(
            "t",
            &data,
            &[Condition::eq([("k2", 1), ("k1", 2), ("k3", 3)])],
        )
        .unwrap()
    };
    let first = build();
    for _ in 0..20 {
        assert_eq!(build(), first);
    }
    assert_eq!(
        first.sql(),
        "UPDATE t SET alpha=?,mid=?,zeta=? WHERE (k1=? AND k2=? AND k3=?)"
    );
}

#[test]
fn question_mark_in_select_field_is_not_numbered() {
    let stmt = build_select(
        "docs",
        &["id", "data ? 'tag' AS tagged"],
        "",
        None,
        None,
        &[Condition::eq([("owner", 7)])],
    )
    .unwrap();
    assert_eq!(stmt.placeholder(), Placeholder::Question);

    let pg = stmt.clone().with_placeholder(Placeholder::Dollar);
    assert_eq!(
        pg.sql(),
        "SELECT id,data ? 'tag' AS tagged FROM docs WHERE (owner=$1)"
    );
    assert_eq!(pg.values().len(), 1);
    assert_eq!(pg.with_placeholder(Placeholder::Question), stmt);
}

#[test]
fn logged_sql_length_is_configurable() {
    assert_eq!(max_logged_sql(), Some(200));
    set_max_logged_sql(Some(32));
    assert_eq!(max_logged_sql(), Some(32));

    // building still returns the full text
    let stmt = build_delete("a_rather_long_table_name", &[Condition::eq([("id", 1)])]).unwrap();
    assert_eq!(stmt.sql(), "DELETE FROM a_rather_long_table_name WHERE (id=?)");

    set_max_logged_sql(None);
    assert_eq!(max_logged_sql(), None);
    set_max_logged_sql(Some(200));
}

#[test]
fn public_types_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Value>();
    assert_send_sync::<Condition>();
    assert_send_sync::<OrderBy>();
    assert_send_sync::<Limit>();
    assert_send_sync::<Statement>();
    assert_send_sync::<BuildError>();
    assert_send_sync::<WhereBuilder>();
    assert_send_sync::<InsertBuilder>();
    assert_send_sync::<UpdateBuilder>();
    assert_send_sync::<DeleteBuilder>();
    assert_send_sync::<SelectBuilder>();
}
