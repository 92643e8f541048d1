use cqlorm::qb::{self, Statement, TermTuple, raw};
use cqlorm::schema::{Index, Table, types};
use cqlorm::{CqlError, CqlValue};

fn users() -> Table {
    Table::new("users")
        .add_column(types::uuid("id").partition_key())
        .add_column(types::timestamp("created_at").compound_key())
        .add_column(types::text("name"))
        .add_column(types::set("tags", types::text(None)))
        .add_column(types::map("scores", types::text(None), types::int(None)))
        .add_index(Index::on("name"))
}

fn placeholders(cql: &str) -> usize {
    cql.matches('?').count()
}

#[test]
fn select_with_states_and_order() {
    let table = users();
    let name = table.column("name").unwrap().clone();
    let created = table.column("created_at").unwrap().clone();

    let rendered = table
        .select()
        .column(&name)
        .column(name.write_time().as_alias("written"))
        .and_eq("id", 1)
        .and_where("created_at", ">", raw("minTimeuuid('2013-01-01')"))
        .order(created.desc())
        .limit(20)
        .render()
        .unwrap();

    assert_eq!(
        rendered.cql,
        "SELECT name, WRITETIME(name) as written FROM users WHERE id = ? \
         AND created_at > minTimeuuid('2013-01-01') ORDER BY created_at DESC LIMIT 20;"
    );
    assert_eq!(rendered.params, vec![CqlValue::Int(1)]);
}

#[test]
fn select_in_and_allow_filtering() {
    let rendered = qb::select("events")
        .columns(["a", "b"])
        .and_in("a", [1, 2, 3])
        .allow_filtering()
        .render()
        .unwrap();
    assert_eq!(
        rendered.cql,
        "SELECT a, b FROM events WHERE a IN (?, ?, ?) ALLOW FILTERING;"
    );
    assert_eq!(placeholders(&rendered.cql), rendered.params.len());
}

#[test]
fn insert_lightweight_transaction() {
    let rendered = qb::insert("users")
        .data([("id", CqlValue::Int(1)), ("name", CqlValue::from("alice"))])
        .if_not_exists()
        .ttl(86400)
        .render()
        .unwrap();
    assert_eq!(
        rendered.cql,
        "INSERT INTO users (id, name) VALUES (?, ?) IF NOT EXISTS USING TTL 86400;"
    );
    assert_eq!(
        rendered.params,
        vec![CqlValue::Int(1), CqlValue::from("alice")]
    );
}

#[test]
fn insert_null_is_inlined() {
    let rendered = qb::insert("users")
        .value("id", 1)
        .value("name", None::<&str>)
        .render()
        .unwrap();
    assert_eq!(rendered.cql, "INSERT INTO users (id, name) VALUES (?, NULL);");
    assert_eq!(rendered.params, vec![CqlValue::Int(1)]);
}

#[test]
fn insert_count_mismatch() {
    let err = qb::insert("users")
        .columns(["id", "name"])
        .values([1])
        .render()
        .unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn update_collection_operations() {
    let rendered = qb::update("users")
        .timestamp(1_000)
        .add("tags", CqlValue::set(["new"]))
        .subtract("scores", CqlValue::set(["old"]))
        .prepend("history", CqlValue::list([1]))
        .and_eq("id", 9)
        .render()
        .unwrap();
    assert_eq!(
        rendered.cql,
        "UPDATE users USING TIMESTAMP 1000 SET tags = tags + ?, \
         scores = scores - ?, history = ? + history WHERE id = ?;"
    );
    assert_eq!(placeholders(&rendered.cql), rendered.params.len());
    assert_eq!(rendered.params[3], CqlValue::Int(9));
}

#[test]
fn update_without_assignments_is_rejected() {
    let err = qb::update("users").and_eq("id", 1).render().unwrap_err();
    assert_eq!(err, CqlError::missing("assignments"));
}

#[test]
fn delete_columns_with_tuple_comparison() {
    let rendered = qb::delete("users")
        .columns(["name", "tags"])
        .and_where(["id", "created_at"], "=", TermTuple::new().with(1).with(2))
        .when_exists("name")
        .render()
        .unwrap();
    assert_eq!(
        rendered.cql,
        "DELETE name, tags FROM users WHERE (id, created_at) = (?, ?) IF EXISTS name;"
    );
    assert_eq!(rendered.params, vec![CqlValue::Int(1), CqlValue::Int(2)]);
}

#[test]
fn statements_without_table_are_rejected() {
    assert_eq!(
        qb::Select::new().render().unwrap_err(),
        CqlError::missing("table")
    );
    assert_eq!(
        qb::Delete::new().render().unwrap_err(),
        CqlError::missing("table")
    );
    assert_eq!(
        qb::Truncate::new().render().unwrap_err(),
        CqlError::missing("table")
    );
}

#[test]
fn create_table_and_indexes() {
    let table = users();
    assert_eq!(
        table.to_cql(),
        "CREATE TABLE users (\r\n  id uuid,\r\n  created_at timestamp,\r\n  name text,\r\n  \
         tags set<text>,\r\n  scores map<text, int>,\r\n  PRIMARY KEY (id, created_at)\r\n)"
    );
    assert_eq!(
        table.index_statements(),
        vec!["CREATE INDEX ON users (name);".to_string()]
    );
}

#[test]
fn anonymous_column_is_rejected_before_render() {
    let anonymous = types::int(None);
    let err = qb::select("users")
        .column(&anonymous)
        .and_eq("id", 1)
        .render()
        .unwrap_err();
    assert!(err.is_malformed());
    assert!(
        qb::select("users")
            .order(anonymous.desc())
            .render()
            .unwrap_err()
            .is_malformed()
    );
}
