//! Runs generated `ON CONFLICT` statements against an in-memory DuckDB
//! database, which accepts both the PostgreSQL and SQLite spellings.

mod common;
use common::*;

use duckdb::{params, Connection};
use sink_dialect_core::{Dialect, DialectKind, LogicalType};

fn users_table(conn: &Connection, d: &Dialect) {
    let ddl = format!(
        "CREATE TABLE {} ({} {} PRIMARY KEY, {} {}, {} {})",
        d.handle_table_name("users"),
        d.quote_identifier("id"),
        d.native_type(LogicalType::Int32),
        d.quote_identifier("name"),
        d.native_type(LogicalType::String),
        d.quote_identifier("email"),
        d.native_type(LogicalType::String),
    );
    conn.execute_batch(&ddl).unwrap();
}

fn fetch_user(conn: &Connection, id: i32) -> (String, String) {
    conn.query_row(
        "SELECT name, email FROM users WHERE id = ?",
        params![id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .unwrap()
}

fn count_users(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn on_conflict_upsert_inserts_then_overwrites() {
    for kind in [DialectKind::Postgres, DialectKind::Sqlite] {
        let d = dialect(kind);
        let conn = Connection::open_in_memory().unwrap();
        users_table(&conn, &d);

        let sql = d.upsert_statement("users", &["name", "email"], &["id"]).unwrap();

        conn.execute(&sql, params!["Alice", "alice@example.com", 1])
            .unwrap();
        assert_eq!(count_users(&conn), 1);

        conn.execute(&sql, params!["Alicia", "alicia@example.com", 1])
            .unwrap();
        assert_eq!(count_users(&conn), 1, "{kind}: upsert duplicated the row");
        assert_eq!(
            fetch_user(&conn, 1),
            ("Alicia".to_string(), "alicia@example.com".to_string())
        );

        conn.execute(&sql, params!["Bob", "bob@example.com", 2])
            .unwrap();
        assert_eq!(count_users(&conn), 2);
    }
}

#[test]
fn keys_only_upsert_leaves_existing_row() {
    let d = dialect(DialectKind::Postgres);
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE tags (tag TEXT PRIMARY KEY)")
        .unwrap();

    let sql = d.upsert_statement::<&str, &str>("tags", &[], &["tag"]).unwrap();
    conn.execute(&sql, params!["rust"]).unwrap();
    conn.execute(&sql, params!["rust"]).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn update_statement_binds_keys_last() {
    let d = dialect(DialectKind::Postgres);
    let conn = Connection::open_in_memory().unwrap();
    users_table(&conn, &d);

    let insert = d.insert_statement("users", &["name", "email"], &["id"]).unwrap();
    conn.execute(&insert, params!["Carol", "carol@example.com", 7])
        .unwrap();

    let update = d.update_statement("users", &["name", "email"], &["id"]).unwrap();
    let changed = conn
        .execute(&update, params!["Caroline", "caroline@example.com", 7])
        .unwrap();
    assert_eq!(changed, 1);
    assert_eq!(
        fetch_user(&conn, 7),
        ("Caroline".to_string(), "caroline@example.com".to_string())
    );
}

#[test]
fn schema_qualified_upsert() {
    let d = dialect(DialectKind::Postgres);
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE SCHEMA sink; CREATE TABLE sink.kv (k BIGINT PRIMARY KEY, v TEXT)")
        .unwrap();

    let sql = d.upsert_statement("sink.kv", &["v"], &["k"]).unwrap();
    conn.execute(&sql, params!["one", 1_i64]).unwrap();
    conn.execute(&sql, params!["uno", 1_i64]).unwrap();

    let v: String = conn
        .query_row("SELECT v FROM sink.kv WHERE k = 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(v, "uno");
}
