//! PostgreSQL dialect.

use super::{names, Dialect};
use crate::join::{join_to, surround};
use crate::types::LogicalType;

pub(super) const QUOTES: (&str, &str) = ("\"", "\"");

pub(super) const TYPES: &[(LogicalType, &str)] = &[
    (LogicalType::Int8, "SMALLINT"), // no single-byte integer
    (LogicalType::Int16, "SMALLINT"),
    (LogicalType::Int32, "INT"),
    (LogicalType::Int64, "BIGINT"),
    (LogicalType::Float32, "FLOAT"),
    (LogicalType::Float64, "DOUBLE PRECISION"),
    (LogicalType::Boolean, "BOOLEAN"),
    (LogicalType::String, "TEXT"),
    (LogicalType::Bytes, "BYTEA"),
];

pub(super) fn upsert<C: AsRef<str>, K: AsRef<str>>(
    dialect: &Dialect,
    table: &str,
    columns: &[C],
    key_columns: &[K],
) -> String {
    on_conflict(dialect, table, columns, key_columns, "EXCLUDED")
}

/// Writes `INSERT ... ON CONFLICT (keys) DO UPDATE SET c=<excluded>.c`.
///
/// `excluded` is the correlation name of the proposed row. Without non-key
/// columns the conflict action is `DO NOTHING`.
pub(super) fn on_conflict<C: AsRef<str>, K: AsRef<str>>(
    dialect: &Dialect,
    table: &str,
    columns: &[C],
    key_columns: &[K],
    excluded: &str,
) -> String {
    let (open, close) = dialect.quotes();
    let mut sql = String::new();
    dialect.write_insert(&mut sql, table, columns, key_columns);
    sql.push_str(" ON CONFLICT (");
    join_to(&mut sql, ",", names(key_columns), surround(open, close));
    sql.push(')');

    if columns.is_empty() {
        sql.push_str(" DO NOTHING");
        return sql;
    }

    sql.push_str(" DO UPDATE SET ");
    join_to(&mut sql, ",", names(columns), |buf: &mut String, col| {
        dialect.push_quoted(buf, col);
        buf.push('=');
        buf.push_str(excluded);
        buf.push('.');
        dialect.push_quoted(buf, col);
    });
    sql
}
