//! MySQL dialect.
//!
//! MySQL has no `MERGE`, so upserts go through
//! `INSERT ... ON DUPLICATE KEY UPDATE`. The row is matched by whatever
//! primary key or unique index the table defines; the statement itself
//! never names the key columns in its conflict clause.

use super::{names, Dialect};
use crate::join::join_to;
use crate::types::LogicalType;

pub(super) const QUOTES: (&str, &str) = ("`", "`");

pub(super) const TYPES: &[(LogicalType, &str)] = &[
    (LogicalType::Int8, "TINYINT"),
    (LogicalType::Int16, "SMALLINT"),
    (LogicalType::Int32, "INT"),
    (LogicalType::Int64, "BIGINT"),
    (LogicalType::Float32, "FLOAT"),
    (LogicalType::Float64, "DOUBLE"),
    (LogicalType::Boolean, "TINYINT"),
    (LogicalType::String, "VARCHAR(256)"),
    (LogicalType::Bytes, "VARBINARY(1024)"),
];

pub(super) fn upsert<C: AsRef<str>, K: AsRef<str>>(
    dialect: &Dialect,
    table: &str,
    columns: &[C],
    key_columns: &[K],
) -> String {
    let mut sql = String::new();
    dialect.write_insert(&mut sql, table, columns, key_columns);
    sql.push_str(" ON DUPLICATE KEY UPDATE ");
    if columns.is_empty() {
        // Self-assignment of the first key leaves the existing row untouched.
        join_to(&mut sql, ",", names(key_columns).take(1), |buf: &mut String, key| {
            dialect.push_quoted(buf, key);
            buf.push('=');
            dialect.push_quoted(buf, key);
        });
    } else {
        join_to(&mut sql, ",", names(columns), |buf: &mut String, col| {
            dialect.push_quoted(buf, col);
            buf.push_str("=VALUES(");
            dialect.push_quoted(buf, col);
            buf.push(')');
        });
    }
    sql
}
