//! SQLite dialect.
//!
//! SQLite accepts the PostgreSQL `ON CONFLICT` form since 3.24.0. Column
//! types only set an affinity, so the type map sticks to the five storage
//! classes.

use super::{postgres, Dialect};
use crate::types::LogicalType;

pub(super) const QUOTES: (&str, &str) = ("\"", "\"");

pub(super) const TYPES: &[(LogicalType, &str)] = &[
    (LogicalType::Int8, "INTEGER"),
    (LogicalType::Int16, "INTEGER"),
    (LogicalType::Int32, "INTEGER"),
    (LogicalType::Int64, "INTEGER"),
    (LogicalType::Float32, "REAL"),
    (LogicalType::Float64, "REAL"),
    (LogicalType::Boolean, "NUMERIC"),
    (LogicalType::String, "TEXT"),
    (LogicalType::Bytes, "BLOB"),
];

pub(super) fn upsert<C: AsRef<str>, K: AsRef<str>>(
    dialect: &Dialect,
    table: &str,
    columns: &[C],
    key_columns: &[K],
) -> String {
    postgres::on_conflict(dialect, table, columns, key_columns, "excluded")
}
