//! Oracle dialect.
//!
//! Oracle has no `ON CONFLICT`; upserts are a `MERGE` fed from `dual`.
//! Table aliases take no `AS`, and a JDBC statement must not end with `;`.

use super::merge::{merge, MergeSyntax};
use super::Dialect;
use crate::types::LogicalType;

pub(super) const QUOTES: (&str, &str) = ("\"", "\"");

pub(super) const TYPES: &[(LogicalType, &str)] = &[
    (LogicalType::Int8, "NUMBER(3,0)"),
    (LogicalType::Int16, "NUMBER(5,0)"),
    (LogicalType::Int32, "NUMBER(10,0)"),
    (LogicalType::Int64, "NUMBER(19,0)"),
    (LogicalType::Float32, "BINARY_FLOAT"),
    (LogicalType::Float64, "BINARY_DOUBLE"),
    (LogicalType::Boolean, "NUMBER(1,0)"),
    (LogicalType::String, "CLOB"),
    (LogicalType::Bytes, "BLOB"),
];

const SYNTAX: MergeSyntax = MergeSyntax {
    target_alias: " target",
    column_alias: " ",
    source_from: " FROM dual",
    source_alias: " incoming",
    terminator: "",
};

pub(super) fn upsert<C: AsRef<str>, K: AsRef<str>>(
    dialect: &Dialect,
    table: &str,
    columns: &[C],
    key_columns: &[K],
) -> String {
    merge(dialect, &SYNTAX, table, columns, key_columns)
}

#[cfg(test)]
mod tests {
    use crate::dialect::{Dialect, DialectKind};
    use crate::types::LogicalType;

    #[test]
    fn test_oracle_types() {
        let d = Dialect::new(DialectKind::Oracle).unwrap();
        assert_eq!(d.native_type(LogicalType::Int64), "NUMBER(19,0)");
        assert_eq!(d.native_type(LogicalType::Float32), "BINARY_FLOAT");
        assert_eq!(d.native_type(LogicalType::String), "CLOB");
    }

    #[test]
    fn test_oracle_upsert() {
        let sql = Dialect::new(DialectKind::Oracle)
            .unwrap()
            .upsert_statement("users", &["name"], &["id"])
            .unwrap();
        assert_eq!(
            sql,
            "MERGE INTO \"users\" target \
             USING (SELECT ? \"name\",? \"id\" FROM dual) incoming \
             ON (target.\"id\"=incoming.\"id\") \
             WHEN MATCHED THEN UPDATE SET target.\"name\"=incoming.\"name\" \
             WHEN NOT MATCHED THEN INSERT (\"name\",\"id\") \
             VALUES (incoming.\"name\",incoming.\"id\")"
        );
    }
}
