//! Microsoft SQL Server dialect.
//!
//! Upserts use `MERGE` with `HOLDLOCK`, which keeps two concurrent merges
//! of the same key from both taking the `NOT MATCHED` branch.

use super::merge::{merge, MergeSyntax};
use super::Dialect;
use crate::types::LogicalType;

pub(super) const QUOTES: (&str, &str) = ("[", "]");

pub(super) const TYPES: &[(LogicalType, &str)] = &[
    (LogicalType::Int8, "TINYINT"),
    (LogicalType::Int16, "SMALLINT"),
    (LogicalType::Int32, "INT"),
    (LogicalType::Int64, "BIGINT"),
    (LogicalType::Float32, "REAL"),
    (LogicalType::Float64, "FLOAT"),
    (LogicalType::Boolean, "BIT"),
    (LogicalType::String, "VARCHAR(MAX)"),
    (LogicalType::Bytes, "VARBINARY(MAX)"),
];

const SYNTAX: MergeSyntax = MergeSyntax {
    target_alias: " WITH (HOLDLOCK) AS target",
    column_alias: " AS ",
    source_from: "",
    source_alias: " AS incoming",
    terminator: ";",
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

    fn sqlserver() -> Dialect {
        Dialect::new(DialectKind::SqlServer).unwrap()
    }

    #[test]
    fn test_sqlserver_types() {
        let d = sqlserver();
        assert_eq!(d.native_type(LogicalType::Boolean), "BIT");
        assert_eq!(d.native_type(LogicalType::Float64), "FLOAT");
        assert_eq!(d.native_type(LogicalType::String), "VARCHAR(MAX)");
    }

    #[test]
    fn test_sqlserver_upsert() {
        let sql = sqlserver()
            .upsert_statement("dbo.users", &["name", "email"], &["id"])
            .unwrap();
        assert_eq!(
            sql,
            "MERGE INTO [dbo].[users] WITH (HOLDLOCK) AS target \
             USING (SELECT ? AS [name],? AS [email],? AS [id]) AS incoming \
             ON (target.[id]=incoming.[id]) \
             WHEN MATCHED THEN UPDATE SET target.[name]=incoming.[name],target.[email]=incoming.[email] \
             WHEN NOT MATCHED THEN INSERT ([name],[email],[id]) \
             VALUES (incoming.[name],incoming.[email],incoming.[id]);"
        );
    }

    #[test]
    fn test_sqlserver_upsert_keys_only_skips_matched_branch() {
        let sql = sqlserver()
            .upsert_statement::<&str, &str>("tags", &[], &["tag", "post_id"])
            .unwrap();
        assert!(sql.contains("ON (target.[tag]=incoming.[tag] AND target.[post_id]=incoming.[post_id])"));
        assert!(!sql.contains("WHEN MATCHED"));
        assert!(sql.ends_with("VALUES (incoming.[tag],incoming.[post_id]);"));
    }
}
