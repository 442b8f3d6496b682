//! SQL:2003 `MERGE` upserts, shared by SQL Server and Oracle.
//!
//! The proposed row is built as a one-row derived table whose columns are
//! the placeholders, aliased to the target column names:
//!
//! ```text
//! MERGE INTO t <target> USING (SELECT ? c1,? c2,? k1 <from>) <incoming>
//! ON (target.k1=incoming.k1)
//! WHEN MATCHED THEN UPDATE SET target.c1=incoming.c1,target.c2=incoming.c2
//! WHEN NOT MATCHED THEN INSERT (c1,c2,k1) VALUES (incoming.c1,incoming.c2,incoming.k1)
//! ```

use super::{names, Dialect};
use crate::join::{join_chain_to, join_to};

const TARGET: &str = "target";
const INCOMING: &str = "incoming";

/// Per-database spelling of the parts of a `MERGE` statement.
pub(super) struct MergeSyntax {
    /// Written after the target table, e.g. ` WITH (HOLDLOCK) AS target`.
    pub target_alias: &'static str,
    /// Keyword between a source value and its column alias.
    pub column_alias: &'static str,
    /// Trailing clause of the source `SELECT`, e.g. ` FROM dual`.
    pub source_from: &'static str,
    /// Written after the source subquery, e.g. ` AS incoming`.
    pub source_alias: &'static str,
    /// Statement terminator.
    pub terminator: &'static str,
}

pub(super) fn merge<C: AsRef<str>, K: AsRef<str>>(
    dialect: &Dialect,
    syntax: &MergeSyntax,
    table: &str,
    columns: &[C],
    key_columns: &[K],
) -> String {
    let mut sql = String::from("MERGE INTO ");
    dialect.push_table_name(&mut sql, table);
    sql.push_str(syntax.target_alias);

    sql.push_str(" USING (SELECT ");
    join_chain_to(&mut sql, ",", names(columns), names(key_columns), |buf: &mut String, col| {
        buf.push('?');
        buf.push_str(syntax.column_alias);
        dialect.push_quoted(buf, col);
    });
    sql.push_str(syntax.source_from);
    sql.push(')');
    sql.push_str(syntax.source_alias);

    sql.push_str(" ON (");
    join_to(&mut sql, " AND ", names(key_columns), |buf: &mut String, key| {
        push_correlated(dialect, buf, TARGET, key);
        buf.push('=');
        push_correlated(dialect, buf, INCOMING, key);
    });
    sql.push(')');

    if !columns.is_empty() {
        sql.push_str(" WHEN MATCHED THEN UPDATE SET ");
        join_to(&mut sql, ",", names(columns), |buf: &mut String, col| {
            push_correlated(dialect, buf, TARGET, col);
            buf.push('=');
            push_correlated(dialect, buf, INCOMING, col);
        });
    }

    sql.push_str(" WHEN NOT MATCHED THEN INSERT (");
    join_chain_to(&mut sql, ",", names(columns), names(key_columns), |buf: &mut String, col| {
        dialect.push_quoted(buf, col);
    });
    sql.push_str(") VALUES (");
    join_chain_to(&mut sql, ",", names(columns), names(key_columns), |buf: &mut String, col| {
        push_correlated(dialect, buf, INCOMING, col);
    });
    sql.push(')');
    sql.push_str(syntax.terminator);
    sql
}

fn push_correlated(dialect: &Dialect, buf: &mut String, alias: &str, column: &str) {
    buf.push_str(alias);
    buf.push('.');
    dialect.push_quoted(buf, column);
}
