//! SQL dialect support.
//!
//! Databases disagree on identifier quoting, native type names and, most
//! of all, on how to express "insert or update". A [`Dialect`] hides those
//! differences behind one contract. The set of supported databases is
//! closed ([`DialectKind`]); each variant carries its type table and quote
//! pair as static data, and the upsert shape is chosen by matching on the
//! variant.
//!
//! | Dialect | Quotes | Upsert |
//! |---------|--------|--------|
//! | MySQL | `` `x` `` | `ON DUPLICATE KEY UPDATE c=VALUES(c)` |
//! | PostgreSQL | `"x"` | `ON CONFLICT (k) DO UPDATE SET c=EXCLUDED.c` |
//! | SQLite | `"x"` | `ON CONFLICT (k) DO UPDATE SET c=excluded.c` |
//! | SQL Server | `[x]` | `MERGE ... WITH (HOLDLOCK)` |
//! | Oracle | `"x"` | `MERGE ... USING (SELECT ... FROM dual)` |
//!
//! Statements only ever contain names and `?` placeholders. Placeholders
//! bind non-key column values first, in declared order, then key column
//! values.
//!
//! ```rust
//! use sink_dialect_core::{Dialect, DialectKind};
//!
//! let pg = Dialect::new(DialectKind::Postgres).unwrap();
//! let sql = pg.upsert_statement("users", &["name", "email"], &["id"]).unwrap();
//! assert_eq!(
//!     sql,
//!     r#"INSERT INTO "users" ("name","email","id") VALUES (?,?,?) ON CONFLICT ("id") DO UPDATE SET "name"=EXCLUDED."name","email"=EXCLUDED."email""#
//! );
//! ```

mod merge;
mod mysql;
mod oracle;
mod postgres;
mod registry;
mod sqlite;
mod sqlserver;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use registry::DialectRegistry;

use crate::error::{DialectError, Result};
use crate::join::{join_chain_to, join_to, placeholders_to, surround};
use crate::statement::{StatementKind, UpsertRequest};
use crate::type_map::TypeMap;
use crate::types::LogicalType;

/// The closed set of supported databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// MySQL and MariaDB.
    MySql,
    /// PostgreSQL.
    Postgres,
    /// SQLite 3.24+.
    Sqlite,
    /// Microsoft SQL Server 2008+.
    SqlServer,
    /// Oracle Database.
    Oracle,
}

impl DialectKind {
    /// Every supported dialect.
    pub const ALL: [Self; 5] = [
        Self::MySql,
        Self::Postgres,
        Self::Sqlite,
        Self::SqlServer,
        Self::Oracle,
    ];

    /// Short lowercase name, used in logs and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgresql",
            Self::Sqlite => "sqlite",
            Self::SqlServer => "sqlserver",
            Self::Oracle => "oracle",
        }
    }

    /// Product name as reported by the database driver's metadata.
    #[must_use]
    pub const fn product_name(self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::Postgres => "PostgreSQL",
            Self::Sqlite => "SQLite",
            Self::SqlServer => "Microsoft SQL Server",
            Self::Oracle => "Oracle",
        }
    }

    /// JDBC sub-protocol (`jdbc:<sub-protocol>:...`).
    #[must_use]
    pub const fn jdbc_subprotocol(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgresql",
            Self::Sqlite => "sqlite",
            Self::SqlServer => "sqlserver",
            Self::Oracle => "oracle",
        }
    }

    /// Whether quoted column names compare case-insensitively.
    #[must_use]
    pub const fn folds_identifier_case(self) -> bool {
        matches!(self, Self::MySql | Self::Sqlite | Self::SqlServer)
    }

    /// Opening and closing identifier quotes.
    #[must_use]
    pub const fn quotes(self) -> (&'static str, &'static str) {
        match self {
            Self::MySql => mysql::QUOTES,
            Self::Postgres => postgres::QUOTES,
            Self::Sqlite => sqlite::QUOTES,
            Self::SqlServer => sqlserver::QUOTES,
            Self::Oracle => oracle::QUOTES,
        }
    }

    /// Static type table the dialect's [`TypeMap`] is built from.
    #[must_use]
    pub const fn type_entries(self) -> &'static [(LogicalType, &'static str)] {
        match self {
            Self::MySql => mysql::TYPES,
            Self::Postgres => postgres::TYPES,
            Self::Sqlite => sqlite::TYPES,
            Self::SqlServer => sqlserver::TYPES,
            Self::Oracle => oracle::TYPES,
        }
    }

    /// Resolves a product name, short name or common alias, ignoring case.
    #[must_use]
    pub fn from_product_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.product_name().eq_ignore_ascii_case(name)
                    || kind.name().eq_ignore_ascii_case(name)
            })
            .or_else(|| match name.to_ascii_lowercase().as_str() {
                "mariadb" => Some(Self::MySql),
                "postgres" | "pg" => Some(Self::Postgres),
                "sqlite3" => Some(Self::Sqlite),
                "mssql" | "sql server" | "sql_server" => Some(Self::SqlServer),
                "oracle database" => Some(Self::Oracle),
                _ => None,
            })
    }

    /// Resolves a JDBC connection URL such as `jdbc:postgresql://host/db`.
    #[must_use]
    pub fn from_jdbc_url(url: &str) -> Option<Self> {
        let url = url.trim();
        let rest = url
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("jdbc:"))
            .map(|_| &url[5..])?;
        let subprotocol = rest.split(':').next()?.to_ascii_lowercase();
        match subprotocol.as_str() {
            "mariadb" => Some(Self::MySql),
            "jtds" => Some(Self::SqlServer),
            other => Self::ALL
                .into_iter()
                .find(|kind| kind.jdbc_subprotocol() == other),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DialectKind {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_product_name(s)
            .or_else(|| Self::from_jdbc_url(s))
            .ok_or_else(|| DialectError::UnknownDialect(s.to_string()))
    }
}

/// A database dialect: type map, identifier quotes and statement shapes.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    kind: DialectKind,
    types: TypeMap,
    quote_open: &'static str,
    quote_close: &'static str,
}

impl Dialect {
    /// Builds the dialect for `kind`, validating its type table.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the dialect's type table does not
    /// map every [`LogicalType`] exactly once.
    pub fn new(kind: DialectKind) -> Result<Self> {
        let types = TypeMap::from_entries(kind.name(), kind.type_entries())?;
        let (quote_open, quote_close) = kind.quotes();
        Ok(Self {
            kind,
            types,
            quote_open,
            quote_close,
        })
    }

    /// Returns the dialect name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Returns the dialect variant.
    #[must_use]
    pub const fn kind(&self) -> DialectKind {
        self.kind
    }

    /// Returns the opening and closing identifier quotes.
    #[must_use]
    pub const fn quotes(&self) -> (&'static str, &'static str) {
        (self.quote_open, self.quote_close)
    }

    /// Returns the dialect's type map.
    #[must_use]
    pub const fn type_map(&self) -> &TypeMap {
        &self.types
    }

    /// Returns the native type name for a logical type.
    #[must_use]
    pub const fn native_type(&self, logical_type: LogicalType) -> &'static str {
        self.types.get(logical_type)
    }

    /// Wraps `name` in the dialect's quotes.
    ///
    /// The name is neither escaped nor validated; well-formed identifiers
    /// are the caller's responsibility.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        self.push_quoted(&mut out, name);
        out
    }

    /// Quotes a possibly schema-qualified table reference.
    ///
    /// Each dot-separated part is quoted on its own. Parts already wrapped
    /// in this dialect's quotes are kept as they are, and dots inside such
    /// parts do not split. Empty parts from leading, trailing or doubled
    /// dots are dropped, except that SQL Server keeps an empty interior
    /// part for its default-schema form (`db..table`). A quoted part that
    /// is empty (`""`) is passed through like any other quoted part.
    #[must_use]
    pub fn handle_table_name(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 4);
        self.push_table_name(&mut out, name);
        out
    }

    /// Generates an insert-or-update statement for `table`.
    ///
    /// Placeholders bind `columns` values first, then `key_columns` values.
    /// With no non-key columns the statement inserts new rows and leaves
    /// existing ones untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidTable`] for a blank table name,
    /// [`DialectError::MissingKeyColumns`] when `key_columns` is empty and
    /// [`DialectError::DuplicateColumn`] when a name is listed twice
    /// (ignoring case where the database does).
    pub fn upsert_statement<C: AsRef<str>, K: AsRef<str>>(
        &self,
        table: &str,
        columns: &[C],
        key_columns: &[K],
    ) -> Result<String> {
        validate_table(table)?;
        require_key_columns(table, key_columns)?;
        self.reject_duplicates(table, columns, key_columns)?;

        let sql = match self.kind {
            DialectKind::MySql => mysql::upsert(self, table, columns, key_columns),
            DialectKind::Postgres => postgres::upsert(self, table, columns, key_columns),
            DialectKind::Sqlite => sqlite::upsert(self, table, columns, key_columns),
            DialectKind::SqlServer => sqlserver::upsert(self, table, columns, key_columns),
            DialectKind::Oracle => oracle::upsert(self, table, columns, key_columns),
        };
        debug!(
            dialect = self.name(),
            table,
            columns = columns.len(),
            key_columns = key_columns.len(),
            sql = %sql,
            "Generated upsert statement"
        );
        Ok(sql)
    }

    /// Generates a plain `INSERT` with the same column and placeholder
    /// order as [`Dialect::upsert_statement`]. `key_columns` may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidTable`] for a blank table name,
    /// [`DialectError::NoColumns`] when both column lists are empty and
    /// [`DialectError::DuplicateColumn`] when a name is listed twice.
    pub fn insert_statement<C: AsRef<str>, K: AsRef<str>>(
        &self,
        table: &str,
        columns: &[C],
        key_columns: &[K],
    ) -> Result<String> {
        validate_table(table)?;
        if columns.is_empty() && key_columns.is_empty() {
            return Err(DialectError::NoColumns {
                table: table.to_string(),
            });
        }
        self.reject_duplicates(table, columns, key_columns)?;

        let mut sql = String::new();
        self.write_insert(&mut sql, table, columns, key_columns);
        debug!(dialect = self.name(), table, sql = %sql, "Generated insert statement");
        Ok(sql)
    }

    /// Generates `UPDATE t SET c=?,... WHERE k=? AND ...`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidTable`] for a blank table name,
    /// [`DialectError::MissingKeyColumns`] without key columns,
    /// [`DialectError::MissingUpdateColumns`] without non-key columns and
    /// [`DialectError::DuplicateColumn`] when a name is listed twice.
    pub fn update_statement<C: AsRef<str>, K: AsRef<str>>(
        &self,
        table: &str,
        columns: &[C],
        key_columns: &[K],
    ) -> Result<String> {
        validate_table(table)?;
        require_key_columns(table, key_columns)?;
        if columns.is_empty() {
            return Err(DialectError::MissingUpdateColumns {
                table: table.to_string(),
            });
        }
        self.reject_duplicates(table, columns, key_columns)?;

        let mut sql = String::from("UPDATE ");
        self.push_table_name(&mut sql, table);
        sql.push_str(" SET ");
        join_to(&mut sql, ",", names(columns), |buf: &mut String, col| {
            self.push_quoted(buf, col);
            buf.push_str("=?");
        });
        sql.push_str(" WHERE ");
        join_to(&mut sql, " AND ", names(key_columns), |buf: &mut String, key| {
            self.push_quoted(buf, key);
            buf.push_str("=?");
        });
        debug!(dialect = self.name(), table, sql = %sql, "Generated update statement");
        Ok(sql)
    }

    /// Generates the statement of the given kind for `request`.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the selected generator.
    pub fn statement(&self, kind: StatementKind, request: &UpsertRequest) -> Result<String> {
        let table = request.table.as_str();
        let columns = request.columns.as_slice();
        let keys = request.key_columns.as_slice();
        match kind {
            StatementKind::Insert => self.insert_statement(table, columns, keys),
            StatementKind::Upsert => self.upsert_statement(table, columns, keys),
            StatementKind::Update => self.update_statement(table, columns, keys),
        }
    }

    pub(crate) fn push_quoted(&self, buf: &mut String, name: &str) {
        buf.push_str(self.quote_open);
        buf.push_str(name);
        buf.push_str(self.quote_close);
    }

    pub(crate) fn push_table_name(&self, buf: &mut String, name: &str) {
        let parts = self.split_qualified(name.trim());
        let first = parts.iter().position(|part| !part.is_empty()).unwrap_or(0);
        let last = parts.iter().rposition(|part| !part.is_empty()).unwrap_or(0);
        let keep_empty =
            |i: usize| matches!(self.kind, DialectKind::SqlServer) && first < i && i < last;
        let kept = parts
            .into_iter()
            .enumerate()
            .filter(|&(i, part)| !part.is_empty() || keep_empty(i))
            .map(|(_, part)| part);
        join_to(buf, ".", kept, |buf: &mut String, part| {
            if part.is_empty() || self.is_quoted(part) {
                buf.push_str(part);
            } else {
                self.push_quoted(buf, part);
            }
        });
    }

    /// Writes `INSERT INTO t (cols,keys) VALUES (?,...)`.
    pub(crate) fn write_insert<C: AsRef<str>, K: AsRef<str>>(
        &self,
        buf: &mut String,
        table: &str,
        columns: &[C],
        key_columns: &[K],
    ) {
        buf.push_str("INSERT INTO ");
        self.push_table_name(buf, table);
        buf.push_str(" (");
        join_chain_to(
            buf,
            ",",
            names(columns),
            names(key_columns),
            surround(self.quote_open, self.quote_close),
        );
        buf.push_str(") VALUES (");
        placeholders_to(buf, ",", columns.len() + key_columns.len());
        buf.push(')');
    }

    fn reject_duplicates<C: AsRef<str>, K: AsRef<str>>(
        &self,
        table: &str,
        columns: &[C],
        key_columns: &[K],
    ) -> Result<()> {
        let fold = self.kind.folds_identifier_case();
        let mut seen: HashSet<String> = HashSet::with_capacity(columns.len() + key_columns.len());
        for name in names(columns).chain(names(key_columns)) {
            let key = if fold {
                name.to_ascii_lowercase()
            } else {
                name.to_string()
            };
            if !seen.insert(key) {
                return Err(DialectError::DuplicateColumn {
                    table: table.to_string(),
                    column: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn is_quoted(&self, part: &str) -> bool {
        part.len() >= self.quote_open.len() + self.quote_close.len()
            && part.starts_with(self.quote_open)
            && part.ends_with(self.quote_close)
    }

    fn split_qualified<'a>(&self, name: &'a str) -> Vec<&'a str> {
        let mut parts = Vec::new();
        let mut start = 0;
        let mut quoted = false;
        for (i, c) in name.char_indices() {
            let tail = &name[i..];
            if quoted {
                quoted = !tail.starts_with(self.quote_close);
            } else if tail.starts_with(self.quote_open) {
                quoted = true;
            } else if c == '.' {
                parts.push(&name[start..i]);
                start = i + 1;
            }
        }
        parts.push(&name[start..]);
        parts
    }
}

fn validate_table(table: &str) -> Result<()> {
    if table.trim().is_empty() {
        return Err(DialectError::InvalidTable);
    }
    Ok(())
}

fn require_key_columns<K>(table: &str, key_columns: &[K]) -> Result<()> {
    if key_columns.is_empty() {
        return Err(DialectError::MissingKeyColumns {
            table: table.to_string(),
        });
    }
    Ok(())
}

/// Views a list of names as `&str`.
pub(crate) fn names<T: AsRef<str>>(items: &[T]) -> impl Iterator<Item = &str> + Clone {
    items.iter().map(T::as_ref)
}
