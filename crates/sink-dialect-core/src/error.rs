//! Error types for dialect construction and statement generation.

use crate::types::LogicalType;

/// Errors raised while building a dialect or generating a statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialectError {
    /// A dialect's type table has no entry for a logical type.
    #[error("Dialect '{dialect}' has no native type mapping for {logical_type}")]
    MissingTypeMapping {
        /// Dialect name.
        dialect: &'static str,
        /// The unmapped logical type.
        logical_type: LogicalType,
    },

    /// A dialect's type table lists a logical type more than once.
    #[error("Dialect '{dialect}' maps {logical_type} more than once")]
    DuplicateTypeMapping {
        /// Dialect name.
        dialect: &'static str,
        /// The logical type listed twice.
        logical_type: LogicalType,
    },

    /// A dialect maps a logical type to a blank native type name.
    #[error("Dialect '{dialect}' maps {logical_type} to a blank type name")]
    BlankTypeName {
        /// Dialect name.
        dialect: &'static str,
        /// The logical type with a blank mapping.
        logical_type: LogicalType,
    },

    /// No registered dialect matches a product name or connection URL.
    #[error("No dialect registered for '{0}'")]
    UnknownDialect(String),

    /// The table name is empty or whitespace.
    #[error("<table=> is not valid. A non-empty table name is expected")]
    InvalidTable,

    /// An upsert or update was requested without key columns.
    #[error(
        "Your SQL table {table} does not have any primary key/s. \
         You can only UPSERT when your SQL table has primary key/s defined"
    )]
    MissingKeyColumns {
        /// The offending table.
        table: String,
    },

    /// An insert was requested with neither non-key nor key columns.
    #[error("Cannot INSERT into table {table}: no columns given")]
    NoColumns {
        /// The offending table.
        table: String,
    },

    /// An update was requested without any non-key column to set.
    #[error("Cannot UPDATE table {table}: no non-key columns to set")]
    MissingUpdateColumns {
        /// The offending table.
        table: String,
    },

    /// A column name appears more than once across non-key and key columns.
    ///
    /// Names are compared ignoring ASCII case for MySQL, SQLite and SQL
    /// Server, and exactly for PostgreSQL and Oracle.
    #[error("Column '{column}' is listed more than once for table {table}")]
    DuplicateColumn {
        /// The offending table.
        table: String,
        /// The repeated column name.
        column: String,
    },
}

impl DialectError {
    /// Returns true for errors caused by a broken dialect definition or an
    /// unresolvable dialect, as opposed to a bad statement request.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingTypeMapping { .. }
                | Self::DuplicateTypeMapping { .. }
                | Self::BlankTypeName { .. }
                | Self::UnknownDialect(_)
        )
    }
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_columns_names_table() {
        let err = DialectError::MissingKeyColumns {
            table: "users".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("users"));
        assert!(msg.contains("primary key"));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_no_columns_is_a_request_error() {
        let err = DialectError::NoColumns {
            table: "audit".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot INSERT into table audit: no columns given");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_invalid_table_mentions_parameter() {
        assert!(DialectError::InvalidTable.to_string().contains("<table=>"));
    }

    #[test]
    fn test_configuration_classification() {
        let err = DialectError::MissingTypeMapping {
            dialect: "mysql",
            logical_type: LogicalType::Bytes,
        };
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Dialect 'mysql' has no native type mapping for BYTES"
        );
        assert!(DialectError::UnknownDialect("db2".into()).is_configuration());
    }
}
