//! Statement requests a sink can load from its configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which statement a sink writes records with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    /// Plain `INSERT`.
    #[default]
    Insert,
    /// Insert, or overwrite the row with the same key.
    Upsert,
    /// `UPDATE ... WHERE <keys>`.
    Update,
}

impl StatementKind {
    /// Lowercase name, as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Upsert => "upsert",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown statement kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown statement kind '{0}', expected insert, upsert or update")]
pub struct UnknownStatementKind(pub String);

impl FromStr for StatementKind {
    type Err = UnknownStatementKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insert" => Ok(Self::Insert),
            "upsert" => Ok(Self::Upsert),
            "update" => Ok(Self::Update),
            _ => Err(UnknownStatementKind(s.to_string())),
        }
    }
}

/// Names needed to shape a statement for one table.
///
/// Carries names only; values are bound by the caller, non-key columns
/// first, then key columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertRequest {
    /// Target table, optionally schema-qualified.
    pub table: String,
    /// Non-key columns, in bind order.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Key columns, in bind order.
    #[serde(default, alias = "keys")]
    pub key_columns: Vec<String>,
}

impl UpsertRequest {
    /// Creates a request from any string-like names.
    #[must_use]
    pub fn new<C, K>(table: impl Into<String>, columns: C, key_columns: K) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            key_columns: key_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of positional placeholders a statement for this request binds.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.columns.len() + self.key_columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_kind_parse() {
        assert_eq!("UPSERT".parse::<StatementKind>(), Ok(StatementKind::Upsert));
        assert_eq!(StatementKind::default(), StatementKind::Insert);
        assert!("merge".parse::<StatementKind>().is_err());
        assert_eq!(StatementKind::Update.to_string(), "update");
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{"table": "users", "columns": ["name", "email"], "keys": ["id"]}"#;
        let request: UpsertRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request, UpsertRequest::new("users", ["name", "email"], ["id"]));
        assert_eq!(request.placeholder_count(), 3);
    }

    #[test]
    fn test_request_defaults_to_empty_lists() {
        let request: UpsertRequest = serde_json::from_str(r#"{"table": "events"}"#).unwrap();
        assert!(request.columns.is_empty());
        assert!(request.key_columns.is_empty());
    }
}
