//! Logical column types understood by every dialect.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The connector's database-agnostic value kinds.
///
/// The set is closed: every dialect maps each member to exactly one native
/// type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalType {
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Boolean.
    Boolean,
    /// Text.
    String,
    /// Opaque byte sequence.
    Bytes,
}

impl LogicalType {
    /// Number of logical types.
    pub const COUNT: usize = 9;

    /// Every logical type, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Float32,
        Self::Float64,
        Self::Boolean,
        Self::String,
        Self::Bytes,
    ];

    /// Position of this type in [`LogicalType::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Connector name of the type (`INT32`, `STRING`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int8 => "INT8",
            Self::Int16 => "INT16",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Float32 => "FLOAT32",
            Self::Float64 => "FLOAT64",
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Bytes => "BYTES",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when parsing an unknown logical type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown logical type: {0}")]
pub struct UnknownLogicalType(pub String);

impl FromStr for LogicalType {
    type Err = UnknownLogicalType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLogicalType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, t) in LogicalType::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("int64".parse::<LogicalType>(), Ok(LogicalType::Int64));
        assert_eq!(" BYTES ".parse::<LogicalType>(), Ok(LogicalType::Bytes));
        assert!("DECIMAL".parse::<LogicalType>().is_err());
    }

    #[test]
    fn test_serde_uses_connector_names() {
        let json = serde_json::to_string(&LogicalType::Float64).unwrap();
        assert_eq!(json, "\"FLOAT64\"");
        let parsed: LogicalType = serde_json::from_str("\"BOOLEAN\"").unwrap();
        assert_eq!(parsed, LogicalType::Boolean);
    }
}
