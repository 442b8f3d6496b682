//! Total mapping from logical types to native type names.

use crate::error::{DialectError, Result};
use crate::types::LogicalType;

/// An immutable, total mapping from [`LogicalType`] to a native type name.
///
/// Built once from a static entry table; completeness is checked at
/// construction so lookups never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMap {
    names: [&'static str; LogicalType::COUNT],
}

impl TypeMap {
    /// Builds a type map from `(logical type, native name)` entries.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any logical type is missing, listed
    /// twice, or mapped to a blank name.
    pub fn from_entries(
        dialect: &'static str,
        entries: &[(LogicalType, &'static str)],
    ) -> Result<Self> {
        let mut slots: [Option<&'static str>; LogicalType::COUNT] = [None; LogicalType::COUNT];

        for &(logical_type, name) in entries {
            if name.trim().is_empty() {
                return Err(DialectError::BlankTypeName {
                    dialect,
                    logical_type,
                });
            }
            let slot = &mut slots[logical_type.index()];
            if slot.is_some() {
                return Err(DialectError::DuplicateTypeMapping {
                    dialect,
                    logical_type,
                });
            }
            *slot = Some(name);
        }

        let mut names = [""; LogicalType::COUNT];
        for logical_type in LogicalType::ALL {
            names[logical_type.index()] =
                slots[logical_type.index()].ok_or(DialectError::MissingTypeMapping {
                    dialect,
                    logical_type,
                })?;
        }

        Ok(Self { names })
    }

    /// Returns the native type name for `logical_type`.
    #[must_use]
    pub const fn get(&self, logical_type: LogicalType) -> &'static str {
        self.names[logical_type.index()]
    }

    /// Iterates over every `(logical type, native name)` pair in
    /// [`LogicalType::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (LogicalType, &'static str)> + '_ {
        LogicalType::ALL.into_iter().map(|t| (t, self.get(t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: [(LogicalType, &str); 9] = [
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

    #[test]
    fn test_complete_table_builds() {
        let map = TypeMap::from_entries("test", &FULL).unwrap();
        assert_eq!(map.get(LogicalType::Int32), "INT");
        assert_eq!(map.get(LogicalType::Bytes), "VARBINARY(1024)");
        assert_eq!(map.iter().count(), LogicalType::COUNT);
    }

    #[test]
    fn test_missing_entry_fails_fast() {
        let err = TypeMap::from_entries("test", &FULL[..8]).unwrap_err();
        assert_eq!(
            err,
            DialectError::MissingTypeMapping {
                dialect: "test",
                logical_type: LogicalType::Bytes,
            }
        );
    }

    #[test]
    fn test_duplicate_entry_is_rejected() {
        let mut entries = FULL.to_vec();
        entries.push((LogicalType::Int8, "SMALLINT"));
        let err = TypeMap::from_entries("test", &entries).unwrap_err();
        assert!(matches!(
            err,
            DialectError::DuplicateTypeMapping {
                logical_type: LogicalType::Int8,
                ..
            }
        ));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut entries = FULL;
        entries[6] = (LogicalType::Boolean, "  ");
        let err = TypeMap::from_entries("test", &entries).unwrap_err();
        assert!(matches!(err, DialectError::BlankTypeName { .. }));
    }
}
