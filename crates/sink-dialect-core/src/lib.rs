//! # sink-dialect-core
//!
//! Dialect-aware SQL shapes for database sinks.
//!
//! A sink knows its records only through a database-agnostic schema. This
//! crate turns that schema into what a particular database expects:
//! - Native column type names for each [`LogicalType`]
//! - Identifier quoting, including schema-qualified table names
//! - `INSERT`, `UPDATE` and, above all, upsert statements, whose syntax
//!   differs the most between databases
//!
//! Statements contain only quoted names and positional `?` placeholders.
//! Values never pass through this crate, so the generated SQL is safe to
//! prepare once per table and reuse for every batch.
//!
//! ## Example
//!
//! ```rust
//! use sink_dialect_core::{DialectRegistry, LogicalType};
//!
//! let registry = DialectRegistry::global().unwrap();
//! let mysql = registry.for_jdbc_url("jdbc:mysql://localhost:3306/shop").unwrap();
//!
//! assert_eq!(mysql.native_type(LogicalType::Int32), "INT");
//! assert_eq!(
//!     mysql.upsert_statement("users", &["name", "email"], &["id"]).unwrap(),
//!     "INSERT INTO `users` (`name`,`email`,`id`) VALUES (?,?,?) \
//!      ON DUPLICATE KEY UPDATE `name`=VALUES(`name`),`email`=VALUES(`email`)"
//! );
//! ```

pub mod dialect;
pub mod error;
pub mod join;
pub mod statement;
pub mod type_map;
pub mod types;

pub use dialect::{Dialect, DialectKind, DialectRegistry};
pub use error::{DialectError, Result};
pub use statement::{StatementKind, UpsertRequest};
pub use type_map::TypeMap;
pub use types::LogicalType;
