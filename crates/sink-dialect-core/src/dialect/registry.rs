//! Lookup of built dialects by product name or connection URL.

use std::sync::OnceLock;

use tracing::{debug, warn};

use super::{Dialect, DialectKind};
use crate::error::{DialectError, Result};

/// Every built-in dialect, built and validated once.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    dialects: Vec<Dialect>,
}

impl DialectRegistry {
    /// Builds every dialect in [`DialectKind::ALL`].
    ///
    /// # Errors
    ///
    /// Returns the first configuration error found in a dialect's type
    /// table.
    pub fn builtin() -> Result<Self> {
        let dialects = DialectKind::ALL
            .into_iter()
            .map(Dialect::new)
            .collect::<Result<Vec<_>>>()?;
        debug!(count = dialects.len(), "Built dialect registry");
        Ok(Self { dialects })
    }

    /// Process-wide registry, built on first use.
    ///
    /// # Errors
    ///
    /// Returns the configuration error from [`DialectRegistry::builtin`];
    /// the failure is cached, so every call reports the same error.
    pub fn global() -> Result<&'static Self> {
        static GLOBAL: OnceLock<Result<DialectRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(Self::builtin).as_ref().map_err(Clone::clone)
    }

    /// Returns the dialect for `kind`.
    #[must_use]
    pub fn get(&self, kind: DialectKind) -> Option<&Dialect> {
        self.dialects.iter().find(|d| d.kind() == kind)
    }

    /// Resolves a dialect from a product name such as `"PostgreSQL"`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownDialect`] if no dialect matches.
    pub fn for_product(&self, product_name: &str) -> Result<&Dialect> {
        let found = DialectKind::from_product_name(product_name).and_then(|kind| self.get(kind));
        found.ok_or_else(|| {
            warn!(product = product_name, "No dialect matches database product");
            DialectError::UnknownDialect(product_name.to_string())
        })
    }

    /// Resolves a dialect from a JDBC URL such as `jdbc:mysql://host/db`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownDialect`] if no dialect matches.
    pub fn for_jdbc_url(&self, url: &str) -> Result<&Dialect> {
        let found = DialectKind::from_jdbc_url(url).and_then(|kind| self.get(kind));
        found.ok_or_else(|| {
            warn!(url, "No dialect matches connection URL");
            DialectError::UnknownDialect(url.to_string())
        })
    }

    /// Iterates over the registered dialects.
    pub fn iter(&self) -> impl Iterator<Item = &Dialect> {
        self.dialects.iter()
    }
}
