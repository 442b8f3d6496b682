#![allow(dead_code)]

use sink_dialect_core::{Dialect, DialectKind};

pub fn dialect(kind: DialectKind) -> Dialect {
    Dialect::new(kind).unwrap_or_else(|e| panic!("Failed to build {kind}: {e}"))
}

pub fn all_dialects() -> Vec<Dialect> {
    DialectKind::ALL.into_iter().map(dialect).collect()
}

pub fn placeholder_count(sql: &str) -> usize {
    sql.matches('?').count()
}

/// Position of `needle` in `sql`, panicking with context when absent.
pub fn position(sql: &str, needle: &str) -> usize {
    sql.find(needle)
        .unwrap_or_else(|| panic!("Expected {needle:?} in:\n  {sql}"))
}

/// Asserts that `needles` occur in `sql` in the given order.
pub fn assert_in_order(sql: &str, needles: &[&str]) {
    let positions: Vec<usize> = needles.iter().map(|n| position(sql, n)).collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "Expected {needles:?} in order in:\n  {sql}"
    );
}
