//! Delimiter joining directly into an output buffer.
//!
//! Every dialect assembles its column lists, placeholder lists and update
//! clauses through these helpers. A transform writes one element's text
//! into the buffer; the join writes the delimiters in between.
//!
//! ```rust
//! use sink_dialect_core::join::{join_chain_to, join_to, surround};
//!
//! let mut sql = String::new();
//! join_chain_to(&mut sql, ",", ["name", "email"], ["id"], surround("\"", "\""));
//! assert_eq!(sql, r#""name","email","id""#);
//!
//! let mut sets = String::new();
//! join_to(&mut sets, ", ", ["a", "b"], |buf: &mut String, col: &str| {
//!     buf.push_str(col);
//!     buf.push_str("=?");
//! });
//! assert_eq!(sets, "a=?, b=?");
//! ```

/// Appends every element of `items` to `buf`, written by `transform` and
/// separated by `delim`. No trailing delimiter; an empty sequence appends
/// nothing.
pub fn join_to<I, F>(buf: &mut String, delim: &str, items: I, mut transform: F)
where
    I: IntoIterator,
    F: FnMut(&mut String, I::Item),
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            buf.push_str(delim);
        }
        transform(buf, item);
    }
}

/// Joins `first` followed by `second` as one logical sequence.
pub fn join_chain_to<I, J, F>(buf: &mut String, delim: &str, first: I, second: J, transform: F)
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&mut String, I::Item),
{
    join_to(buf, delim, first.into_iter().chain(second), transform);
}

/// Appends `count` positional `?` placeholders separated by `delim`.
pub fn placeholders_to(buf: &mut String, delim: &str, count: usize) {
    join_to(buf, delim, std::iter::repeat_n("?", count), identity());
}

/// Transform that appends the element unchanged.
#[must_use]
pub fn identity<S: AsRef<str>>() -> impl Fn(&mut String, S) + Copy {
    |buf: &mut String, item: S| buf.push_str(item.as_ref())
}

/// Transform that wraps the element between `open` and `close`.
#[must_use]
pub fn surround<S: AsRef<str>>(
    open: &'static str,
    close: &'static str,
) -> impl Fn(&mut String, S) + Copy {
    move |buf: &mut String, item: S| {
        buf.push_str(open);
        buf.push_str(item.as_ref());
        buf.push_str(close);
    }
}
