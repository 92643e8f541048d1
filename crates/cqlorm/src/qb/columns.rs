//! Column lists for SELECT, INSERT and DELETE.

use crate::error::CqlError;
use crate::qb::term::Raw;
use crate::schema::{Column, OrderState, SelectState};
use std::fmt;

/// Anything that renders as a column reference in a column list or ORDER BY.
///
/// Built from a plain name, a [`Column`], a select/order state, or [`Raw`]
/// text. The text is used verbatim. An anonymous column descriptor is kept
/// as such and rejected by the fragment it is added to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnExpr {
    text: String,
    named: bool,
}

impl ColumnExpr {
    fn named(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            named: true,
        }
    }

    fn from_name(name: Option<&str>, text: impl FnOnce() -> String) -> Self {
        match name {
            Some(_) => Self::named(text()),
            None => Self {
                text: String::new(),
                named: false,
            },
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// `false` when built from an anonymous column descriptor.
    pub fn is_named(&self) -> bool {
        self.named
    }

    pub(crate) fn unnamed_error(context: &str) -> CqlError {
        CqlError::malformed(format!("{} needs a named column", context))
    }
}

impl fmt::Display for ColumnExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for ColumnExpr {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for ColumnExpr {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

impl From<&String> for ColumnExpr {
    fn from(name: &String) -> Self {
        Self::named(name.clone())
    }
}

impl From<&Column> for ColumnExpr {
    fn from(column: &Column) -> Self {
        let name = column.name();
        Self::from_name(name, || name.unwrap_or_default().to_string())
    }
}

impl From<Column> for ColumnExpr {
    fn from(column: Column) -> Self {
        Self::from(&column)
    }
}

impl From<SelectState> for ColumnExpr {
    fn from(state: SelectState) -> Self {
        Self::from_name(state.name(), || state.to_string())
    }
}

impl From<OrderState> for ColumnExpr {
    fn from(state: OrderState) -> Self {
        Self::from_name(state.name(), || state.to_string())
    }
}

impl From<Raw> for ColumnExpr {
    fn from(raw: Raw) -> Self {
        Self::named(raw.into_string())
    }
}

/// A comma-delimited column list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Columns {
    columns: Vec<ColumnExpr>,
    build_error: Option<CqlError>,
}

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// `*`, the default SELECT list.
    pub fn star() -> Self {
        Self {
            columns: vec![ColumnExpr::from("*")],
            build_error: None,
        }
    }

    /// The first composition error recorded, if any.
    pub fn build_error(&self) -> Option<&CqlError> {
        self.build_error.as_ref()
    }

    fn check(&mut self, column: &ColumnExpr) {
        if !column.is_named() && self.build_error.is_none() {
            self.build_error = Some(ColumnExpr::unnamed_error("column list"));
        }
    }

    /// Replace the list.
    ///
    /// Accepts any iterable, so an array literal, a `Vec` and a slice
    /// iterator all produce the same list.
    pub fn set<I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnExpr>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self.build_error = self
            .columns
            .iter()
            .any(|c| !c.is_named())
            .then(|| ColumnExpr::unnamed_error("column list"));
        self
    }

    /// Append one column.
    pub fn push(&mut self, column: impl Into<ColumnExpr>) -> &mut Self {
        let column = column.into();
        self.check(&column);
        self.columns.push(column);
        self
    }

    pub fn get(&self, index: usize) -> Option<&ColumnExpr> {
        self.columns.get(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl fmt::Display for Columns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(column.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types;

    #[test]
    fn test_array_and_vec_are_equivalent() {
        let mut a = Columns::new();
        a.set(["a", "b"]);
        let mut b = Columns::new();
        b.set(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "a, b");
    }

    #[test]
    fn test_mixed_sources() {
        let mut cols = Columns::new();
        cols.push(types::text("a").as_alias("q")).push("b");
        assert_eq!(cols.to_string(), "a as q, b");
        assert!(cols.build_error().is_none());
    }

    #[test]
    fn test_anonymous_column_is_recorded() {
        let anonymous = types::int(None);
        let mut cols = Columns::new();
        cols.push("a").push(&anonymous).push(anonymous.count());
        assert!(cols.build_error().unwrap().is_malformed());

        cols.set(["a", "b"]);
        assert!(cols.build_error().is_none());
    }
}
