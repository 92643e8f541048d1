//! ORDER BY fragment.

use crate::error::CqlError;
use crate::qb::columns::ColumnExpr;
use std::fmt;

/// Ordered list of `column DIRECTION` rules.
///
/// Rules are kept in insertion order with no dedup; ordering the same column
/// twice simply appends a second rule.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Order {
    rules: Vec<String>,
    build_error: Option<CqlError>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. `direction` is upper-cased; pass `""` to omit it.
    pub fn by(&mut self, column: impl Into<ColumnExpr>, direction: &str) -> &mut Self {
        let column = column.into();
        if !column.is_named() {
            if self.build_error.is_none() {
                self.build_error = Some(ColumnExpr::unnamed_error("ORDER BY"));
            }
            return self;
        }
        let rule = format!("{} {}", column, direction.to_uppercase());
        self.rules.push(rule.trim().to_string());
        self
    }

    /// Add a rule that already carries its direction (an order state or raw text).
    pub fn push(&mut self, rule: impl Into<ColumnExpr>) -> &mut Self {
        self.by(rule, "")
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The first composition error recorded, if any.
    pub fn build_error(&self) -> Option<&CqlError> {
        self.build_error.as_ref()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rules.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::term::raw;
    use crate::schema::types;

    #[test]
    fn test_raw_rule() {
        let mut order = Order::new();
        order.push(raw("a DESC"));
        assert_eq!(order.to_string(), "a DESC");
    }

    #[test]
    fn test_column_state() {
        let mut order = Order::new();
        order.push(types::text("a").desc());
        assert_eq!(order.to_string(), "a DESC");
    }

    #[test]
    fn test_multiple_rules() {
        let mut order = Order::new();
        order.by("a", "desc").by("b", "ASC").by("c", "");
        assert_eq!(order.to_string(), "a DESC, b ASC, c");
    }

    #[test]
    fn test_anonymous_column_is_rejected() {
        let anonymous = types::int(None);
        let mut order = Order::new();
        order.by(&anonymous, "desc").push(anonymous.asc());
        assert!(order.is_empty());
        assert!(order.build_error().unwrap().is_malformed());
    }
}
