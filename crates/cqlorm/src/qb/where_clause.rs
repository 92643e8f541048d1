//! WHERE clause fragment.
//!
//! Predicates are kept as a flat token list: comparisons, `AND`/`OR`
//! connectives, and parenthesized sub-groups. Connectives are inserted before
//! a new predicate only when one already exists, so there is never a leading
//! `AND`/`OR`. Bound values are collected as predicates are added, which keeps
//! parameter order identical to placeholder order.

use crate::error::CqlError;
use crate::qb::param::ParamList;
use crate::qb::term::{Raw, Term};
use crate::schema::Column;
use crate::value::CqlValue;

/// Left-hand side of a comparison: one column or a column tuple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WhereColumn {
    Single(String),
    /// Renders as `(a, b, ...)`, for composite-key comparisons.
    Tuple(Vec<String>),
    /// An anonymous column descriptor. Comparing it records an error.
    Unnamed,
}

impl WhereColumn {
    fn render(&self) -> String {
        match self {
            WhereColumn::Single(name) => name.clone(),
            WhereColumn::Tuple(names) => format!("({})", names.join(", ")),
            WhereColumn::Unnamed => String::new(),
        }
    }

    fn arity(&self) -> Option<usize> {
        match self {
            WhereColumn::Single(_) | WhereColumn::Unnamed => None,
            WhereColumn::Tuple(names) => Some(names.len()),
        }
    }
}

impl From<&str> for WhereColumn {
    fn from(name: &str) -> Self {
        WhereColumn::Single(name.to_string())
    }
}

impl From<String> for WhereColumn {
    fn from(name: String) -> Self {
        WhereColumn::Single(name)
    }
}

impl From<&Column> for WhereColumn {
    fn from(column: &Column) -> Self {
        match column.name() {
            Some(name) => WhereColumn::Single(name.to_string()),
            None => WhereColumn::Unnamed,
        }
    }
}

impl From<Vec<&str>> for WhereColumn {
    fn from(names: Vec<&str>) -> Self {
        WhereColumn::Tuple(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for WhereColumn {
    fn from(names: Vec<String>) -> Self {
        WhereColumn::Tuple(names)
    }
}

impl<const N: usize> From<[&str; N]> for WhereColumn {
    fn from(names: [&str; N]) -> Self {
        WhereColumn::Tuple(names.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

impl Connective {
    fn as_str(self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
        }
    }
}

/// WHERE fragment shared by SELECT, UPDATE and DELETE.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Where {
    statements: Vec<String>,
    params: ParamList,
    build_error: Option<CqlError>,
}

impl Where {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any predicates have been added.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The first composition error recorded, if any.
    pub fn build_error(&self) -> Option<&CqlError> {
        self.build_error.as_ref()
    }

    fn record_error(&mut self, err: CqlError) {
        if self.build_error.is_none() {
            self.build_error = Some(err);
        }
    }

    fn push_statement(&mut self, connective: Connective, statement: String) {
        if !self.statements.is_empty() {
            self.statements.push(connective.as_str().to_string());
        }
        self.statements.push(statement);
    }

    fn push_comparison(
        &mut self,
        connective: Connective,
        column: WhereColumn,
        op: &str,
        term: Term,
    ) {
        if column == WhereColumn::Unnamed {
            self.record_error(CqlError::malformed("WHERE needs a named column"));
            return;
        }
        if let (Some(columns), Some(values)) = (column.arity(), term.arity())
            && columns != values
        {
            self.record_error(CqlError::malformed(format!(
                "tuple comparison on {} has {} columns but {} terms",
                column.render(),
                columns,
                values
            )));
            return;
        }

        let lhs = column.render();
        let rhs = term.resolve(&mut self.params);
        self.push_statement(connective, format!("{} {} {}", lhs, op, rhs));
    }

    fn push_group(&mut self, connective: Connective, build: impl FnOnce(&mut Where)) {
        let mut group = Where::new();
        build(&mut group);

        if let Some(err) = group.build_error {
            self.record_error(err);
            return;
        }
        if group.is_empty() {
            return;
        }

        let text = group.statements.join(" ");
        self.params.append(group.params);
        self.push_statement(connective, format!("({})", text));
    }

    /// Add `column op term`, joined with AND.
    pub fn and_where(
        &mut self,
        column: impl Into<WhereColumn>,
        op: &str,
        term: impl Into<Term>,
    ) -> &mut Self {
        self.push_comparison(Connective::And, column.into(), op, term.into());
        self
    }

    /// Alias for [`Where::and_where`].
    pub fn where_(
        &mut self,
        column: impl Into<WhereColumn>,
        op: &str,
        term: impl Into<Term>,
    ) -> &mut Self {
        self.and_where(column, op, term)
    }

    /// Add `column op term`, joined with OR.
    pub fn or_where(
        &mut self,
        column: impl Into<WhereColumn>,
        op: &str,
        term: impl Into<Term>,
    ) -> &mut Self {
        self.push_comparison(Connective::Or, column.into(), op, term.into());
        self
    }

    /// Add `column = term`, joined with AND.
    pub fn and_eq(&mut self, column: impl Into<WhereColumn>, term: impl Into<Term>) -> &mut Self {
        self.and_where(column, "=", term)
    }

    /// Add `column = term`, joined with OR.
    pub fn or_eq(&mut self, column: impl Into<WhereColumn>, term: impl Into<Term>) -> &mut Self {
        self.or_where(column, "=", term)
    }

    /// Add `column IN (terms...)`, joined with AND.
    pub fn and_in<I>(&mut self, column: impl Into<WhereColumn>, terms: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        let column = column.into();
        if column == WhereColumn::Unnamed {
            self.record_error(CqlError::malformed("WHERE needs a named column"));
            return self;
        }
        let tuple: crate::qb::tuple::TermTuple = terms.into_iter().collect();
        let lhs = column.render();
        let rhs = tuple.build(&mut self.params);
        self.push_statement(Connective::And, format!("{} IN {}", lhs, rhs));
        self
    }

    /// Add a raw predicate, joined with AND.
    pub fn and_raw(&mut self, predicate: Raw) -> &mut Self {
        self.push_statement(Connective::And, predicate.into_string());
        self
    }

    /// Add a raw predicate, joined with OR.
    pub fn or_raw(&mut self, predicate: Raw) -> &mut Self {
        self.push_statement(Connective::Or, predicate.into_string());
        self
    }

    /// Add a parenthesized sub-group, joined with AND.
    ///
    /// The callback receives a fresh, empty fragment. An empty group adds
    /// nothing.
    pub fn and_group(&mut self, build: impl FnOnce(&mut Where)) -> &mut Self {
        self.push_group(Connective::And, build);
        self
    }

    /// Add a parenthesized sub-group, joined with OR.
    pub fn or_group(&mut self, build: impl FnOnce(&mut Where)) -> &mut Self {
        self.push_group(Connective::Or, build);
        self
    }

    /// Build the clause text (without the `WHERE` keyword), splicing this
    /// fragment's parameters onto `params`.
    pub fn build(&self, params: &mut ParamList) -> String {
        params.extend(&self.params);
        self.statements.join(" ")
    }

    /// Render to `(parameters, text)`.
    pub fn render(&self) -> (Vec<CqlValue>, String) {
        let mut params = ParamList::new();
        let text = self.build(&mut params);
        (params.into_vec(), text)
    }
}

/// Forwarding WHERE methods for statement builders with a `where_clause` field.
macro_rules! where_forwarding {
    () => {
        /// Add `column op term`, joined with AND.
        pub fn and_where(
            mut self,
            column: impl Into<$crate::qb::WhereColumn>,
            op: &str,
            term: impl Into<$crate::qb::Term>,
        ) -> Self {
            self.where_clause.and_where(column, op, term);
            self
        }

        /// Alias for `and_where`.
        pub fn where_(
            self,
            column: impl Into<$crate::qb::WhereColumn>,
            op: &str,
            term: impl Into<$crate::qb::Term>,
        ) -> Self {
            self.and_where(column, op, term)
        }

        /// Add `column op term`, joined with OR.
        pub fn or_where(
            mut self,
            column: impl Into<$crate::qb::WhereColumn>,
            op: &str,
            term: impl Into<$crate::qb::Term>,
        ) -> Self {
            self.where_clause.or_where(column, op, term);
            self
        }

        /// Add `column = term`, joined with AND.
        pub fn and_eq(
            mut self,
            column: impl Into<$crate::qb::WhereColumn>,
            term: impl Into<$crate::qb::Term>,
        ) -> Self {
            self.where_clause.and_eq(column, term);
            self
        }

        /// Add `column IN (...)`, joined with AND.
        pub fn and_in<I>(mut self, column: impl Into<$crate::qb::WhereColumn>, terms: I) -> Self
        where
            I: IntoIterator,
            I::Item: Into<$crate::qb::Term>,
        {
            self.where_clause.and_in(column, terms);
            self
        }

        /// Add a raw predicate, joined with AND.
        pub fn and_raw(mut self, predicate: $crate::qb::Raw) -> Self {
            self.where_clause.and_raw(predicate);
            self
        }

        /// Add a raw predicate, joined with OR.
        pub fn or_raw(mut self, predicate: $crate::qb::Raw) -> Self {
            self.where_clause.or_raw(predicate);
            self
        }

        /// Add a parenthesized sub-group, joined with AND.
        pub fn and_group(mut self, build: impl FnOnce(&mut $crate::qb::Where)) -> Self {
            self.where_clause.and_group(build);
            self
        }

        /// Add a parenthesized sub-group, joined with OR.
        pub fn or_group(mut self, build: impl FnOnce(&mut $crate::qb::Where)) -> Self {
            self.where_clause.or_group(build);
            self
        }
    };
}

pub(crate) use where_forwarding;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::term::raw;
    use crate::qb::tuple::TermTuple;

    #[test]
    fn test_raw_predicates() {
        let mut w = Where::new();
        w.and_raw(raw("foo")).and_raw(raw("bar"));
        assert_eq!(w.render(), (vec![], "foo AND bar".to_string()));
    }

    #[test]
    fn test_parameterizes_constants() {
        let mut w = Where::new();
        w.and_where("a", "<", 3);
        assert_eq!(w.render(), (vec![CqlValue::Int(3)], "a < ?".to_string()));
    }

    #[test]
    fn test_raw_term_not_parameterized() {
        let mut w = Where::new();
        w.and_where("a", "<", raw("3"));
        assert_eq!(w.render(), (vec![], "a < 3".to_string()));
    }

    #[test]
    fn test_chaining() {
        let mut w = Where::new();
        w.and_where("a", "<", 3)
            .or_where("b", "=", 2)
            .and_where("c", ">", 1);
        let (params, text) = w.render();
        assert_eq!(text, "a < ? OR b = ? AND c > ?");
        assert_eq!(
            params,
            vec![CqlValue::Int(3), CqlValue::Int(2), CqlValue::Int(1)]
        );
    }

    #[test]
    fn test_nested_group() {
        let mut w = Where::new();
        w.where_("a", "<", 3)
            .or_group(|g| {
                g.where_("r", ">", 1).or_where("z", ">", raw("x"));
            })
            .and_where("c", ">", 2);
        let (params, text) = w.render();
        assert_eq!(text, "a < ? OR (r > ? OR z > x) AND c > ?");
        assert_eq!(
            params,
            vec![CqlValue::Int(3), CqlValue::Int(1), CqlValue::Int(2)]
        );
    }

    #[test]
    fn test_empty_group_is_skipped() {
        let mut w = Where::new();
        w.and_where("a", "=", 1).or_group(|_| {});
        assert_eq!(w.render().1, "a = ?");
    }

    #[test]
    fn test_anonymous_column_is_recorded() {
        let anonymous = crate::schema::types::int(None);
        let mut w = Where::new();
        w.and_where("a", "=", 1).and_eq(&anonymous, 2).and_in(&anonymous, [3]);
        assert_eq!(w.render(), (vec![CqlValue::Int(1)], "a = ?".to_string()));
        assert!(w.build_error().unwrap().is_malformed());
    }

    #[test]
    fn test_column_tuple() {
        let mut w = Where::new();
        w.and_where(["a", "b"], "<", 3);
        assert_eq!(w.render(), (vec![CqlValue::Int(3)], "(a, b) < ?".to_string()));
    }

    #[test]
    fn test_term_tuple() {
        let nested = TermTuple::new().with(3).with(raw("4"));
        let mut w = Where::new();
        w.and_where("a", "<", TermTuple::new().with(1).with(2).with(nested));
        let (params, text) = w.render();
        assert_eq!(text, "a < (?, ?, (?, 4))");
        assert_eq!(
            params,
            vec![CqlValue::Int(1), CqlValue::Int(2), CqlValue::Int(3)]
        );
    }

    #[test]
    fn test_complex_values_bind_whole() {
        let mut w = Where::new();
        w.and_where("a", "<", vec![1, 2, 3])
            .and_where("b", ">", CqlValue::map([("q", 1), ("w", 2)]));
        let (params, text) = w.render();
        assert_eq!(text, "a < ? AND b > ?");
        assert_eq!(
            params,
            vec![CqlValue::list([1, 2, 3]), CqlValue::map([("q", 1), ("w", 2)])]
        );
    }

    #[test]
    fn test_tuple_arity_mismatch_is_recorded() {
        let mut w = Where::new();
        w.and_where(["a", "b"], ">", TermTuple::new().with(1).with(2).with(3));
        assert!(w.is_empty());
        assert!(w.build_error().is_some_and(CqlError::is_malformed));
    }

    #[test]
    fn test_in_list() {
        let mut w = Where::new();
        w.and_in("id", [1, 2]);
        assert_eq!(
            w.render(),
            (vec![CqlValue::Int(1), CqlValue::Int(2)], "id IN (?, ?)".to_string())
        );
    }
}
