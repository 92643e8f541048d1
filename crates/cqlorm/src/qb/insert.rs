//! INSERT statement builder.

use crate::error::{CqlError, CqlResult};
use crate::qb::columns::{ColumnExpr, Columns};
use crate::qb::options::Options;
use crate::qb::param::ParamList;
use crate::qb::term::Term;
use crate::qb::traits::{Rendered, Statement, StatementKind};
use crate::qb::tuple::TermTuple;
use crate::schema::Nameable;

/// INSERT statement builder.
///
/// Column and value counts must match; rendering fails otherwise.
#[derive(Clone, Debug, Default)]
pub struct Insert {
    table: Option<String>,
    columns: Columns,
    values: TermTuple,
    options: Options,
    if_not_exists: bool,
}

impl Insert {
    /// Create an empty INSERT builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target table.
    pub fn into_table(mut self, table: impl Nameable) -> Self {
        self.table = table.cql_name().map(str::to_string);
        self
    }

    /// Replace the inserted columns.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnExpr>,
    {
        self.columns.set(columns);
        self
    }

    /// Replace the inserted values.
    pub fn values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        self.values.set_terms(values);
        self
    }

    /// Append one column and its value.
    pub fn value(mut self, column: impl Into<ColumnExpr>, value: impl Into<Term>) -> Self {
        self.columns.push(column);
        self.values.push(value);
        self
    }

    /// Replace columns and values from ordered `(column, value)` pairs.
    pub fn data<K, V>(mut self, data: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<ColumnExpr>,
        V: Into<Term>,
    {
        let (columns, values): (Vec<ColumnExpr>, Vec<Term>) = data
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        self.columns.set(columns);
        self.values.set_terms(values);
        self
    }

    /// Add `IF NOT EXISTS`.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// `USING TTL n`
    pub fn ttl(mut self, seconds: u32) -> Self {
        self.options.ttl(seconds);
        self
    }

    /// `USING TIMESTAMP n`
    pub fn timestamp(mut self, micros: i64) -> Self {
        self.options.timestamp(micros);
        self
    }
}

impl Statement for Insert {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn build_cql(&self) -> Rendered {
        let mut params = ParamList::new();
        let values = self.values.build(&mut params);

        let mut cql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            self.table.as_deref().unwrap_or_default(),
            self.columns,
            values
        );

        if self.if_not_exists {
            cql.push_str(" IF NOT EXISTS");
        }

        if !self.options.is_empty() {
            cql.push_str(" USING ");
            cql.push_str(&self.options.to_string());
        }

        cql.push(';');
        Rendered::new(params.into_vec(), cql)
    }

    fn validate(&self) -> CqlResult<()> {
        if self.table.as_deref().is_none_or(str::is_empty) {
            return Err(CqlError::missing("table"));
        }
        if let Some(err) = self.columns.build_error() {
            return Err(err.clone());
        }
        if self.columns.is_empty() {
            return Err(CqlError::missing("columns"));
        }
        if self.columns.len() != self.values.len() {
            return Err(CqlError::malformed(format!(
                "INSERT has {} columns but {} values",
                self.columns.len(),
                self.values.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::raw;
    use crate::schema::{Table, types};
    use crate::value::CqlValue;

    fn table() -> Table {
        Table::new("tbl")
    }

    #[test]
    fn test_basic() {
        let rendered = Insert::new()
            .into_table(&table())
            .columns(["a", "b"])
            .values([1, 2])
            .render()
            .unwrap();
        assert_eq!(rendered.cql, "INSERT INTO tbl (a, b) VALUES (?, ?);");
        assert_eq!(rendered.params, vec![CqlValue::Int(1), CqlValue::Int(2)]);
    }

    #[test]
    fn test_raw_value() {
        let rendered = Insert::new()
            .into_table(&table())
            .columns([ColumnExpr::from(&types::text("a")), "b".into()])
            .values([Term::from(1), Term::from(raw("2"))])
            .render()
            .unwrap();
        assert_eq!(rendered.cql, "INSERT INTO tbl (a, b) VALUES (?, 2);");
        assert_eq!(rendered.params, vec![CqlValue::Int(1)]);
    }

    #[test]
    fn test_data() {
        let rendered = Insert::new()
            .into_table("tbl")
            .data([("a", 1), ("b", 2)])
            .render()
            .unwrap();
        assert_eq!(rendered.cql, "INSERT INTO tbl (a, b) VALUES (?, ?);");
        assert_eq!(rendered.params, vec![CqlValue::Int(1), CqlValue::Int(2)]);
    }

    #[test]
    fn test_if_not_exists_and_options() {
        let q = Insert::new()
            .into_table("tbl")
            .if_not_exists()
            .columns(["a", "b"])
            .values([1, 2])
            .ttl(30)
            .timestamp(100);
        assert_eq!(
            q.render().unwrap().cql,
            "INSERT INTO tbl (a, b) VALUES (?, ?) IF NOT EXISTS USING TTL 30 AND TIMESTAMP 100;"
        );
    }

    #[test]
    fn test_count_mismatch() {
        let err = Insert::new()
            .into_table("tbl")
            .columns(["a", "b"])
            .values([1])
            .render()
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_missing_columns() {
        let err = Insert::new().into_table("tbl").render().unwrap_err();
        assert_eq!(err, CqlError::missing("columns"));
    }

    #[test]
    fn test_anonymous_column_fails_render() {
        let err = Insert::new()
            .into_table("tbl")
            .value(&types::int(None), 1)
            .render()
            .unwrap_err();
        assert!(err.is_malformed());
    }
}
