//! DELETE statement builder.

use crate::error::{CqlError, CqlResult};
use crate::qb::columns::{ColumnExpr, Columns};
use crate::qb::conditionals::Conditionals;
use crate::qb::options::Options;
use crate::qb::param::ParamList;
use crate::qb::term::Term;
use crate::qb::traits::{Rendered, Statement, StatementKind};
use crate::qb::where_clause::{Where, where_forwarding};
use crate::schema::Nameable;

/// DELETE statement builder.
///
/// With no columns the whole row is deleted.
#[derive(Clone, Debug, Default)]
pub struct Delete {
    table: Option<String>,
    columns: Columns,
    options: Options,
    where_clause: Where,
    conditionals: Conditionals,
}

impl Delete {
    /// Create an empty DELETE builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table to delete from.
    pub fn from(mut self, table: impl Nameable) -> Self {
        self.table = table.cql_name().map(str::to_string);
        self
    }

    /// Replace the deleted columns.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnExpr>,
    {
        self.columns.set(columns);
        self
    }

    /// Append one deleted column.
    pub fn column(mut self, column: impl Into<ColumnExpr>) -> Self {
        self.columns.push(column);
        self
    }

    where_forwarding!();

    /// Add `IF key = value`.
    pub fn when(mut self, key: impl Into<String>, value: impl Into<Term>) -> Self {
        self.conditionals.when(key, value);
        self
    }

    /// Add `IF EXISTS key`.
    pub fn when_exists(mut self, key: impl Into<String>) -> Self {
        self.conditionals.when_exists(key);
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

impl Statement for Delete {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn build_cql(&self) -> Rendered {
        let mut params = ParamList::new();

        let mut cql = String::from("DELETE");
        if !self.columns.is_empty() {
            cql.push(' ');
            cql.push_str(&self.columns.to_string());
        }
        cql.push_str(" FROM ");
        cql.push_str(self.table.as_deref().unwrap_or_default());

        if !self.options.is_empty() {
            cql.push_str(" USING ");
            cql.push_str(&self.options.to_string());
        }

        if !self.where_clause.is_empty() {
            cql.push_str(" WHERE ");
            cql.push_str(&self.where_clause.build(&mut params));
        }

        if !self.conditionals.is_empty() {
            cql.push_str(" IF ");
            cql.push_str(&self.conditionals.build(&mut params));
        }

        cql.push(';');
        Rendered::new(params.into_vec(), cql)
    }

    fn validate(&self) -> CqlResult<()> {
        if self.table.as_deref().is_none_or(str::is_empty) {
            return Err(CqlError::missing("table"));
        }
        if let Some(err) = self
            .columns
            .build_error()
            .or(self.where_clause.build_error())
        {
            return Err(err.clone());
        }
        Ok(())
    }
}
