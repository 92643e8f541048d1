//! SELECT statement builder.

use crate::error::{CqlError, CqlResult};
use crate::qb::columns::{ColumnExpr, Columns};
use crate::qb::order::Order;
use crate::qb::param::ParamList;
use crate::qb::traits::{Rendered, Statement, StatementKind};
use crate::qb::where_clause::{Where, where_forwarding};
use crate::schema::Nameable;

/// SELECT statement builder.
///
/// Renders `SELECT <columns> FROM <table>` followed by the non-empty parts of
/// `WHERE`, `ORDER BY`, `LIMIT` and `ALLOW FILTERING`.
#[derive(Clone, Debug, Default)]
pub struct Select {
    /// Target table
    table: Option<String>,
    /// Selected columns (empty renders as `*`)
    columns: Columns,
    /// WHERE predicates
    where_clause: Where,
    /// ORDER BY rules
    order: Order,
    /// LIMIT
    limit: Option<u64>,
    /// ALLOW FILTERING
    allow_filtering: bool,
}

impl Select {
    /// Create an empty SELECT builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table to select from.
    pub fn from(mut self, table: impl Nameable) -> Self {
        self.table = table.cql_name().map(str::to_string);
        self
    }

    /// Replace the selected columns.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnExpr>,
    {
        self.columns.set(columns);
        self
    }

    /// Append one selected column.
    pub fn column(mut self, column: impl Into<ColumnExpr>) -> Self {
        self.columns.push(column);
        self
    }

    where_forwarding!();

    /// Add an ORDER BY rule. `direction` may be empty.
    pub fn order_by(mut self, column: impl Into<ColumnExpr>, direction: &str) -> Self {
        self.order.by(column, direction);
        self
    }

    /// Add an ORDER BY rule that carries its own direction.
    pub fn order(mut self, rule: impl Into<ColumnExpr>) -> Self {
        self.order.push(rule);
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Add ALLOW FILTERING.
    pub fn allow_filtering(mut self) -> Self {
        self.allow_filtering = true;
        self
    }

    /// Alias for [`Select::allow_filtering`].
    pub fn filter(self) -> Self {
        self.allow_filtering()
    }
}

impl Statement for Select {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn build_cql(&self) -> Rendered {
        let mut params = ParamList::new();

        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.to_string()
        };
        let mut cql = format!(
            "SELECT {} FROM {}",
            columns,
            self.table.as_deref().unwrap_or_default()
        );

        // WHERE
        if !self.where_clause.is_empty() {
            cql.push_str(" WHERE ");
            cql.push_str(&self.where_clause.build(&mut params));
        }

        // ORDER BY
        if !self.order.is_empty() {
            cql.push_str(" ORDER BY ");
            cql.push_str(&self.order.to_string());
        }

        // LIMIT
        if let Some(limit) = self.limit {
            cql.push_str(&format!(" LIMIT {}", limit));
        }

        if self.allow_filtering {
            cql.push_str(" ALLOW FILTERING");
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
            .or(self.order.build_error())
        {
            return Err(err.clone());
        }
        Ok(())
    }
}
