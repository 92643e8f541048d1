//! Trait definitions for statement builders.

use crate::client::CqlClient;
use crate::error::CqlResult;
use crate::value::CqlValue;
use std::fmt;

/// The result of rendering a statement: text plus positional parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rendered {
    pub params: Vec<CqlValue>,
    pub cql: String,
}

impl Rendered {
    pub fn new(params: Vec<CqlValue>, cql: String) -> Self {
        Self { params, cql }
    }

    /// Statement text with no bound parameters.
    pub fn raw(cql: impl Into<String>) -> Self {
        Self {
            params: Vec::new(),
            cql: cql.into(),
        }
    }

    /// Split into `(parameters, text)`.
    pub fn into_parts(self) -> (Vec<CqlValue>, String) {
        (self.params, self.cql)
    }
}

/// Which statement a builder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    AlterTable,
    Truncate,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::AlterTable => "ALTER TABLE",
            StatementKind::Truncate => "TRUNCATE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base trait for all statement builders.
pub trait Statement: Sync {
    /// The kind of statement this builder produces.
    fn kind(&self) -> StatementKind;

    /// Build text and parameters without checking for composition errors.
    fn build_cql(&self) -> Rendered;

    /// Validate builder state before rendering.
    fn validate(&self) -> CqlResult<()> {
        Ok(())
    }

    /// Validate, then build. Nothing is produced for an invalid builder.
    fn render(&self) -> CqlResult<Rendered> {
        self.validate()?;
        Ok(self.build_cql())
    }

    /// Debug helper to get the statement text.
    fn to_cql(&self) -> String {
        self.build_cql().cql
    }

    /// Render and hand the statement to `conn` for execution.
    fn execute<C: CqlClient>(
        &self,
        conn: &C,
    ) -> impl std::future::Future<Output = CqlResult<C::Output>> + Send {
        async move {
            let rendered = self.render()?;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "cqlorm.cql",
                query_type = %self.kind(),
                param_count = rendered.params.len(),
                cql = %rendered.cql,
            );
            conn.execute(&rendered.cql, &rendered.params).await
        }
    }
}
