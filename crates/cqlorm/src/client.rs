//! Execution seam between statement builders and a CQL driver.
//!
//! cqlorm never talks to the network itself. A driver binding implements
//! [`CqlClient`] and receives fully rendered text with positional values.

use crate::error::{CqlError, CqlResult};
use crate::qb::{Rendered, Statement};
use crate::value::CqlValue;

/// A trait implemented by driver sessions (or test fakes).
///
/// Statements render themselves and call [`CqlClient::execute`] from
/// [`Statement::execute`], so repository code can stay generic over the
/// session type.
pub trait CqlClient: Send + Sync {
    /// Whatever the driver returns for an executed statement (rows, a
    /// result set handle, `()`).
    type Output: Send;

    /// Execute one statement with its bound values.
    fn execute(
        &self,
        cql: &str,
        params: &[CqlValue],
    ) -> impl std::future::Future<Output = CqlResult<Self::Output>> + Send;

    /// Execute a group of statements as one logged batch.
    ///
    /// The default implementation runs them one by one, stopping at the
    /// first failure.
    fn batch(
        &self,
        statements: &[Rendered],
    ) -> impl std::future::Future<Output = CqlResult<()>> + Send {
        async move {
            for statement in statements {
                self.execute(&statement.cql, &statement.params).await?;
            }
            Ok(())
        }
    }
}

impl<C: CqlClient + ?Sized> CqlClient for &C {
    type Output = C::Output;

    fn execute(
        &self,
        cql: &str,
        params: &[CqlValue],
    ) -> impl std::future::Future<Output = CqlResult<Self::Output>> + Send {
        (**self).execute(cql, params)
    }

    fn batch(
        &self,
        statements: &[Rendered],
    ) -> impl std::future::Future<Output = CqlResult<()>> + Send {
        (**self).batch(statements)
    }
}

/// Rendered statements collected for a driver's batch call.
///
/// Statements are validated as they are added, so a batch never holds a
/// half-built statement.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    statements: Vec<Rendered>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render and append a statement.
    pub fn add(&mut self, statement: &impl Statement) -> CqlResult<&mut Self> {
        let rendered = statement.render()?;
        self.statements.push(rendered);
        Ok(self)
    }

    /// Append statement text with no bound values.
    pub fn add_raw(&mut self, cql: impl Into<String>) -> &mut Self {
        self.statements.push(Rendered::raw(cql));
        self
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[Rendered] {
        &self.statements
    }

    /// Hand every collected statement to `conn` in one batch call.
    pub async fn execute<C: CqlClient>(&self, conn: &C) -> CqlResult<()> {
        if self.statements.is_empty() {
            return Err(CqlError::missing("statements"));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "cqlorm.cql",
            query_type = "BATCH",
            statement_count = self.statements.len(),
            param_count = self.statements.iter().map(|s| s.params.len()).sum::<usize>(),
        );
        conn.batch(&self.statements).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb;

    #[test]
    fn test_batch_collects_rendered_statements() {
        let mut batch = Batch::new();
        batch
            .add(&qb::insert("t").value("a", 1))
            .unwrap()
            .add_raw("TRUNCATE u;");
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.statements()[0].cql, "INSERT INTO t (a) VALUES (?);");
        assert_eq!(batch.statements()[0].params, vec![CqlValue::Int(1)]);
        assert!(batch.statements()[1].params.is_empty());
    }

    #[test]
    fn test_batch_rejects_invalid_statement() {
        let mut batch = Batch::new();
        let err = batch.add(&qb::update("t").and_eq("id", 1)).unwrap_err();
        assert_eq!(err, CqlError::missing("assignments"));
        assert!(batch.is_empty());
    }
}
