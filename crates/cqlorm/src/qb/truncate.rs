//! TRUNCATE statement builder.

use crate::error::{CqlError, CqlResult};
use crate::qb::traits::{Rendered, Statement, StatementKind};
use crate::schema::Nameable;

/// TRUNCATE statement builder.
#[derive(Clone, Debug, Default)]
pub struct Truncate {
    table: Option<String>,
}

impl Truncate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table to truncate.
    pub fn table(mut self, table: impl Nameable) -> Self {
        self.table = table.cql_name().map(str::to_string);
        self
    }
}

impl Statement for Truncate {
    fn kind(&self) -> StatementKind {
        StatementKind::Truncate
    }

    fn build_cql(&self) -> Rendered {
        Rendered::raw(format!(
            "TRUNCATE {};",
            self.table.as_deref().unwrap_or_default()
        ))
    }

    fn validate(&self) -> CqlResult<()> {
        if self.table.as_deref().is_none_or(str::is_empty) {
            return Err(CqlError::missing("table"));
        }
        Ok(())
    }
}
