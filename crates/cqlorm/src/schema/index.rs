//! Secondary index declarations.

use crate::error::{CqlError, CqlResult};
use crate::schema::Nameable;
use crate::schema::cson;

/// A `CREATE INDEX` declaration on one column.
#[derive(Clone, Debug, PartialEq)]
pub struct Index {
    name: Option<String>,
    column: String,
    using: Option<String>,
    options: Option<serde_json::Value>,
}

impl Index {
    /// Index `column`, letting the server choose the index name.
    pub fn on(column: impl Nameable) -> Self {
        Self {
            name: None,
            column: column.cql_name().unwrap_or_default().to_string(),
            using: None,
            options: None,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Custom index implementation class.
    pub fn using(mut self, class_name: &str) -> Self {
        self.using = Some(class_name.to_string());
        self
    }

    pub fn options(mut self, options: impl Into<serde_json::Value>) -> Self {
        self.options = Some(options.into());
        self
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Render the statement against `table`.
    pub fn to_cql(&self, table: impl Nameable) -> CqlResult<String> {
        let table = table
            .cql_name()
            .filter(|t| !t.is_empty())
            .ok_or(CqlError::missing("table"))?;
        if self.column.is_empty() {
            return Err(CqlError::malformed("cannot index an unnamed column"));
        }

        let mut cql = String::from("CREATE INDEX");
        if let Some(name) = &self.name {
            cql.push(' ');
            cql.push_str(name);
        }
        cql.push_str(&format!(" ON {} ({})", table, self.column));
        if let Some(class_name) = &self.using {
            cql.push_str(&format!(" USING {}", cson::quote(class_name)));
        }
        if let Some(options) = &self.options {
            cql.push_str(" WITH OPTIONS = ");
            cql.push_str(&cson::encode(options));
        }
        cql.push(';');
        Ok(cql)
    }
}
