//! ALTER TABLE statement builder.

use crate::error::{CqlError, CqlResult};
use crate::qb::traits::{Rendered, Statement, StatementKind};
use crate::schema::{Column, Nameable, cson};

/// The single change an ALTER TABLE statement applies.
#[derive(Clone, Debug, PartialEq)]
pub enum AlterOperation {
    /// `ALTER column TYPE type`
    AlterType { column: String, ty: String },
    /// `ADD column type`
    Add { column: String, ty: String },
    /// `DROP column`
    Drop { column: String },
    /// `RENAME from TO to`
    Rename { from: String, to: String },
    /// `WITH k = v AND ...`, values already encoded.
    With(Vec<(String, String)>),
}

impl AlterOperation {
    fn render(&self) -> String {
        match self {
            AlterOperation::AlterType { column, ty } => format!("ALTER {} TYPE {}", column, ty),
            AlterOperation::Add { column, ty } => format!("ADD {} {}", column, ty),
            AlterOperation::Drop { column } => format!("DROP {}", column),
            AlterOperation::Rename { from, to } => format!("RENAME {} TO {}", from, to),
            AlterOperation::With(properties) => {
                let parts: Vec<String> = properties
                    .iter()
                    .map(|(k, v)| format!("{} = {}", k, v))
                    .collect();
                format!("WITH {}", parts.join(" AND "))
            }
        }
    }
}

/// ALTER TABLE statement builder. Setting an operation replaces any earlier one.
#[derive(Clone, Debug, Default)]
pub struct AlterTable {
    table: Option<String>,
    operation: Option<AlterOperation>,
    build_error: Option<CqlError>,
}

impl AlterTable {
    /// Create an empty ALTER TABLE builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table to alter.
    pub fn table(mut self, table: impl Nameable) -> Self {
        self.table = table.cql_name().map(str::to_string);
        self
    }

    fn column_name(&mut self, column: &impl Nameable) -> String {
        match column.cql_name() {
            Some(name) => name.to_string(),
            None => {
                if self.build_error.is_none() {
                    self.build_error = Some(CqlError::malformed(
                        "ALTER TABLE needs a named column",
                    ));
                }
                String::new()
            }
        }
    }

    /// Change a column's type.
    pub fn alter_type(mut self, column: impl Nameable, ty: &str) -> Self {
        let column = self.column_name(&column);
        self.operation = Some(AlterOperation::AlterType {
            column,
            ty: ty.to_string(),
        });
        self
    }

    /// Change a column's type to the one declared on `column`.
    pub fn alter_column_type(self, column: &Column) -> Self {
        let ty = column.type_string();
        self.alter_type(column, &ty)
    }

    /// Add a column by name and type.
    pub fn add(mut self, column: impl Nameable, ty: &str) -> Self {
        let column = self.column_name(&column);
        self.operation = Some(AlterOperation::Add {
            column,
            ty: ty.to_string(),
        });
        self
    }

    /// Add a column from its descriptor.
    pub fn add_column(self, column: &Column) -> Self {
        let ty = column.type_string();
        self.add(column, &ty)
    }

    /// Drop a column.
    pub fn drop(mut self, column: impl Nameable) -> Self {
        let column = self.column_name(&column);
        self.operation = Some(AlterOperation::Drop { column });
        self
    }

    /// Rename a column.
    pub fn rename(mut self, from: &str, to: &str) -> Self {
        self.operation = Some(AlterOperation::Rename {
            from: from.to_string(),
            to: to.to_string(),
        });
        self
    }

    /// Set table properties, in the given order.
    pub fn with_properties<K, V>(mut self, properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        let encoded = properties
            .into_iter()
            .map(|(k, v)| (k.into(), cson::encode(&v.into())))
            .collect();
        self.operation = Some(AlterOperation::With(encoded));
        self
    }

    pub fn operation(&self) -> Option<&AlterOperation> {
        self.operation.as_ref()
    }
}

impl Statement for AlterTable {
    fn kind(&self) -> StatementKind {
        StatementKind::AlterTable
    }

    fn build_cql(&self) -> Rendered {
        let mut cql = format!("ALTER TABLE {}", self.table.as_deref().unwrap_or_default());
        if let Some(operation) = &self.operation {
            cql.push(' ');
            cql.push_str(&operation.render());
        }
        cql.push(';');
        Rendered::raw(cql)
    }

    fn validate(&self) -> CqlResult<()> {
        if self.table.as_deref().is_none_or(str::is_empty) {
            return Err(CqlError::missing("table"));
        }
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        if self.operation.is_none() {
            return Err(CqlError::missing("operation"));
        }
        Ok(())
    }
}
