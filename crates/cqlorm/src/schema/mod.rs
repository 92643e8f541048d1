//! Schema descriptors: columns, CQL types, tables and indexes.

mod column;
pub mod cson;
mod index;
mod state;
mod table;
pub mod types;

pub use column::{CollectionKind, Column, ColumnType, KeyRole};
pub use index::Index;
pub use state::{OrderState, SelectState};
pub use table::Table;

/// Anything that can name a table or column in a statement.
///
/// Builders accept a plain string or a descriptor interchangeably.
pub trait Nameable {
    /// The name, or `None` for an anonymous descriptor.
    fn cql_name(&self) -> Option<&str>;
}

impl Nameable for str {
    fn cql_name(&self) -> Option<&str> {
        Some(self)
    }
}

impl Nameable for String {
    fn cql_name(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl Nameable for Column {
    fn cql_name(&self) -> Option<&str> {
        self.name()
    }
}

impl Nameable for Table {
    fn cql_name(&self) -> Option<&str> {
        Some(self.name())
    }
}

impl<T: Nameable + ?Sized> Nameable for &T {
    fn cql_name(&self) -> Option<&str> {
        (**self).cql_name()
    }
}
