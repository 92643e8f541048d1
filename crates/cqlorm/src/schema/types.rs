//! Column constructors, one per CQL type.
//!
//! Every constructor takes an optional name so the same functions describe
//! both table columns and anonymous collection element types:
//!
//! ```ignore
//! use cqlorm::schema::types;
//!
//! let scores = types::map("high_scores", types::text(None), types::int(None));
//! assert_eq!(scores.entry(), "high_scores map<text, int>");
//! ```

use crate::schema::column::{CollectionKind, Column, ColumnType};

macro_rules! basic_types {
    ($($fn_name:ident => $cql:literal),* $(,)?) => {
        $(
            #[doc = concat!("A `", $cql, "` column.")]
            pub fn $fn_name<'a>(name: impl Into<Option<&'a str>>) -> Column {
                Column::new(name, ColumnType::basic($cql))
            }
        )*
    };
}

basic_types! {
    ascii => "ascii",
    bigint => "bigint",
    blob => "blob",
    boolean => "boolean",
    counter => "counter",
    decimal => "decimal",
    double => "double",
    float => "float",
    inet => "inet",
    int => "int",
    text => "text",
    timestamp => "timestamp",
    timeuuid => "timeuuid",
    uuid => "uuid",
    varchar => "varchar",
    varint => "varint",
}

fn collection<'a>(
    name: impl Into<Option<&'a str>>,
    kind: CollectionKind,
    nested: Vec<Column>,
) -> Column {
    Column::new(name, ColumnType::Collection { kind, nested })
}

/// `list<element>`
pub fn list<'a>(name: impl Into<Option<&'a str>>, element: Column) -> Column {
    collection(name, CollectionKind::List, vec![element])
}

/// `set<element>`
pub fn set<'a>(name: impl Into<Option<&'a str>>, element: Column) -> Column {
    collection(name, CollectionKind::Set, vec![element])
}

/// `map<key, value>`
pub fn map<'a>(name: impl Into<Option<&'a str>>, key: Column, value: Column) -> Column {
    collection(name, CollectionKind::Map, vec![key, value])
}

/// `frozen <tuple<...>>`
pub fn tuple<'a>(
    name: impl Into<Option<&'a str>>,
    elements: impl IntoIterator<Item = Column>,
) -> Column {
    collection(name, CollectionKind::Tuple, elements.into_iter().collect())
}

/// `frozen <type_name>`, for user-defined types.
pub fn custom<'a>(name: impl Into<Option<&'a str>>, type_name: &str) -> Column {
    Column::new(name, ColumnType::Custom(type_name.to_string()))
}
