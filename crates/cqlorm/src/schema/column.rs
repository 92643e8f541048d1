//! Column descriptors and CQL type syntax.

use crate::schema::state::{OrderState, SelectState};
use std::borrow::Cow;
use std::fmt;

/// Collection kinds that support partial mutation (tuples are frozen).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Set,
    Map,
    Tuple,
}

impl CollectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKind::List => "list",
            CollectionKind::Set => "set",
            CollectionKind::Map => "map",
            CollectionKind::Tuple => "tuple",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The CQL type of a column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// A scalar such as `text` or `int`.
    Basic(Cow<'static, str>),
    /// `list<T>`, `set<T>`, `map<K, V>` or `frozen <tuple<...>>`.
    Collection {
        kind: CollectionKind,
        nested: Vec<Column>,
    },
    /// A user-defined type, always frozen.
    Custom(String),
}

impl ColumnType {
    pub fn basic(name: impl Into<Cow<'static, str>>) -> Self {
        ColumnType::Basic(name.into())
    }

    pub fn collection_kind(&self) -> Option<CollectionKind> {
        match self {
            ColumnType::Collection { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Basic(name) => f.write_str(name),
            ColumnType::Collection { kind, nested } => {
                let inner: Vec<String> = nested.iter().map(|c| c.ty.to_string()).collect();
                let ty = format!("{}<{}>", kind, inner.join(", "));
                // Tuples must be frozen.
                if *kind == CollectionKind::Tuple {
                    write!(f, "frozen <{}>", ty)
                } else {
                    f.write_str(&ty)
                }
            }
            ColumnType::Custom(name) => write!(f, "frozen <{}>", name),
        }
    }
}

/// Key role flags set while declaring a schema.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyRole {
    pub partition: bool,
    pub compound: bool,
}

impl KeyRole {
    pub fn is_key(&self) -> bool {
        self.partition || self.compound
    }
}

/// A column of a CQL table.
///
/// The name is optional so anonymous descriptors can describe the element
/// types of a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    name: Option<String>,
    ty: ColumnType,
    attrs: Vec<String>,
    key: KeyRole,
}

impl Column {
    pub fn new<'a>(name: impl Into<Option<&'a str>>, ty: ColumnType) -> Self {
        Self {
            name: name.into().map(str::to_string),
            ty,
            attrs: Vec::new(),
            key: KeyRole::default(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn ty(&self) -> &ColumnType {
        &self.ty
    }

    /// The CQL type string, e.g. `map<text, int>`.
    pub fn type_string(&self) -> String {
        self.ty.to_string()
    }

    pub fn collection_kind(&self) -> Option<CollectionKind> {
        self.ty.collection_kind()
    }

    pub fn attrs(&self) -> &[String] {
        &self.attrs
    }

    pub fn key(&self) -> KeyRole {
        self.key
    }

    /// Mark the column as (part of) the partition key.
    pub fn partition_key(mut self) -> Self {
        self.key.partition = true;
        self
    }

    /// Mark the column as a clustering key.
    pub fn compound_key(mut self) -> Self {
        self.key.compound = true;
        self
    }

    /// Add an attribute such as `static`. Stored upper-cased.
    pub fn add_attr(mut self, attr: &str) -> Self {
        self.attrs.push(attr.to_uppercase());
        self
    }

    /// `name type [ATTR...]`, as used in CREATE TABLE.
    pub fn entry(&self) -> String {
        let mut parts = Vec::with_capacity(2 + self.attrs.len());
        if let Some(name) = &self.name {
            parts.push(name.clone());
        }
        parts.push(self.type_string());
        parts.extend(self.attrs.iter().cloned());
        parts.join(" ")
    }

    // ==================== Select states ====================

    /// Start a selector for this column.
    pub fn select_state(&self) -> SelectState {
        SelectState::new(self)
    }

    /// `name as alias`
    pub fn as_alias(&self, alias: &str) -> SelectState {
        self.select_state().as_alias(alias)
    }

    /// `TTL(name)`
    pub fn ttl(&self) -> SelectState {
        self.select_state().ttl()
    }

    /// `COUNT(name)`
    pub fn count(&self) -> SelectState {
        self.select_state().count()
    }

    /// `WRITETIME(name)`
    pub fn write_time(&self) -> SelectState {
        self.select_state().write_time()
    }

    /// `DISTINCT name`
    pub fn distinct(&self) -> SelectState {
        self.select_state().distinct()
    }

    pub fn date_of(&self) -> SelectState {
        self.select_state().date_of()
    }

    pub fn min_timeuuid(&self) -> SelectState {
        self.select_state().min_timeuuid()
    }

    pub fn max_timeuuid(&self) -> SelectState {
        self.select_state().max_timeuuid()
    }

    pub fn unix_timestamp_of(&self) -> SelectState {
        self.select_state().unix_timestamp_of()
    }

    pub fn token(&self) -> SelectState {
        self.select_state().token()
    }

    /// `<type>AsBlob(name)`
    pub fn as_blob(&self) -> SelectState {
        self.select_state().as_blob()
    }

    /// `blobAs<Type>(name)`
    pub fn blob_as(&self, ty: &str) -> SelectState {
        self.select_state().blob_as(ty)
    }

    // ==================== Order states ====================

    /// `name ASC`
    pub fn asc(&self) -> OrderState {
        OrderState::new(self).asc()
    }

    /// `name DESC`
    pub fn desc(&self) -> OrderState {
        OrderState::new(self).desc()
    }
}
