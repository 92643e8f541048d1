//! Bound CQL values.
//!
//! [`CqlValue`] is what ends up in a rendered statement's parameter list. It is
//! deliberately driver-agnostic: the execution layer converts it into whatever
//! its wire protocol binds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::net::IpAddr;
use uuid::Uuid;

/// A value bound positionally to a `?` placeholder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CqlValue {
    /// Absence of a value.
    #[default]
    Null,
    Boolean(bool),
    Int(i32),
    BigInt(i64),
    Double(f64),
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Blob(Vec<u8>),
    Inet(IpAddr),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
    List(Vec<CqlValue>),
    Set(Vec<CqlValue>),
    /// Key/value pairs. Equality ignores entry order.
    Map(Vec<(CqlValue, CqlValue)>),
    Tuple(Vec<CqlValue>),
}

impl CqlValue {
    /// Build a `set<...>` value.
    pub fn set<T: Into<CqlValue>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Build a `list<...>` value.
    pub fn list<T: Into<CqlValue>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a `map<...>` value, keeping the given entry order.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<CqlValue>,
        V: Into<CqlValue>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a `tuple<...>` value.
    pub fn tuple(items: impl IntoIterator<Item = CqlValue>) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    /// Build a `blob` value.
    pub fn blob(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Blob(bytes.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, Self::Timestamp(_))
    }

    /// Elements of a list, set or tuple.
    pub fn elements(&self) -> Option<&[CqlValue]> {
        match self {
            Self::List(items) | Self::Set(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Entries of a map.
    pub fn entries(&self) -> Option<&[(CqlValue, CqlValue)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Int(_) => "int",
            Self::BigInt(_) => "bigint",
            Self::Double(_) => "double",
            Self::Text(_) => "text",
            Self::Uuid(_) => "uuid",
            Self::Timestamp(_) => "timestamp",
            Self::Blob(_) => "blob",
            Self::Inet(_) => "inet",
            #[cfg(feature = "rust_decimal")]
            Self::Decimal(_) => "decimal",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Tuple(_) => "tuple",
        }
    }
}

fn map_entries_eq(a: &[(CqlValue, CqlValue)], b: &[(CqlValue, CqlValue)]) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(k, v)| b.iter().any(|(bk, bv)| bk == k && bv == v))
}

impl PartialEq for CqlValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Uuid(a), Self::Uuid(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Blob(a), Self::Blob(b)) => a == b,
            (Self::Inet(a), Self::Inet(b)) => a == b,
            #[cfg(feature = "rust_decimal")]
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::List(a), Self::List(b))
            | (Self::Set(a), Self::Set(b))
            | (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => map_entries_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for CqlValue {
                fn from(value: $ty) -> Self {
                    CqlValue::$variant(value.into())
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Boolean,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => BigInt,
    f32 => Double,
    f64 => Double,
    String => Text,
    &str => Text,
    Uuid => Uuid,
    DateTime<Utc> => Timestamp,
    IpAddr => Inet,
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for CqlValue {
    fn from(value: rust_decimal::Decimal) -> Self {
        CqlValue::Decimal(value)
    }
}

impl From<&String> for CqlValue {
    fn from(value: &String) -> Self {
        CqlValue::Text(value.clone())
    }
}

impl<T: Into<CqlValue>> From<Option<T>> for CqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CqlValue::Null, Into::into)
    }
}

impl<T: Into<CqlValue>> From<Vec<T>> for CqlValue {
    fn from(value: Vec<T>) -> Self {
        CqlValue::list(value)
    }
}

impl<T: Into<CqlValue>> From<BTreeSet<T>> for CqlValue {
    fn from(value: BTreeSet<T>) -> Self {
        CqlValue::set(value)
    }
}

impl<K: Into<CqlValue>, V: Into<CqlValue>> From<BTreeMap<K, V>> for CqlValue {
    fn from(value: BTreeMap<K, V>) -> Self {
        CqlValue::map(value)
    }
}

impl<K: Into<CqlValue>, V: Into<CqlValue>, S> From<HashMap<K, V, S>> for CqlValue {
    fn from(value: HashMap<K, V, S>) -> Self {
        CqlValue::map(value)
    }
}
