//! Terms: values destined for statement text.
//!
//! A [`Term`] is either written into the text verbatim ([`Term::Raw`],
//! [`Term::Null`]), replaced by a `?` placeholder with its value collected
//! into the parameter list ([`Term::Bound`]), or rendered recursively with
//! its own parameters spliced in place ([`Term::Tuple`]).

use crate::qb::param::ParamList;
use crate::qb::tuple::TermTuple;
use crate::value::CqlValue;
use chrono::{DateTime, Utc};
use std::fmt;
use std::net::IpAddr;
use uuid::Uuid;

/// Literal CQL text that is never parameterized.
///
/// # Example
/// ```ignore
/// use cqlorm::qb::{raw, Select};
///
/// let q = Select::new().from("events").and_where("ts", ">", raw("now()"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raw(String);

/// Wrap text so it is inserted verbatim.
pub fn raw(text: impl Into<String>) -> Raw {
    Raw::new(text)
}

impl Raw {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value destined for a statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    /// The `NULL` literal.
    Null,
    /// Inserted verbatim.
    Raw(String),
    /// Replaced by `?`, value collected positionally.
    Bound(CqlValue),
    /// Parenthesized nested terms.
    Tuple(TermTuple),
}

impl Term {
    /// Resolve this term into its text, pushing any bound values onto `params`.
    pub fn resolve(&self, params: &mut ParamList) -> String {
        match self {
            Term::Null => "NULL".to_string(),
            Term::Raw(text) => text.clone(),
            Term::Bound(value) => {
                params.push(value.clone());
                "?".to_string()
            }
            Term::Tuple(tuple) => tuple.build(params),
        }
    }

    /// Number of components when compared against a column tuple.
    pub(crate) fn arity(&self) -> Option<usize> {
        match self {
            Term::Tuple(tuple) => Some(tuple.len()),
            Term::Bound(CqlValue::Tuple(items)) => Some(items.len()),
            _ => None,
        }
    }
}

impl From<Raw> for Term {
    fn from(raw: Raw) -> Self {
        Term::Raw(raw.0)
    }
}

impl From<TermTuple> for Term {
    fn from(tuple: TermTuple) -> Self {
        Term::Tuple(tuple)
    }
}

impl From<CqlValue> for Term {
    fn from(value: CqlValue) -> Self {
        if value.is_null() {
            Term::Null
        } else {
            Term::Bound(value)
        }
    }
}

impl<T: Into<Term>> From<Option<T>> for Term {
    fn from(value: Option<T>) -> Self {
        value.map_or(Term::Null, Into::into)
    }
}

impl<T: Into<CqlValue>> From<Vec<T>> for Term {
    fn from(values: Vec<T>) -> Self {
        Term::Bound(CqlValue::list(values))
    }
}

macro_rules! impl_term_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Term {
                fn from(value: $ty) -> Self {
                    Term::Bound(CqlValue::from(value))
                }
            }
        )*
    };
}

impl_term_from_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    f32,
    f64,
    String,
    &str,
    &String,
    Uuid,
    DateTime<Utc>,
    IpAddr,
);

#[cfg(feature = "rust_decimal")]
impl_term_from_value!(rust_decimal::Decimal);
