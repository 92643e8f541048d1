//! IF fragment for lightweight transactions.

use crate::qb::param::ParamList;
use crate::qb::term::Term;
use crate::value::CqlValue;

/// `key = value` conditions joined with `AND`.
///
/// Setting a key twice overwrites the earlier value in place; the key keeps
/// its original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conditionals {
    conditions: Vec<(String, Condition)>,
}

#[derive(Clone, Debug, PartialEq)]
enum Condition {
    Equals(Term),
    Exists,
}

impl Conditionals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn upsert(&mut self, key: String, condition: Condition) {
        match self.conditions.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = condition,
            None => self.conditions.push((key, condition)),
        }
    }

    /// Add or replace `key = value`.
    pub fn when(&mut self, key: impl Into<String>, value: impl Into<Term>) -> &mut Self {
        self.upsert(key.into(), Condition::Equals(value.into()));
        self
    }

    /// Add or replace an `EXISTS key` check.
    pub fn when_exists(&mut self, key: impl Into<String>) -> &mut Self {
        self.upsert(key.into(), Condition::Exists);
        self
    }

    /// Build the condition text, pushing bound values onto `params`.
    pub fn build(&self, params: &mut ParamList) -> String {
        let parts: Vec<String> = self
            .conditions
            .iter()
            .map(|(key, condition)| match condition {
                Condition::Equals(term) => format!("{} = {}", key, term.resolve(params)),
                Condition::Exists => format!("EXISTS {}", key),
            })
            .collect();
        parts.join(" AND ")
    }

    /// Render to `(parameters, text)`.
    pub fn render(&self) -> (Vec<CqlValue>, String) {
        let mut params = ParamList::new();
        let text = self.build(&mut params);
        (params.into_vec(), text)
    }
}
