//! Ordered parameter storage for rendered statements.

use crate::value::CqlValue;

/// Bound parameters in placeholder order.
///
/// Every `?` written into statement text has exactly one entry here, at the
/// same left-to-right position. Fragments splice their lists into the
/// statement's list in the order the fragments appear in the text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamList {
    params: Vec<CqlValue>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a parameter and return its 1-based position.
    pub fn push(&mut self, value: CqlValue) -> usize {
        self.params.push(value);
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Extend this list with another list's parameters.
    pub fn extend(&mut self, other: &ParamList) {
        self.params.extend(other.params.iter().cloned());
    }

    /// Move another list's parameters onto the end of this one.
    pub fn append(&mut self, mut other: ParamList) {
        self.params.append(&mut other.params);
    }

    pub fn as_slice(&self) -> &[CqlValue] {
        &self.params
    }

    pub fn into_vec(self) -> Vec<CqlValue> {
        self.params
    }

    /// Clear all parameters.
    pub fn clear(&mut self) {
        self.params.clear();
    }
}

impl From<ParamList> for Vec<CqlValue> {
    fn from(list: ParamList) -> Self {
        list.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_position() {
        let mut params = ParamList::new();
        assert_eq!(params.push(CqlValue::Int(1)), 1);
        assert_eq!(params.push(CqlValue::Int(2)), 2);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut a = ParamList::new();
        a.push(CqlValue::Int(1));
        let mut b = ParamList::new();
        b.push(CqlValue::Int(2));
        b.push(CqlValue::Int(3));
        a.append(b);
        assert_eq!(
            a.into_vec(),
            vec![CqlValue::Int(1), CqlValue::Int(2), CqlValue::Int(3)]
        );
    }
}
