//! Parenthesized term lists: `VALUES (...)` and tuple comparisons.

use crate::qb::param::ParamList;
use crate::qb::term::Term;
use crate::value::CqlValue;

/// An ordered list of terms rendered as `(t1, t2, ...)`.
///
/// Nested tuples are rendered recursively and their parameters are spliced in
/// at the point of use, so placeholder order always matches parameter order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TermTuple {
    terms: Vec<Term>,
}

impl TermTuple {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Append a term.
    pub fn with(mut self, term: impl Into<Term>) -> Self {
        self.terms.push(term.into());
        self
    }

    /// Replace all terms.
    pub fn set_terms<I>(&mut self, terms: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        self.terms = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn push(&mut self, term: impl Into<Term>) -> &mut Self {
        self.terms.push(term.into());
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Build the parenthesized text, collecting bound values into `params`.
    ///
    /// The output is always wrapped in parens, even for a single element.
    pub fn build(&self, params: &mut ParamList) -> String {
        let parts: Vec<String> = self.terms.iter().map(|t| t.resolve(params)).collect();
        format!("({})", parts.join(", "))
    }

    /// Render to `(parameters, text)`.
    pub fn render(&self) -> (Vec<CqlValue>, String) {
        let mut params = ParamList::new();
        let text = self.build(&mut params);
        (params.into_vec(), text)
    }
}

impl<T: Into<Term>> FromIterator<T> for TermTuple {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<Term>> for TermTuple {
    fn from(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}
