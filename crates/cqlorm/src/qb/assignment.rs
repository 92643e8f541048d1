//! SET fragment for UPDATE.

use crate::diff::{DiffOp, MutationTarget};
use crate::error::CqlError;
use crate::qb::param::ParamList;
use crate::qb::term::{Raw, Term};
use crate::schema::Nameable;
use crate::value::CqlValue;

/// The three shapes accepted by [`Assignment::set`].
#[derive(Clone, Debug, PartialEq)]
pub enum SetArgs {
    /// Inserted verbatim.
    Raw(String),
    /// `column = value`
    Simple(Option<String>, Term),
    /// `column [index] = value`
    Indexed(Option<String>, Term, Term),
}

impl From<Raw> for SetArgs {
    fn from(raw: Raw) -> Self {
        SetArgs::Raw(raw.into_string())
    }
}

impl<C: Nameable, V: Into<Term>> From<(C, V)> for SetArgs {
    fn from((column, value): (C, V)) -> Self {
        SetArgs::Simple(column.cql_name().map(str::to_string), value.into())
    }
}

impl<C: Nameable, I: Into<Term>, V: Into<Term>> From<(C, I, V)> for SetArgs {
    fn from((column, index, value): (C, I, V)) -> Self {
        SetArgs::Indexed(
            column.cql_name().map(str::to_string),
            index.into(),
            value.into(),
        )
    }
}

/// Comma-joined list of assignments with their collected parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    assignments: Vec<String>,
    params: ParamList,
    build_error: Option<CqlError>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// The first composition error recorded, if any.
    pub fn build_error(&self) -> Option<&CqlError> {
        self.build_error.as_ref()
    }

    fn column_name(&mut self, column: Option<String>) -> Option<String> {
        if column.is_none() && self.build_error.is_none() {
            self.build_error = Some(CqlError::malformed("cannot assign to an unnamed column"));
        }
        column
    }

    /// Add an assignment in any of the accepted shapes.
    pub fn set(&mut self, args: impl Into<SetArgs>) -> &mut Self {
        match args.into() {
            SetArgs::Raw(text) => self.assignments.push(text),
            SetArgs::Simple(column, value) => {
                if let Some(column) = self.column_name(column) {
                    let rhs = value.resolve(&mut self.params);
                    self.assignments.push(format!("{} = {}", column, rhs));
                }
            }
            SetArgs::Indexed(column, index, value) => {
                if let Some(column) = self.column_name(column) {
                    let idx = index.resolve(&mut self.params);
                    let rhs = value.resolve(&mut self.params);
                    self.assignments.push(format!("{} [{}] = {}", column, idx, rhs));
                }
            }
        }
        self
    }

    /// Add a raw assignment.
    pub fn set_raw(&mut self, assignment: Raw) -> &mut Self {
        self.set(assignment)
    }

    /// `column = value`
    pub fn set_simple(&mut self, column: impl Nameable, value: impl Into<Term>) -> &mut Self {
        self.set((column, value))
    }

    /// `column [index] = value`
    pub fn set_index(
        &mut self,
        column: impl Nameable,
        index: impl Into<Term>,
        value: impl Into<Term>,
    ) -> &mut Self {
        self.set((column, index, value))
    }

    fn push_self_referencing(&mut self, column: Option<String>, value: Term, template: Template) {
        let Some(column) = self.column_name(column) else {
            return;
        };
        let rhs = value.resolve(&mut self.params);
        let text = match template {
            Template::Add => format!("{0} = {0} + {1}", column, rhs),
            Template::Subtract => format!("{0} = {0} - {1}", column, rhs),
            Template::Prepend => format!("{0} = {1} + {0}", column, rhs),
        };
        self.assignments.push(text);
    }

    /// `column = column + value`
    pub fn add(&mut self, column: impl Nameable, value: impl Into<Term>) -> &mut Self {
        let name = column.cql_name().map(str::to_string);
        self.push_self_referencing(name, value.into(), Template::Add);
        self
    }

    /// `column = column - value`
    pub fn subtract(&mut self, column: impl Nameable, value: impl Into<Term>) -> &mut Self {
        let name = column.cql_name().map(str::to_string);
        self.push_self_referencing(name, value.into(), Template::Subtract);
        self
    }

    /// `column = value + column`
    pub fn prepend(&mut self, column: impl Nameable, value: impl Into<Term>) -> &mut Self {
        let name = column.cql_name().map(str::to_string);
        self.push_self_referencing(name, value.into(), Template::Prepend);
        self
    }

    /// Build the comma-joined text, splicing parameters onto `params`.
    pub fn build(&self, params: &mut ParamList) -> String {
        params.extend(&self.params);
        self.assignments.join(", ")
    }

    /// Render to `(parameters, text)`.
    pub fn render(&self) -> (Vec<CqlValue>, String) {
        let mut params = ParamList::new();
        let text = self.build(&mut params);
        (params.into_vec(), text)
    }
}

#[derive(Clone, Copy)]
enum Template {
    Add,
    Subtract,
    Prepend,
}

impl MutationTarget for Assignment {
    fn apply(&mut self, op: DiffOp) {
        match op {
            DiffOp::Replace { column, value } => {
                self.set_simple(column, value);
            }
            DiffOp::Add { column, value } => {
                self.add(column, value);
            }
            DiffOp::Subtract { column, value } => {
                self.subtract(column, value);
            }
            DiffOp::Prepend { column, value } => {
                self.prepend(column, value);
            }
        }
    }
}
