//! UPDATE statement builder.

use crate::diff::{DiffOp, MutationTarget};
use crate::error::{CqlError, CqlResult};
use crate::qb::assignment::{Assignment, SetArgs};
use crate::qb::conditionals::Conditionals;
use crate::qb::options::Options;
use crate::qb::param::ParamList;
use crate::qb::term::{Raw, Term};
use crate::qb::traits::{Rendered, Statement, StatementKind};
use crate::qb::where_clause::{Where, where_forwarding};
use crate::schema::Nameable;

/// UPDATE statement builder.
///
/// The builder renders without a WHERE clause if none was given; requiring a
/// primary key predicate is the caller's decision.
#[derive(Clone, Debug, Default)]
pub struct Update {
    /// Target table
    table: Option<String>,
    /// USING options
    options: Options,
    /// SET assignments
    assignment: Assignment,
    /// WHERE predicates
    where_clause: Where,
    /// IF conditions
    conditionals: Conditionals,
}

impl Update {
    /// Create an empty UPDATE builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target table.
    pub fn table(mut self, table: impl Nameable) -> Self {
        self.table = table.cql_name().map(str::to_string);
        self
    }

    // ==================== SET ====================

    /// Add an assignment: raw text, `(column, value)` or `(column, index, value)`.
    pub fn set(mut self, args: impl Into<SetArgs>) -> Self {
        self.assignment.set(args);
        self
    }

    /// Add a raw assignment.
    pub fn set_raw(mut self, assignment: Raw) -> Self {
        self.assignment.set_raw(assignment);
        self
    }

    /// `column = value`
    pub fn set_simple(mut self, column: impl Nameable, value: impl Into<Term>) -> Self {
        self.assignment.set_simple(column, value);
        self
    }

    /// `column [index] = value`
    pub fn set_index(
        mut self,
        column: impl Nameable,
        index: impl Into<Term>,
        value: impl Into<Term>,
    ) -> Self {
        self.assignment.set_index(column, index, value);
        self
    }

    /// `column = column + value`
    pub fn add(mut self, column: impl Nameable, value: impl Into<Term>) -> Self {
        self.assignment.add(column, value);
        self
    }

    /// `column = column - value`
    pub fn subtract(mut self, column: impl Nameable, value: impl Into<Term>) -> Self {
        self.assignment.subtract(column, value);
        self
    }

    /// `column = value + column`
    pub fn prepend(mut self, column: impl Nameable, value: impl Into<Term>) -> Self {
        self.assignment.prepend(column, value);
        self
    }

    /// The SET fragment, for callers that populate it in place.
    pub fn assignment_mut(&mut self) -> &mut Assignment {
        &mut self.assignment
    }

    /// Check if any assignments have been added.
    pub fn has_assignments(&self) -> bool {
        !self.assignment.is_empty()
    }

    // ==================== WHERE / IF / USING ====================

    where_forwarding!();

    /// Add `IF key = value`.
    pub fn when(mut self, key: impl Into<String>, value: impl Into<Term>) -> Self {
        self.conditionals.when(key, value);
        self
    }

    /// Add `IF EXISTS key`.
    pub fn when_exists(mut self, key: impl Into<String>) -> Self {
        self.conditionals.when_exists(key);
        self
    }

    /// `USING TTL n`
    pub fn ttl(mut self, seconds: u32) -> Self {
        self.options.ttl(seconds);
        self
    }

    /// `USING TIMESTAMP n`
    pub fn timestamp(mut self, micros: i64) -> Self {
        self.options.timestamp(micros);
        self
    }
}

impl MutationTarget for Update {
    fn apply(&mut self, op: DiffOp) {
        self.assignment.apply(op);
    }
}

impl Statement for Update {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn build_cql(&self) -> Rendered {
        let mut params = ParamList::new();
        let mut cql = format!("UPDATE {}", self.table.as_deref().unwrap_or_default());

        // USING
        if !self.options.is_empty() {
            cql.push_str(" USING ");
            cql.push_str(&self.options.to_string());
        }

        // SET
        if !self.assignment.is_empty() {
            cql.push_str(" SET ");
            cql.push_str(&self.assignment.build(&mut params));
        }

        // WHERE
        if !self.where_clause.is_empty() {
            cql.push_str(" WHERE ");
            cql.push_str(&self.where_clause.build(&mut params));
        }

        // IF
        if !self.conditionals.is_empty() {
            cql.push_str(" IF ");
            cql.push_str(&self.conditionals.build(&mut params));
        }

        cql.push(';');
        Rendered::new(params.into_vec(), cql)
    }

    fn validate(&self) -> CqlResult<()> {
        if self.table.as_deref().is_none_or(str::is_empty) {
            return Err(CqlError::missing("table"));
        }
        if let Some(err) = self.assignment.build_error() {
            return Err(err.clone());
        }
        if self.assignment.is_empty() {
            return Err(CqlError::missing("assignments"));
        }
        if let Some(err) = self.where_clause.build_error() {
            return Err(err.clone());
        }
        Ok(())
    }
}
