//! # cqlorm
//!
//! A parameter-safe CQL statement builder with minimal collection diffing.
//!
//! ## Features
//!
//! - **Values never inlined**: every value becomes a `?` placeholder and a
//!   positional parameter, unless explicitly wrapped in [`qb::raw`]
//! - **Composable fragments**: WHERE groups, column tuples, SET, IF and USING
//!   clauses are built independently and spliced in placeholder order
//! - **Incremental writes**: [`diff`] turns an old/new pair of column values
//!   into `+`/`-`/prepend mutations when that is safe, and a full replace
//!   otherwise
//! - **Schema descriptors**: typed columns, CREATE TABLE and CREATE INDEX
//!   rendering
//! - **Driver-agnostic**: execution goes through the [`CqlClient`] trait
//!
//! ## Query Builder (qb)
//!
//! ```ignore
//! use cqlorm::qb::{self, Statement};
//!
//! // SELECT
//! let rendered = qb::select("users")
//!     .columns(["id", "name"])
//!     .and_where("id", "=", user_id)
//!     .limit(1)
//!     .render()?;
//!
//! // UPDATE with a conditional write
//! qb::update("users")
//!     .set(("name", "alice"))
//!     .and_eq("id", user_id)
//!     .when("version", 3)
//!     .execute(&session)
//!     .await?;
//! ```
//!
//! ## Diffing
//!
//! ```ignore
//! use cqlorm::{diff::diff_record, qb::Statement};
//!
//! let mut update = users.update().and_eq("id", user_id);
//! diff_record(&mut update, &users, &before, &after)?;
//! if update.has_assignments() {
//!     update.execute(&session).await?;
//! }
//! ```

pub mod client;
pub mod diff;
pub mod error;
pub mod qb;
pub mod schema;
pub mod value;

pub use client::{Batch, CqlClient};
pub use diff::{DiffOp, DiffOptions, MutationTarget, diff, diff_record, diff_with};
pub use error::{CqlError, CqlResult};
pub use schema::{Column, Index, Nameable, Table, types};
pub use value::CqlValue;

// Re-export qb module for easy access
pub use qb::{
    AlterTable, Delete, Insert, Rendered, Select, Statement, StatementKind, Truncate, Update,
    alter_table, delete, insert, raw, select, truncate, update,
};
