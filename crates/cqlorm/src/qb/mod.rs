//! Statement builders for CQL.
//!
//! Every statement is assembled from small clause fragments (columns, WHERE,
//! ORDER BY, SET, IF, USING, term tuples) that each own their text and their
//! bound parameters. A builder concatenates the non-empty fragments in a fixed
//! order and returns the text together with its positional parameters.
//!
//! # Features
//!
//! - **Raw vs. bound terms**: values become `?` placeholders unless wrapped in
//!   [`raw`]; `None`/`NULL` is always inlined
//! - **Ordered parameters**: nested groups and tuples splice their parameters
//!   in place, so parameter order always matches placeholder order
//! - **Fail before text**: composition errors surface from `render()` and
//!   nothing is produced
//!
//! # Usage
//!
//! ```ignore
//! use cqlorm::qb::{self, Statement};
//!
//! let rendered = qb::select("users")
//!     .columns(["id", "name"])
//!     .and_where("id", "=", user_id)
//!     .limit(1)
//!     .render()?;
//!
//! qb::update("users")
//!     .set(("name", "alice"))
//!     .and_eq("id", user_id)
//!     .execute(&client)
//!     .await?;
//! ```

mod alter_table;
mod assignment;
mod columns;
mod conditionals;
mod delete;
mod insert;
mod options;
mod order;
mod param;
mod select;
mod term;
mod traits;
mod truncate;
mod tuple;
mod update;
mod where_clause;


pub use alter_table::{AlterOperation, AlterTable};
pub use assignment::{Assignment, SetArgs};
pub use columns::{ColumnExpr, Columns};
pub use conditionals::Conditionals;
pub use delete::Delete;
pub use insert::Insert;
pub use options::Options;
pub use order::Order;
pub use param::ParamList;
pub use select::Select;
pub use term::{Raw, Term, raw};
pub use traits::{Rendered, Statement, StatementKind};
pub use truncate::Truncate;
pub use tuple::TermTuple;
pub use update::Update;
pub use where_clause::{Where, WhereColumn};

use crate::schema::Nameable;

/// Create a SELECT builder for the given table.
///
/// # Example
/// ```ignore
/// let q = cqlorm::qb::select("users").and_eq("id", 1);
/// ```
pub fn select(table: impl Nameable) -> Select {
    Select::new().from(table)
}

/// Create an INSERT builder for the given table.
pub fn insert(table: impl Nameable) -> Insert {
    Insert::new().into_table(table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: impl Nameable) -> Update {
    Update::new().table(table)
}

/// Create a DELETE builder for the given table.
pub fn delete(table: impl Nameable) -> Delete {
    Delete::new().from(table)
}

/// Create an ALTER TABLE builder for the given table.
pub fn alter_table(table: impl Nameable) -> AlterTable {
    AlterTable::new().table(table)
}

/// Create a TRUNCATE builder for the given table.
pub fn truncate(table: impl Nameable) -> Truncate {
    Truncate::new().table(table)
}
