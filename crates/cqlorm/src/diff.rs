//! Incremental column diffs.
//!
//! [`diff`] compares a column's last-known value with its current value and
//! emits the smallest set of mutations that reconciles them: nothing when
//! they are equal, a patch (`+`/`-` on collections) when that is safe and
//! cheap, and a full replace otherwise.
//!
//! Lists are handled conservatively. Cassandra removes list elements by
//! value and has no stable positions under concurrent writers, so a patch
//! is only produced when edits are confined to the head and tail and every
//! removed value is removed in all of its occurrences. Anything else is
//! rewritten.
//!
//! # Example
//!
//! ```ignore
//! use cqlorm::diff::diff;
//! use cqlorm::schema::{types, Table};
//! use cqlorm::value::CqlValue;
//!
//! let tags = types::set("tags", types::text(None));
//! let mut update = Table::new("posts").update().and_eq("id", 1);
//! diff(&mut update, &tags, &CqlValue::set(["a", "b"]), &CqlValue::set(["a", "b", "c"]))?;
//! // UPDATE posts SET tags = tags + ? WHERE id = ?;
//! ```

use crate::error::{CqlError, CqlResult};
use crate::schema::{CollectionKind, Column, Table};
use crate::value::CqlValue;
use std::collections::BTreeMap;

macro_rules! diff_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "cqlorm.diff", $($arg)*);
    };
}

/// One mutation produced by the diff engine.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffOp {
    /// `column = value`
    Replace { column: String, value: CqlValue },
    /// `column = column + value`
    Add { column: String, value: CqlValue },
    /// `column = column - value`
    Subtract { column: String, value: CqlValue },
    /// `column = value + column`
    Prepend { column: String, value: CqlValue },
}

impl DiffOp {
    pub fn column(&self) -> &str {
        match self {
            DiffOp::Replace { column, .. }
            | DiffOp::Add { column, .. }
            | DiffOp::Subtract { column, .. }
            | DiffOp::Prepend { column, .. } => column,
        }
    }
}

/// Receiver for diff operations, typically an UPDATE's SET fragment.
pub trait MutationTarget {
    fn apply(&mut self, op: DiffOp);
}

impl MutationTarget for Vec<DiffOp> {
    fn apply(&mut self, op: DiffOp) {
        self.push(op);
    }
}

/// Diff engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffOptions {
    /// Rewrite a collection instead of patching it once the number of
    /// changed elements exceeds this fraction of the old length.
    pub rewrite_threshold: f64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            rewrite_threshold: 0.75,
        }
    }
}

impl DiffOptions {
    /// Create options with defaults (threshold `0.75`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the churn threshold for full rewrites.
    pub fn with_rewrite_threshold(mut self, threshold: f64) -> Self {
        self.rewrite_threshold = threshold;
        self
    }

    fn exceeds(&self, changes: usize, old_len: usize) -> bool {
        changes as f64 > old_len as f64 * self.rewrite_threshold
    }
}

/// Diff `old` against `new` for `column` with default options.
pub fn diff<T: MutationTarget + ?Sized>(
    target: &mut T,
    column: &Column,
    old: &CqlValue,
    new: &CqlValue,
) -> CqlResult<()> {
    diff_with(target, column, old, new, &DiffOptions::default())
}

/// Diff `old` against `new` for `column`, appending operations to `target`.
pub fn diff_with<T: MutationTarget + ?Sized>(
    target: &mut T,
    column: &Column,
    old: &CqlValue,
    new: &CqlValue,
    options: &DiffOptions,
) -> CqlResult<()> {
    let name = column
        .name()
        .ok_or_else(|| CqlError::malformed("cannot diff an unnamed column"))?;

    if old == new {
        diff_trace!(column = name, "unchanged");
        return Ok(());
    }

    if old.is_null() || new.is_null() {
        replace(target, name, new);
        return Ok(());
    }

    match column.collection_kind() {
        Some(CollectionKind::Set) => {
            let (old_items, new_items) = (elements(name, old)?, elements(name, new)?);
            diff_set(target, name, old_items, new_items, new, options);
        }
        Some(CollectionKind::List) => {
            let (old_items, new_items) = (elements(name, old)?, elements(name, new)?);
            diff_list(target, name, old_items, new_items, new, options);
        }
        Some(CollectionKind::Map) => {
            let (old_entries, new_entries) = (entries(name, old)?, entries(name, new)?);
            diff_map(target, name, old_entries, new_entries);
        }
        // Scalars, timestamps and frozen tuples are always replaced.
        _ => replace(target, name, new),
    }
    Ok(())
}

/// Diff every non-key column of `table` between two record snapshots.
///
/// A column missing from a snapshot is treated as `NULL`.
pub fn diff_record<T: MutationTarget + ?Sized>(
    target: &mut T,
    table: &Table,
    old: &BTreeMap<String, CqlValue>,
    new: &BTreeMap<String, CqlValue>,
) -> CqlResult<()> {
    let null = CqlValue::Null;
    for column in table.columns() {
        let Some(name) = column.name() else {
            continue;
        };
        if table.is_key(name) {
            continue;
        }
        let before = old.get(name).unwrap_or(&null);
        let after = new.get(name).unwrap_or(&null);
        diff(target, column, before, after)?;
    }
    Ok(())
}

fn elements<'a>(column: &str, value: &'a CqlValue) -> CqlResult<&'a [CqlValue]> {
    match value {
        CqlValue::List(items) | CqlValue::Set(items) => Ok(items),
        other => Err(CqlError::malformed(format!(
            "collection column {} got a {} value",
            column,
            other.kind_name()
        ))),
    }
}

fn entries<'a>(column: &str, value: &'a CqlValue) -> CqlResult<&'a [(CqlValue, CqlValue)]> {
    value.entries().ok_or_else(|| {
        CqlError::malformed(format!(
            "map column {} got a {} value",
            column,
            value.kind_name()
        ))
    })
}

fn replace<T: MutationTarget + ?Sized>(target: &mut T, column: &str, new: &CqlValue) {
    target.apply(DiffOp::Replace {
        column: column.to_string(),
        value: new.clone(),
    });
}

fn cloned(values: &[&CqlValue]) -> Vec<CqlValue> {
    values.iter().map(|v| (*v).clone()).collect()
}

// ==================== Sets ====================

fn diff_set<T: MutationTarget + ?Sized>(
    target: &mut T,
    column: &str,
    old: &[CqlValue],
    new: &[CqlValue],
    new_value: &CqlValue,
    options: &DiffOptions,
) {
    let mut additions: Vec<&CqlValue> = new.iter().collect();
    let mut subtractions: Vec<&CqlValue> = Vec::new();

    for value in old {
        match additions.iter().position(|v| *v == value) {
            Some(index) => {
                additions.remove(index);
            }
            None => subtractions.push(value),
        }
    }

    if options.exceeds(additions.len() + subtractions.len(), old.len()) {
        diff_trace!(column, reason = "churn", "rewriting set");
        replace(target, column, new_value);
        return;
    }

    diff_trace!(
        column,
        added = additions.len(),
        removed = subtractions.len(),
        "patching set"
    );
    if !additions.is_empty() {
        target.apply(DiffOp::Add {
            column: column.to_string(),
            value: CqlValue::Set(cloned(&additions)),
        });
    }
    if !subtractions.is_empty() {
        target.apply(DiffOp::Subtract {
            column: column.to_string(),
            value: CqlValue::Set(cloned(&subtractions)),
        });
    }
}

// ==================== Maps ====================

fn diff_map<T: MutationTarget + ?Sized>(
    target: &mut T,
    column: &str,
    old: &[(CqlValue, CqlValue)],
    new: &[(CqlValue, CqlValue)],
) {
    let lookup = |entries: &[(CqlValue, CqlValue)], key: &CqlValue| {
        entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    };

    let mut removed = Vec::new();
    let mut updates = Vec::new();

    for (key, value) in old {
        match lookup(new, key) {
            None => removed.push(key.clone()),
            Some(new_value) if new_value != *value => updates.push((key.clone(), new_value)),
            Some(_) => {}
        }
    }
    for (key, value) in new {
        if lookup(old, key).is_none() {
            updates.push((key.clone(), value.clone()));
        }
    }

    diff_trace!(
        column,
        updated = updates.len(),
        removed = removed.len(),
        "patching map"
    );
    if !updates.is_empty() {
        target.apply(DiffOp::Add {
            column: column.to_string(),
            value: CqlValue::Map(updates),
        });
    }
    if !removed.is_empty() {
        target.apply(DiffOp::Subtract {
            column: column.to_string(),
            value: CqlValue::Set(removed),
        });
    }
}

// ==================== Lists ====================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edit {
    Keep,
    Add,
    Remove,
}

/// Upper bound on the LCS table for the differing middle of two lists.
/// Larger middles are rewritten instead of patched.
const MAX_LCS_CELLS: usize = 4_000_000;

/// Positional edit script from `old` to `new` based on the longest common
/// subsequence. On ties a removal is emitted before an addition.
///
/// The common prefix and suffix are kept without building a table, so edits
/// at either end cost O(n). Returns `None` when the differing middle is too
/// large to align.
fn sequence_diff<'a>(
    old: &'a [CqlValue],
    new: &'a [CqlValue],
) -> Option<Vec<(Edit, &'a CqlValue)>> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let old_middle = &old[prefix..old.len() - suffix];
    let new_middle = &new[prefix..new.len() - suffix];

    let (n, m) = (old_middle.len(), new_middle.len());
    let width = m + 1;
    let cells = (n + 1).checked_mul(width).filter(|c| *c <= MAX_LCS_CELLS);
    let cells = match cells {
        Some(cells) => cells,
        None if n == 0 || m == 0 => 0,
        None => return None,
    };

    let mut edits = Vec::with_capacity(old.len() + m);
    edits.extend(old[..prefix].iter().map(|v| (Edit::Keep, v)));

    let (mut i, mut j) = (0, 0);
    if n > 0 && m > 0 {
        // lcs[i * width + j] is the LCS length of old_middle[i..] and new_middle[j..].
        let mut lcs = vec![0usize; cells];
        for i in (0..n).rev() {
            for j in (0..m).rev() {
                lcs[i * width + j] = if old_middle[i] == new_middle[j] {
                    lcs[(i + 1) * width + j + 1] + 1
                } else {
                    lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
                };
            }
        }

        while i < n && j < m {
            if old_middle[i] == new_middle[j] {
                edits.push((Edit::Keep, &old_middle[i]));
                i += 1;
                j += 1;
            } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
                edits.push((Edit::Remove, &old_middle[i]));
                i += 1;
            } else {
                edits.push((Edit::Add, &new_middle[j]));
                j += 1;
            }
        }
    }
    edits.extend(old_middle[i..].iter().map(|v| (Edit::Remove, v)));
    edits.extend(new_middle[j..].iter().map(|v| (Edit::Add, v)));
    edits.extend(old[old.len() - suffix..].iter().map(|v| (Edit::Keep, v)));
    Some(edits)
}

fn diff_list<T: MutationTarget + ?Sized>(
    target: &mut T,
    column: &str,
    old: &[CqlValue],
    new: &[CqlValue],
    new_value: &CqlValue,
    options: &DiffOptions,
) {
    let Some(edits) = sequence_diff(old, new) else {
        diff_trace!(column, reason = "too large to align", "rewriting list");
        replace(target, column, new_value);
        return;
    };

    // A value removed in one place but kept or added in another cannot be
    // removed by value.
    let mut deletions: Vec<&CqlValue> = Vec::new();
    for &(edit, value) in &edits {
        let seen = deletions.contains(&value);
        if edit == Edit::Remove {
            if !seen {
                deletions.push(value);
            }
        } else if seen {
            diff_trace!(column, reason = "duplicate", "rewriting list");
            replace(target, column, new_value);
            return;
        }
    }

    let mut appends: Vec<&CqlValue> = Vec::new();
    let mut appending = true;
    for &(edit, value) in edits.iter().rev() {
        if edit != Edit::Remove && deletions.contains(&value) {
            diff_trace!(column, reason = "duplicate", "rewriting list");
            replace(target, column, new_value);
            return;
        }
        if appending {
            if edit == Edit::Add {
                appends.push(value);
            } else {
                appending = false;
            }
        }
    }
    appends.reverse();

    let mut prepends: Vec<&CqlValue> = Vec::new();
    let mut prepending = true;
    for &(edit, value) in &edits[..edits.len() - appends.len()] {
        if prepending {
            if edit == Edit::Add {
                prepends.push(value);
            } else {
                prepending = false;
            }
        }
        if !prepending && edit == Edit::Add {
            diff_trace!(column, reason = "internal insertion", "rewriting list");
            replace(target, column, new_value);
            return;
        }
    }
    // Cassandra prepends a multi-element list in reverse.
    prepends.reverse();

    if options.exceeds(deletions.len() + appends.len() + prepends.len(), old.len()) {
        diff_trace!(column, reason = "churn", "rewriting list");
        replace(target, column, new_value);
        return;
    }

    diff_trace!(
        column,
        removed = deletions.len(),
        appended = appends.len(),
        prepended = prepends.len(),
        "patching list"
    );
    if !deletions.is_empty() {
        target.apply(DiffOp::Subtract {
            column: column.to_string(),
            value: CqlValue::List(cloned(&deletions)),
        });
    }
    if !appends.is_empty() {
        target.apply(DiffOp::Add {
            column: column.to_string(),
            value: CqlValue::List(cloned(&appends)),
        });
    }
    if !prepends.is_empty() {
        target.apply(DiffOp::Prepend {
            column: column.to_string(),
            value: CqlValue::List(cloned(&prepends)),
        });
    }
}
