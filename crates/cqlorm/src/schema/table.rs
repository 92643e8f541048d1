//! Table descriptors and `CREATE TABLE` rendering.

use crate::qb::{AlterTable, Delete, Insert, Select, Truncate, Update};
use crate::schema::column::Column;
use crate::schema::cson;
use crate::schema::index::Index;

const INDENT: &str = "  ";
const LINE_DELIMITER: &str = "\r\n";

/// A CQL table: columns, primary key layout and table properties.
///
/// # Example
///
/// ```ignore
/// use cqlorm::schema::{types, Table};
///
/// let users = Table::new("users")
///     .add_column(types::text("userid").partition_key())
///     .add_column(types::set("emails", types::text(None)));
///
/// let mut update = users.update();
/// update = update.and_where("userid", "=", "u1");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    partition_keys: Vec<String>,
    compound_keys: Vec<String>,
    properties: Vec<String>,
    indexes: Vec<Index>,
}

impl Table {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Add a column. Key flags set on the column register it as a key.
    pub fn add_column(mut self, column: Column) -> Self {
        if let Some(name) = column.name() {
            let key = column.key();
            if key.partition {
                self = self.add_partition_key(name);
            } else if key.compound {
                self = self.add_compound_key(name);
            }
        }
        self.columns.push(column);
        self
    }

    /// Append a partition key column. More than one forms a composite key.
    pub fn add_partition_key(mut self, name: &str) -> Self {
        if !self.partition_keys.iter().any(|k| k == name) {
            self.partition_keys.push(name.to_string());
        }
        self
    }

    /// Append a clustering key column.
    pub fn add_compound_key(mut self, name: &str) -> Self {
        if !self.compound_keys.iter().any(|k| k == name) {
            self.compound_keys.push(name.to_string());
        }
        self
    }

    /// Add a bare property such as `COMPACT STORAGE`.
    pub fn add_flag(mut self, flag: &str) -> Self {
        self.properties.push(flag.to_string());
        self
    }

    /// Add a `key=value` property.
    ///
    /// `caching` takes single-quoted JSON; every other property uses the
    /// [`cson`] encoding.
    pub fn add_property(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        let value = value.into();
        let encoded = if key == "caching" {
            cson::quote(&value.to_string())
        } else {
            cson::encode(&value)
        };
        self.properties.push(format!("{}={}", key, encoded));
        self
    }

    pub fn add_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == Some(name))
    }

    pub fn partition_keys(&self) -> &[String] {
        &self.partition_keys
    }

    pub fn compound_keys(&self) -> &[String] {
        &self.compound_keys
    }

    /// Check whether `name` is part of the primary key.
    pub fn is_key(&self, name: &str) -> bool {
        self.partition_keys.iter().any(|k| k == name) || self.compound_keys.iter().any(|k| k == name)
    }

    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    fn primary_key(&self) -> Option<String> {
        let mut parts = Vec::new();
        match self.partition_keys.len() {
            0 => {}
            1 => parts.push(self.partition_keys[0].clone()),
            _ => parts.push(format!("({})", self.partition_keys.join(", "))),
        }
        parts.extend(self.compound_keys.iter().cloned());

        if parts.is_empty() {
            None
        } else {
            Some(format!("PRIMARY KEY ({})", parts.join(", ")))
        }
    }

    /// Render `CREATE TABLE`.
    pub fn to_cql(&self) -> String {
        let mut lines = vec![format!("CREATE TABLE {} (", self.name)];
        for column in &self.columns {
            lines.push(format!("{}{},", INDENT, column.entry()));
        }

        match self.primary_key() {
            Some(key) => lines.push(format!("{}{}", INDENT, key)),
            None if !self.columns.is_empty() => {
                if let Some(last) = lines.last_mut() {
                    last.pop();
                }
            }
            None => {}
        }

        if self.properties.is_empty() {
            lines.push(")".to_string());
        } else {
            let separator = format!(" AND{}{}", LINE_DELIMITER, INDENT);
            lines.push(format!(") WITH {}", self.properties.join(&separator)));
        }

        lines.join(LINE_DELIMITER)
    }

    /// `CREATE INDEX` statements for every declared index.
    pub fn index_statements(&self) -> Vec<String> {
        self.indexes
            .iter()
            .filter_map(|index| index.to_cql(self).ok())
            .collect()
    }

    // ==================== Builder shortcuts ====================

    pub fn select(&self) -> Select {
        Select::new().from(self)
    }

    pub fn insert(&self) -> Insert {
        Insert::new().into_table(self)
    }

    pub fn update(&self) -> Update {
        Update::new().table(self)
    }

    pub fn delete(&self) -> Delete {
        Delete::new().from(self)
    }

    pub fn truncate(&self) -> Truncate {
        Truncate::new().table(self)
    }

    pub fn alter(&self) -> AlterTable {
        AlterTable::new().table(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types;
    use serde_json::json;

    fn users() -> Table {
        Table::new("users")
            .add_column(types::text("userid"))
            .add_column(types::set("emails", types::text(None)))
            .add_column(types::text("name"))
    }

    #[test]
    fn test_basic_table() {
        assert_eq!(
            users().to_cql(),
            "CREATE TABLE users (\r\n  userid text,\r\n  emails set<text>,\r\n  name text\r\n)"
        );
    }

    #[test]
    fn test_set_name() {
        let table = Table::new("users")
            .set_name("foo")
            .add_column(types::text("userid"));
        assert_eq!(table.to_cql(), "CREATE TABLE foo (\r\n  userid text\r\n)");
    }

    #[test]
    fn test_single_partition_key() {
        assert_eq!(
            users().add_partition_key("name").to_cql(),
            "CREATE TABLE users (\r\n  userid text,\r\n  emails set<text>,\r\n  name text,\r\n  \
             PRIMARY KEY (name)\r\n)"
        );
    }

    #[test]
    fn test_composite_partition_key() {
        let table = users().add_partition_key("name").add_partition_key("userid");
        assert!(table.to_cql().contains("  PRIMARY KEY ((name, userid))\r\n)"));
    }

    #[test]
    fn test_compound_key() {
        let table = users().add_partition_key("name").add_compound_key("userid");
        assert!(table.to_cql().contains("  PRIMARY KEY (name, userid)\r\n)"));
    }

    #[test]
    fn test_column_key_flags_register() {
        let table = Table::new("t")
            .add_column(types::text("a").partition_key())
            .add_column(types::int("b").compound_key())
            .add_column(types::int("c"));
        assert_eq!(table.partition_keys(), ["a"]);
        assert_eq!(table.compound_keys(), ["b"]);
        assert!(table.is_key("b"));
        assert!(!table.is_key("c"));
    }

    #[test]
    fn test_properties() {
        let table = Table::new("users")
            .add_column(types::text("userid"))
            .add_flag("COMPACT STORAGE")
            .add_property("compression", json!({ "sstable_compression": "LZ4Compressor" }))
            .add_property("caching", json!({ "keys": "ALL", "rows_per_partition": "NONE" }))
            .add_property("comment", "Hello World")
            .add_property("gc_grace_seconds", 864000);
        assert_eq!(
            table.to_cql(),
            "CREATE TABLE users (\r\n\
             \x20 userid text\r\n\
             ) WITH COMPACT STORAGE AND\r\n\
             \x20 compression={ 'sstable_compression': 'LZ4Compressor' } AND\r\n\
             \x20 caching='{\"keys\":\"ALL\",\"rows_per_partition\":\"NONE\"}' AND\r\n\
             \x20 comment='Hello World' AND\r\n\
             \x20 gc_grace_seconds=864000"
        );
    }

    #[test]
    fn test_property_quotes_are_escaped() {
        let table = Table::new("t")
            .add_column(types::text("a"))
            .add_property("comment", "it's");
        assert!(table.to_cql().ends_with(") WITH comment='it''s'"));
    }

    #[test]
    fn test_index_statements() {
        let table = users().add_index(Index::on("name"));
        assert_eq!(table.index_statements(), ["CREATE INDEX ON users (name);"]);
    }
}
