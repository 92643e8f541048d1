//! Transitional column states for selectors and ordering.

use crate::schema::column::Column;
use std::fmt;

/// A column wrapped for use in a SELECT list.
///
/// At most one function is applied; the last one set wins. The function is
/// applied before the alias, and `DISTINCT` is prefixed last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectState {
    name: Option<String>,
    ty: String,
    function: Option<String>,
    alias: Option<String>,
    distinct: bool,
}

impl SelectState {
    pub fn new(column: &Column) -> Self {
        Self {
            name: column.name().map(str::to_string),
            ty: column.type_string(),
            function: None,
            alias: None,
            distinct: false,
        }
    }

    /// The wrapped column's name, `None` for an anonymous column.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn apply(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn as_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn ttl(self) -> Self {
        self.apply("TTL")
    }

    pub fn count(self) -> Self {
        self.apply("COUNT")
    }

    pub fn write_time(self) -> Self {
        self.apply("WRITETIME")
    }

    pub fn date_of(self) -> Self {
        self.apply("dateOf")
    }

    pub fn min_timeuuid(self) -> Self {
        self.apply("minTimeuuid")
    }

    pub fn max_timeuuid(self) -> Self {
        self.apply("maxTimeuuid")
    }

    pub fn unix_timestamp_of(self) -> Self {
        self.apply("unixTimestampOf")
    }

    pub fn token(self) -> Self {
        self.apply("token")
    }

    /// Convert the column's own type to a blob.
    pub fn as_blob(self) -> Self {
        let function = format!("{}AsBlob", self.ty);
        self.apply(function)
    }

    /// Convert a blob column to `ty`.
    pub fn blob_as(self, ty: &str) -> Self {
        let mut chars = ty.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        self.apply(format!("blobAs{}", capitalized))
    }
}

impl fmt::Display for SelectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        let name = self.name.as_deref().unwrap_or_default();
        match &self.function {
            Some(function) => write!(f, "{}({})", function, name)?,
            None => f.write_str(name)?,
        }
        if let Some(alias) = &self.alias {
            write!(f, " as {}", alias)?;
        }
        Ok(())
    }
}

/// A column with an ordering direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderState {
    name: Option<String>,
    direction: &'static str,
}

impl OrderState {
    pub fn new(column: &Column) -> Self {
        Self {
            name: column.name().map(str::to_string),
            direction: "ASC",
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn asc(mut self) -> Self {
        self.direction = "ASC";
        self
    }

    pub fn desc(mut self) -> Self {
        self.direction = "DESC";
        self
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.name.as_deref().unwrap_or_default(),
            self.direction
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::types;

    #[test]
    fn test_select_functions() {
        let col = types::text("name");
        assert_eq!(col.as_alias("foo").to_string(), "name as foo");
        assert_eq!(col.ttl().to_string(), "TTL(name)");
        assert_eq!(col.count().to_string(), "COUNT(name)");
        assert_eq!(col.write_time().to_string(), "WRITETIME(name)");
        assert_eq!(col.distinct().to_string(), "DISTINCT name");
        assert_eq!(col.count().as_alias("foo").to_string(), "COUNT(name) as foo");
        assert_eq!(col.date_of().to_string(), "dateOf(name)");
        assert_eq!(col.min_timeuuid().to_string(), "minTimeuuid(name)");
        assert_eq!(col.max_timeuuid().to_string(), "maxTimeuuid(name)");
        assert_eq!(col.unix_timestamp_of().to_string(), "unixTimestampOf(name)");
        assert_eq!(col.token().to_string(), "token(name)");
    }

    #[test]
    fn test_distinct_prefixes_last() {
        let col = types::text("name");
        assert_eq!(
            col.count().as_alias("n").distinct().to_string(),
            "DISTINCT COUNT(name) as n"
        );
    }

    #[test]
    fn test_order_functions() {
        let col = types::text("name");
        assert_eq!(col.desc().to_string(), "name DESC");
        assert_eq!(col.asc().to_string(), "name ASC");
    }

    #[test]
    fn test_blob_functions() {
        let col = types::text("name");
        assert_eq!(col.as_blob().to_string(), "textAsBlob(name)");
        assert_eq!(col.blob_as("text").to_string(), "blobAsText(name)");
    }

    #[test]
    fn test_anonymous_column_has_no_name() {
        let col = types::int(None);
        assert_eq!(col.count().name(), None);
        assert_eq!(col.desc().name(), None);
        assert_eq!(types::int("n").desc().name(), Some("n"));
    }
}
