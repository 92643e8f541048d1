//! USING fragment: TTL and write timestamp.

use std::fmt;

/// Statement options rendered after `USING`, joined with `AND`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    options: Vec<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// `TTL n`, in seconds.
    pub fn ttl(&mut self, seconds: u32) -> &mut Self {
        self.options.push(format!("TTL {}", seconds));
        self
    }

    /// `TIMESTAMP n`, in microseconds since the epoch.
    pub fn timestamp(&mut self, micros: i64) -> &mut Self {
        self.options.push(format!("TIMESTAMP {}", micros));
        self
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.options.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_and_timestamp() {
        let mut o = Options::new();
        o.ttl(30).timestamp(1000);
        assert_eq!(o.to_string(), "TTL 30 AND TIMESTAMP 1000");
    }

    #[test]
    fn test_empty() {
        assert_eq!(Options::new().to_string(), "");
    }
}
