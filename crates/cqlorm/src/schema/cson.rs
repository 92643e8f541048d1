//! Encoding for CQL table and index property values.
//!
//! CQL property maps look like JSON but use single quotes:
//! `{ 'class': 'SizeTieredCompactionStrategy' }`. Numeric values are written
//! bare, strings are single-quoted.

use serde_json::Value;

fn is_numeric_text(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Single-quote a CQL string literal, doubling embedded quotes.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Render a map entry value without quotes.
fn bare(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Encode a property value.
pub fn encode(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if is_numeric_text(s) => s.clone(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(encode).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), quote(&bare(v))))
                .collect();
            format!("{{ {} }}", entries.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_are_bare() {
        assert_eq!(encode(&json!(864000)), "864000");
        assert_eq!(encode(&json!("0.01")), "0.01");
    }

    #[test]
    fn test_strings_are_quoted() {
        assert_eq!(encode(&json!("Hello World")), "'Hello World'");
        assert_eq!(encode(&json!("")), "''");
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        assert_eq!(encode(&json!("it's")), "'it''s'");
        assert_eq!(encode(&json!({ "k": "o'k" })), "{ 'k': 'o''k' }");
    }

    #[test]
    fn test_objects() {
        assert_eq!(
            encode(&json!({ "sstable_compression": "LZ4Compressor" })),
            "{ 'sstable_compression': 'LZ4Compressor' }"
        );
        assert_eq!(
            encode(&json!({ "class": "LeveledCompactionStrategy", "sstable_size_in_mb": 160 })),
            "{ 'class': 'LeveledCompactionStrategy', 'sstable_size_in_mb': '160' }"
        );
    }
}
