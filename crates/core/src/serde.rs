//! Serde helper functions for loosely typed JSON scalars.
//!
//! Filter values arrive from several clients, some of which send numbers or
//! booleans where a string is stored. These helpers accept any JSON scalar
//! and keep its textual form.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Converts a JSON scalar into its string form. Returns `None` for `null`,
/// arrays and objects.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Deserialize a required scalar (string, number or boolean) as a `String`.
pub fn deserialize_scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(value)
        .ok_or_else(|| serde::de::Error::custom("expected a string, number or boolean"))
}

/// Deserialize an optional scalar as an `Option<String>`, treating `null` as `None`.
pub fn deserialize_optional_scalar_string<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_to_string(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected a string, number or boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Required {
        #[serde(deserialize_with = "deserialize_scalar_string")]
        value: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Optional {
        #[serde(default, deserialize_with = "deserialize_optional_scalar_string")]
        value: Option<String>,
    }

    #[test]
    fn test_required_accepts_string() {
        let parsed: Required = serde_json::from_str(r#"{"value": "1.5"}"#).unwrap();
        assert_eq!(parsed.value, "1.5");
    }

    #[test]
    fn test_required_accepts_number_and_bool() {
        let number: Required = serde_json::from_str(r#"{"value": 42}"#).unwrap();
        assert_eq!(number.value, "42");

        let float: Required = serde_json::from_str(r#"{"value": 0.75}"#).unwrap();
        assert_eq!(float.value, "0.75");

        let boolean: Required = serde_json::from_str(r#"{"value": true}"#).unwrap();
        assert_eq!(boolean.value, "true");
    }

    #[test]
    fn test_required_rejects_null_and_structures() {
        assert!(serde_json::from_str::<Required>(r#"{"value": null}"#).is_err());
        assert!(serde_json::from_str::<Required>(r#"{"value": [1]}"#).is_err());
        assert!(serde_json::from_str::<Required>(r#"{"value": {"a": 1}}"#).is_err());
    }

    #[test]
    fn test_optional_missing_and_null_are_none() {
        let missing: Optional = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.value, None);

        let null: Optional = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(null.value, None);
    }

    #[test]
    fn test_optional_keeps_scalars() {
        let parsed: Optional = serde_json::from_str(r#"{"value": 3}"#).unwrap();
        assert_eq!(parsed.value, Some("3".to_string()));
    }
}
