//! Tolerant field decoding for backend payloads
//!
//! Log records come from many producers. A wrongly typed field falls back to
//! its default and a record that cannot be decoded at all is skipped, so one
//! bad entry never discards the rest of a page.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode the field as `T`, or `T::default()` when it has the wrong shape.
/// `null` decodes to the default as well.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::trace!(error = %e, "malformed field, using default");
        T::default()
    }))
}

/// Micro-unit amount; integral floats such as `1500000.0` are accepted
pub fn micros<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::Null => None,
        other => {
            tracing::trace!(value = %other, "malformed cost, treating as absent");
            None
        }
    };
    Ok(amount)
}

/// Decode each element on its own, skipping the ones that fail
pub fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        Value::Null => return Ok(Vec::new()),
        other => {
            tracing::trace!(value = %other, "collection items is not an array");
            return Ok(Vec::new());
        }
    };

    Ok(values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::trace!(error = %e, "skipping undecodable item");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "or_default")]
        count: Option<u64>,
        #[serde(default, deserialize_with = "micros")]
        cost_micros: Option<i64>,
        #[serde(default, deserialize_with = "items")]
        tags: Vec<String>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_or_default_wrong_type() {
        assert_eq!(sample(r#"{"count": -1}"#).count, None);
        assert_eq!(sample(r#"{"count": "many"}"#).count, None);
        assert_eq!(sample(r#"{"count": null}"#).count, None);
        assert_eq!(sample(r#"{"count": 7}"#).count, Some(7));
        assert_eq!(sample("{}").count, None);
    }

    #[test]
    fn test_micros_accepts_integral_float() {
        assert_eq!(sample(r#"{"cost_micros": 1500000.0}"#).cost_micros, Some(1_500_000));
        assert_eq!(sample(r#"{"cost_micros": 1500000}"#).cost_micros, Some(1_500_000));
        assert_eq!(sample(r#"{"cost_micros": 1.5}"#).cost_micros, None);
        assert_eq!(sample(r#"{"cost_micros": "12"}"#).cost_micros, None);
    }

    #[test]
    fn test_items_skips_bad_elements() {
        assert_eq!(sample(r#"{"tags": ["a", 3, "b"]}"#).tags, vec!["a", "b"]);
        assert!(sample(r#"{"tags": "a"}"#).tags.is_empty());
        assert!(sample(r#"{"tags": null}"#).tags.is_empty());
    }
}
