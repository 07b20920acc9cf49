//! Schema-tolerant lookups into loosely-structured JSON documents.
//!
//! Collector documents differ per source and drift over time. Every lookup
//! here returns `Option` instead of failing, and numeric probes accept either
//! JSON numbers or numeric strings. A present-but-`null` field counts as absent.

use serde_json::Value;

/// Interprets a JSON value as a finite number.
///
/// # Examples
///
/// ```
/// use displacement_traits::probe::number;
/// use serde_json::json;
///
/// assert_eq!(number(&json!(4.5)), Some(4.5));
/// assert_eq!(number(&json!("12")), Some(12.0));
/// assert_eq!(number(&json!(null)), None);
/// assert_eq!(number(&json!("n/a")), None);
/// ```
pub fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Follows a path of object keys, returning `None` on any missing or null step.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.get(*key))
        .filter(|found| !found.is_null())
}

/// Returns the array at `key`, if the field exists and is an array.
pub fn array<'a>(value: &'a Value, key: &str) -> Option<&'a [Value]> {
    value.get(key)?.as_array().map(Vec::as_slice)
}

/// Tries each key in order and returns the first numeric field found.
///
/// # Examples
///
/// ```
/// use displacement_traits::probe::first_number;
/// use serde_json::json;
///
/// let point = json!({"employment": 1500.0});
/// assert_eq!(first_number(&point, &["total_employment", "employment"]), Some(1500.0));
/// assert_eq!(first_number(&point, &["missing"]), None);
/// ```
pub fn first_number(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| value.get(*key).and_then(number))
}

/// Returns the string field at `key`, if present.
pub fn string<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str()
}
