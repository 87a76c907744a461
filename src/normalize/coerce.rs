//! Lenient field readers for untyped store documents.
//!
//! None of these fail. Anything malformed degrades to a default.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// First present, non-null field among `names`
pub fn field<'a>(data: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| data.get(*name))
        .find(|v| !v.is_null())
}

/// Numbers and numeric strings parse; everything else is `None`
pub fn number_opt(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Coerce to a number, 0 on failure
pub fn number(value: Option<&Value>) -> f64 {
    number_opt(value).unwrap_or(0.0)
}

/// Non-negative amount (prices, percentages)
pub fn amount(value: Option<&Value>) -> f64 {
    number(value).max(0.0)
}

/// Non-negative whole count, 0 on failure
pub fn count(value: Option<&Value>) -> u32 {
    let n = number(value);
    if n <= 0.0 {
        0
    } else {
        n.min(f64::from(u32::MAX)).floor() as u32
    }
}

pub fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn boolean(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    }
}

/// Strings out of an array, or a `;`-separated string as written by bulk imports.
/// Array items may also be objects carrying a `url`/`image_url`.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(_) => text(field(item, &["url", "image_url", "name"])),
                other => text(Some(other)),
            })
            .collect(),
        Some(Value::String(s)) => s
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// RFC 3339 strings, epoch milliseconds, or `{seconds}` / `{_seconds}` timestamp objects
pub fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => DateTime::parse_from_rfc3339(s).ok().map(|d| d.with_timezone(&Utc)),
        Value::Number(n) => Utc.timestamp_millis_opt(n.as_i64()?).single(),
        obj @ Value::Object(_) => {
            let secs = field(obj, &["seconds", "_seconds"])?.as_i64()?;
            Utc.timestamp_opt(secs, 0).single()
        }
        _ => None,
    }
}
