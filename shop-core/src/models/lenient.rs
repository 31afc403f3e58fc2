//! Serde helpers that accept the loosely-typed numbers the backend and
//! older clients send: JSON numbers, numeric strings, blanks and nulls.
//!
//! Anything that is not a number becomes zero instead of failing the
//! whole record.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::calculations::common::parse_lenient;

fn value_to_decimal(value: Option<Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => parse_lenient(&n.to_string()),
        Some(Value::String(s)) => parse_lenient(&s),
        Some(Value::Bool(_)) | Some(Value::Array(_)) | Some(Value::Object(_)) => {
            tracing::warn!("non-numeric JSON value coerced to zero");
            Decimal::ZERO
        }
        Some(Value::Null) | None => Decimal::ZERO,
    }
}

/// Deserializes a [`Decimal`], coercing missing or non-numeric input to zero.
///
/// Pair with `#[serde(default)]` so that an absent field is also zero.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value_to_decimal(value))
}

/// Deserializes a list of decimals, coercing each element leniently.
pub fn decimal_vec<'de, D>(deserializer: D) -> Result<Vec<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(|v| value_to_decimal(Some(v)))
        .collect())
}

/// Deserializes a taxable-style flag from a bool, `0`/`1`, or a string such
/// as `"true"`, `"yes"` or `"1"`. Anything else is `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    })
}
