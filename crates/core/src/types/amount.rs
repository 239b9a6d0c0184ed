//! Monetary amount coercion at the deserialization boundary.
//!
//! The backend is loose about money fields: they arrive as JSON numbers,
//! numeric strings, `null`, or are missing entirely. Rather than scattering
//! null-coalescing through every conversion, the default policy lives here:
//! a value that is present and parses as a finite number passes through,
//! everything else becomes `0.0`. View models can therefore be compared for
//! exact equality in tests - never `NaN`, never a missing amount.
//!
//! Use with serde field attributes:
//!
//! ```rust,ignore
//! #[serde(default, deserialize_with = "amount::deserialize")]
//! total_spent: f64,
//! ```

use serde::{Deserialize, Deserializer};

/// Coerce a raw JSON value into a finite amount, defaulting to `0.0`.
#[must_use]
pub fn coerce(value: Option<&serde_json::Value>) -> f64 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Serde deserializer applying the coercion policy to a single field.
///
/// # Errors
///
/// Never fails on malformed amounts; only propagates lower-level JSON errors.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(coerce(value.as_ref()))
}
