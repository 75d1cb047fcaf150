//! Defensive coercion for numbers that may arrive as text.
//!
//! Prices and discount percentages come from the API either as JSON numbers
//! or as decimal strings (`"10.00"`). Every entry point routes them through
//! [`Numeric`] so upstream typing is never trusted.

use serde::{Deserialize, Deserializer, Serialize};

/// A number or numeric-looking text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    /// A native number.
    Number(f64),
    /// Text that may or may not hold a number.
    Text(String),
}

impl Numeric {
    /// Parse strictly: `None` for non-numeric text, `NaN`, or infinities.
    #[must_use]
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Parse leniently: anything unparseable becomes `0.0`. Never fails.
    #[must_use]
    pub fn to_f64_lossy(&self) -> f64 {
        self.parse().unwrap_or(0.0)
    }

    /// Build from an arbitrary JSON value. Non-number, non-string values are
    /// treated as empty text.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Number(f64::NAN), Self::Number),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            _ => Self::Text(String::new()),
        }
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Numeric {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for Numeric {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Numeric {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::fmt::Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Coerce any numeric-ish input to `f64`, defaulting to zero.
#[must_use]
pub fn coerce(value: impl Into<Numeric>) -> f64 {
    value.into().to_f64_lossy()
}

/// Serde helper: deserialize a number-or-text field leniently.
///
/// # Errors
///
/// Only fails if the underlying input is not valid JSON-like data.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(Numeric::from_json(&raw).to_f64_lossy())
}

/// Serde helper: like [`deserialize_lenient`], but `null`/absent stays `None`.
///
/// # Errors
///
/// Only fails if the underlying input is not valid JSON-like data.
pub fn deserialize_lenient_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    Ok(Some(Numeric::from_json(&raw).to_f64_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_with_decimals_parses() {
        assert_eq!(Numeric::from("10.50").parse(), Some(10.5));
        assert_eq!(Numeric::from(" 25 ").parse(), Some(25.0));
    }

    #[test]
    fn junk_text_is_zero_when_lossy() {
        assert_eq!(coerce("ten percent"), 0.0);
        assert_eq!(coerce(""), 0.0);
        assert_eq!(Numeric::from("abc").parse(), None);
    }

    #[test]
    fn nan_and_infinity_are_rejected() {
        assert_eq!(Numeric::from(f64::NAN).parse(), None);
        assert_eq!(Numeric::from("NaN").parse(), None);
        assert_eq!(Numeric::from("inf").parse(), None);
        assert_eq!(coerce(f64::INFINITY), 0.0);
    }

    #[test]
    fn json_values_coerce() {
        assert_eq!(Numeric::from_json(&serde_json::json!(12)).parse(), Some(12.0));
        assert_eq!(Numeric::from_json(&serde_json::json!("7.5")).parse(), Some(7.5));
        assert_eq!(Numeric::from_json(&serde_json::json!(true)).parse(), None);
    }

    #[derive(Deserialize)]
    struct Priced {
        #[serde(deserialize_with = "deserialize_lenient")]
        price: f64,
        #[serde(default, deserialize_with = "deserialize_lenient_opt")]
        final_price: Option<f64>,
    }

    #[test]
    fn lenient_fields_accept_text_numbers_and_junk() {
        let p: Priced = serde_json::from_str(r#"{"price":"49.99","final_price":null}"#).unwrap();
        assert!((p.price - 49.99).abs() < f64::EPSILON);
        assert_eq!(p.final_price, None);

        let p: Priced = serde_json::from_str(r#"{"price":"n/a","final_price":"40"}"#).unwrap();
        assert_eq!(p.price, 0.0);
        assert_eq!(p.final_price, Some(40.0));

        let p: Priced = serde_json::from_str(r#"{"price":30}"#).unwrap();
        assert_eq!(p.final_price, None);
    }
}
