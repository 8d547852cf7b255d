use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn require_str<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::new(field, "must not be empty"))
}

pub fn require_positive(field: &'static str, value: Option<i64>) -> Result<i64, ValidationError> {
    value
        .filter(|v| *v > 0)
        .ok_or_else(|| ValidationError::new(field, "must be a positive integer"))
}

/// Parses a payment amount as a non-negative whole number of currency units.
///
/// Providers are inconsistent about whether `amount` arrives as a JSON number
/// or a string, and fractional values occur on card payments; fractions
/// truncate toward zero. Anything unparseable or negative is `None`.
pub fn parse_amount(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                (i >= 0).then_some(i)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as i64)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                (i >= 0).then_some(i)
            } else {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as i64)
            }
        }
        _ => None,
    }
}
