//! Type coercion
//!
//! Converts raw text (path/query) and JSON values (body) into typed values
//! using lenient rules: numeric strings become numbers,
//! numbers become text, and a fixed vocabulary of words maps to booleans.

use super::error::ErrorKind;
use serde_json::{Number, Value};
use std::num::IntErrorKind;

const TRUE_WORDS: [&str; 6] = ["1", "on", "t", "true", "y", "yes"];
const FALSE_WORDS: [&str; 6] = ["0", "off", "f", "false", "n", "no"];

/// Integer text, which may lie outside the `i64` range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInt {
    Exact(i64),
    /// Decimal digits without sign or leading zeros
    Wide { negative: bool, digits: String },
}

impl TextInt {
    /// Wide values are pinned to the end of the range they passed
    pub const fn saturating(&self) -> i64 {
        match self {
            Self::Exact(value) => *value,
            Self::Wide { negative: true, .. } => i64::MIN,
            Self::Wide { negative: false, .. } => i64::MAX,
        }
    }

    /// Full-precision JSON number
    pub fn to_number(&self) -> Result<Number, ErrorKind> {
        match self {
            Self::Exact(value) => Ok(Number::from(*value)),
            Self::Wide { negative, digits } => {
                let sign = if *negative { "-" } else { "" };
                format!("{sign}{digits}")
                    .parse::<Number>()
                    .map_err(|_| ErrorKind::NotInteger)
            }
        }
    }
}

pub fn int_from_text(raw: &str) -> Result<TextInt, ErrorKind> {
    let text = raw.trim();
    match text.parse::<i64>() {
        Ok(value) => Ok(TextInt::Exact(value)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            let (negative, unsigned) = match text.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, text.strip_prefix('+').unwrap_or(text)),
            };
            // Overflow is reported before the trailing characters are examined
            if !unsigned.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ErrorKind::NotInteger);
            }
            Ok(TextInt::Wide {
                negative,
                digits: unsigned.trim_start_matches('0').to_string(),
            })
        }
        Err(_) => Err(ErrorKind::NotInteger),
    }
}

pub fn bool_from_text(raw: &str) -> Result<bool, ErrorKind> {
    let word = raw.trim().to_ascii_lowercase();
    if TRUE_WORDS.contains(&word.as_str()) {
        Ok(true)
    } else if FALSE_WORDS.contains(&word.as_str()) {
        Ok(false)
    } else {
        Err(ErrorKind::NotBool)
    }
}

pub fn str_from_json(value: &Value) -> Result<String, ErrorKind> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(ErrorKind::NotStr),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn int_from_json(value: &Value) -> Result<i64, ErrorKind> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                // Floats truncate toward zero; u64 beyond i64 and non-finite values are rejected
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
                    .ok_or(ErrorKind::NotInteger)
            }
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => match int_from_text(s)? {
            TextInt::Exact(value) => Ok(value),
            TextInt::Wide { .. } => Err(ErrorKind::NotInteger),
        },
        _ => Err(ErrorKind::NotInteger),
    }
}

/// NaN and infinities are rejected; they have no JSON form to echo back
pub fn float_from_json(value: &Value) -> Result<f64, ErrorKind> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).ok_or(ErrorKind::NotFloat)
}

pub fn bool_from_json(value: &Value) -> Result<bool, ErrorKind> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(ErrorKind::NotBool),
        },
        Value::String(s) => bool_from_text(s),
        _ => Err(ErrorKind::NotBool),
    }
}
