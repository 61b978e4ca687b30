//! Key Normalizer - Coerces join keys to a common comparable representation
//!
//! One dataset stores country keys as text, the other may carry numeric codes.
//! Before joining, every key value is normalized to its canonical string form
//! so equal real-world values compare equal regardless of storage type. This
//! is type unification only: no case folding, no punctuation stripping.

use crate::table::Value;

/// A normalized join key.
///
/// `Absent` is the sentinel for missing keys. It never compares equal to
/// anything, including another `Absent`, so absent-keyed rows can never
/// produce a join match.
#[derive(Clone, Debug)]
pub enum KeyValue {
    Present(String),
    Absent,
}

impl KeyValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, KeyValue::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            KeyValue::Present(s) => Some(s),
            KeyValue::Absent => None,
        }
    }
}

impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (KeyValue::Present(a), KeyValue::Present(b)) => a == b,
            _ => false,
        }
    }
}

/// Normalize one key value to its canonical string form.
///
/// Integers format in plain decimal; floats with an integral value drop the
/// fractional part so `840.0` unifies with `840` and `"840"`; strings are
/// trimmed of surrounding whitespace. Nulls and whitespace-only strings
/// normalize to `Absent`.
pub fn normalize(value: &Value) -> KeyValue {
    match value {
        Value::Null => KeyValue::Absent,
        Value::Int(i) => KeyValue::Present(i.to_string()),
        Value::Float(f) => KeyValue::Present(canonical_float(*f)),
        Value::Str(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                KeyValue::Absent
            } else {
                KeyValue::Present(trimmed.to_string())
            }
        }
    }
}

fn canonical_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
