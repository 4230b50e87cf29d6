//! Coercion of loosely typed request fields.
//!
//! Score submissions come from a browser game, so ids may arrive as strings
//! or numbers. These helpers turn them into the string keys used in storage.

use serde_json::Value;

use crate::database::UNKNOWN_USERNAME;

/// String key for a truthy id value, or `None` when the value is falsy or
/// cannot serve as a key.
///
/// Truthy values are non-empty strings, non-zero numbers and `true`.
pub fn display_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                (i != 0).then(|| i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64()?;
                (f != 0.0 && f.is_finite()).then(|| format_float(f))
            }
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Username to store for a submission.
pub fn username_or_default(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN_USERNAME.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// JSON form of a score total: integral totals stay integers (`15`, not
/// `15.0`).
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9e15 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

// Integral floats print without a fractional part (`7.0` -> `7`).
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display_key_truthy() {
        assert_eq!(display_key(&json!("u1")), Some("u1".to_string()));
        assert_eq!(display_key(&json!(123)), Some("123".to_string()));
        assert_eq!(display_key(&json!(-5)), Some("-5".to_string()));
        assert_eq!(display_key(&json!(7.0)), Some("7".to_string()));
        assert_eq!(display_key(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(display_key(&json!(true)), Some("true".to_string()));
    }

    #[test]
    fn test_display_key_falsy() {
        assert_eq!(display_key(&json!("")), None);
        assert_eq!(display_key(&json!(0)), None);
        assert_eq!(display_key(&json!(0.0)), None);
        assert_eq!(display_key(&json!(false)), None);
        assert_eq!(display_key(&Value::Null), None);
        assert_eq!(display_key(&json!({"id": 1})), None);
        assert_eq!(display_key(&json!([1])), None);
    }

    #[test]
    fn test_number_value() {
        assert_eq!(number_value(15.0), json!(15));
        assert_eq!(number_value(-4.0), json!(-4));
        assert_eq!(number_value(3.5), json!(3.5));
        assert_eq!(number_value(1e20), json!(1e20));
    }

    #[test]
    fn test_username_or_default() {
        assert_eq!(username_or_default(None), "N/A");
        assert_eq!(username_or_default(Some(&Value::Null)), "N/A");
        assert_eq!(username_or_default(Some(&json!("Abel"))), "Abel");
        assert_eq!(username_or_default(Some(&json!(""))), "");
        assert_eq!(username_or_default(Some(&json!(42))), "42");
    }
}
