//! Helpers for extracting typed values from schemaless JSON parameter records.
//!
//! Per-field parameter sub-records stay as `serde_json::Value` so a new
//! field can define its own knobs without touching the config schema.
//! Each helper returns the default when the key is missing or mistyped;
//! they never fail.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, or `default` if missing/mistyped.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, or `default` if missing/mistyped.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, or `default` if missing/mistyped.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, or `default` if missing/mistyped.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_reads_number_or_integer() {
        let p = json!({"amp": 2.5, "count": 4});
        assert!((param_f64(&p, "amp", 0.0) - 2.5).abs() < f64::EPSILON);
        assert!((param_f64(&p, "count", 0.0) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_falls_back_on_missing_or_mistyped() {
        let p = json!({"amp": "lots"});
        assert!((param_f64(&p, "amp", 1.5) - 1.5).abs() < f64::EPSILON);
        assert!((param_f64(&p, "other", 3.0) - 3.0).abs() < f64::EPSILON);
        assert!((param_f64(&json!(null), "amp", 7.0) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_usize_rejects_float_and_negative() {
        assert_eq!(param_usize(&json!({"n": 2.5}), "n", 9), 9);
        assert_eq!(param_usize(&json!({"n": -1}), "n", 9), 9);
        assert_eq!(param_usize(&json!({"n": 12}), "n", 9), 12);
    }

    #[test]
    fn param_bool_reads_or_falls_back() {
        assert!(param_bool(&json!({"on": true}), "on", false));
        assert!(!param_bool(&json!({"on": 1}), "on", false));
        assert!(param_bool(&json!({}), "on", true));
    }

    #[test]
    fn param_string_reads_or_falls_back() {
        assert_eq!(param_string(&json!({"k": "wave"}), "k", "x"), "wave");
        assert_eq!(param_string(&json!({"k": 5}), "k", "x"), "x");
        assert_eq!(param_string(&json!({}), "k", "x"), "x");
    }
}
