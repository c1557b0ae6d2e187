//! Canonical JSON text used to compare invocation requests
//!
//! Object keys are written in sorted order and floats with no fractional
//! part are written as integers, so `{"b":1.0,"a":2}` and `{"a":2,"b":1}`
//! produce the same text.

use serde_json::{Number, Value};

/// Largest integer an f64 holds exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Canonical text of a request, i.e. `[entry_point, args]`
pub fn request_key(entry_point: &str, args: &Value) -> String {
    let mut out = String::new();
    out.push('[');
    write_string(&mut out, entry_point);
    out.push(',');
    write_value(&mut out, args);
    out.push(']');
    out
}

/// Canonical text of any JSON value
pub fn to_canonical_string(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

fn write_number(out: &mut String, n: &Number) {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER {
                out.push_str(&(f as i64).to_string());
                return;
            }
        }
    }
    out.push_str(&n.to_string());
}

fn write_string(out: &mut String, s: &str) {
    // Display on a JSON string value yields the quoted, escaped literal
    out.push_str(&Value::from(s).to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"b": 1, "a": {"d": 2, "c": 3}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"a": {"c": 3, "d": 2}, "b": 1}"#).unwrap();
        assert_eq!(to_canonical_string(&a), to_canonical_string(&b));
        assert_eq!(to_canonical_string(&a), r#"{"a":{"c":3,"d":2},"b":1}"#);
    }

    #[test]
    fn test_integral_floats_match_integers() {
        assert_eq!(to_canonical_string(&json!(1.0)), "1");
        assert_eq!(to_canonical_string(&json!(1)), "1");
        assert_eq!(to_canonical_string(&json!(0.8)), "0.8");
        assert_eq!(to_canonical_string(&json!(-2.0)), "-2");
    }

    #[test]
    fn test_strings_are_escaped() {
        assert_eq!(
            to_canonical_string(&json!("say \"hi\"\n")),
            r#""say \"hi\"\n""#
        );
    }

    #[test]
    fn test_request_key_includes_entry_point() {
        let key = request_key("set_preferences", &json!({ "sound_on": false }));
        assert_eq!(key, r#"["set_preferences",{"sound_on":false}]"#);
        assert_ne!(key, request_key("get_preferences", &json!({ "sound_on": false })));
    }

    #[test]
    fn test_arrays_keep_order() {
        assert_ne!(
            to_canonical_string(&json!([1, 2])),
            to_canonical_string(&json!([2, 1]))
        );
    }
}
