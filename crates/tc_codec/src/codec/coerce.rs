//! Conversion of data values to the built-in signature kinds.

use serde_json::{Map, Number, Value};

use crate::info::ScalarKind;

/// Convert `value` to `kind`, or `None` when no conversion exists.
///
/// Null is handled by the caller and never reaches this function.
pub(crate) fn coerce(kind: ScalarKind, value: &Value) -> Option<Value> {
    match kind {
        ScalarKind::Int => to_int(value),
        ScalarKind::Float => to_float(value),
        ScalarKind::Bool => Some(Value::Bool(to_bool(value))),
        ScalarKind::String => to_string(value),
        ScalarKind::Array => Some(to_array(value)),
        ScalarKind::Object => Some(to_object(value)),
    }
}

fn truncate(float: f64) -> Option<Value> {
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
    const LOWER: f64 = i64::MIN as f64;
    const UPPER: f64 = i64::MAX as f64;

    (float.is_finite() && (LOWER..UPPER).contains(&float)).then(|| Value::from(float.trunc() as i64))
}

fn to_int(value: &Value) -> Option<Value> {
    match value {
        Value::Number(number) if number.is_i64() || number.is_u64() => Some(value.clone()),
        Value::Number(number) => number.as_f64().and_then(truncate),
        Value::Bool(flag) => Some(Value::from(i64::from(*flag))),
        Value::String(text) => {
            let text = text.trim();
            match text.parse::<i64>() {
                Ok(int) => Some(Value::from(int)),
                Err(_) => text.parse::<f64>().ok().and_then(truncate),
            }
        }
        _ => None,
    }
}

fn to_float(value: &Value) -> Option<Value> {
    let float = match value {
        Value::Number(number) => number.as_f64()?,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Number::from_f64(float).map(Value::Number)
}

fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !(text.is_empty() || text == "0" || text.eq_ignore_ascii_case("false")),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn to_string(value: &Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Number(number) => Some(Value::String(number.to_string())),
        Value::Bool(true) => Some(Value::from("1")),
        Value::Bool(false) => Some(Value::from("")),
        _ => None,
    }
}

fn to_array(value: &Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => value.clone(),
        Value::Null => Value::Array(Vec::new()),
        scalar => Value::Array(vec![scalar.clone()]),
    }
}

fn to_object(value: &Value) -> Value {
    match value {
        Value::Object(_) => value.clone(),
        Value::Array(items) => Value::Object(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item.clone()))
                .collect(),
        ),
        Value::Null => Value::Object(Map::new()),
        scalar => {
            let mut map = Map::new();
            map.insert("scalar".into(), scalar.clone());
            Value::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn c(kind: ScalarKind, value: Value) -> Option<Value> {
        coerce(kind, &value)
    }

    #[test]
    fn int_rules() {
        assert_eq!(c(ScalarKind::Int, json!(7)), Some(json!(7)));
        assert_eq!(c(ScalarKind::Int, json!(-2.9)), Some(json!(-2)));
        assert_eq!(c(ScalarKind::Int, json!(" 42 ")), Some(json!(42)));
        assert_eq!(c(ScalarKind::Int, json!("3.7")), Some(json!(3)));
        assert_eq!(c(ScalarKind::Int, json!(true)), Some(json!(1)));
        assert_eq!(c(ScalarKind::Int, json!("seven")), None);
        assert_eq!(c(ScalarKind::Int, json!(1e300)), None);
        assert_eq!(c(ScalarKind::Int, json!([1])), None);
    }

    #[test]
    fn float_rules() {
        assert_eq!(c(ScalarKind::Float, json!(2)), Some(json!(2.0)));
        assert_eq!(c(ScalarKind::Float, json!("1.5")), Some(json!(1.5)));
        assert_eq!(c(ScalarKind::Float, json!(false)), Some(json!(0.0)));
        assert_eq!(c(ScalarKind::Float, json!("x")), None);
        assert_eq!(c(ScalarKind::Float, json!({})), None);
    }

    #[test]
    fn bool_rules() {
        for falsy in [json!(""), json!("0"), json!("FALSE"), json!(0), json!(0.0), json!([])] {
            assert_eq!(c(ScalarKind::Bool, falsy), Some(json!(false)));
        }
        for truthy in [json!("no"), json!("1"), json!(-1), json!([0]), json!({"a": 1})] {
            assert_eq!(c(ScalarKind::Bool, truthy), Some(json!(true)));
        }
    }

    #[test]
    fn string_rules() {
        assert_eq!(c(ScalarKind::String, json!(12)), Some(json!("12")));
        assert_eq!(c(ScalarKind::String, json!(1.5)), Some(json!("1.5")));
        assert_eq!(c(ScalarKind::String, json!(true)), Some(json!("1")));
        assert_eq!(c(ScalarKind::String, json!(false)), Some(json!("")));
        assert_eq!(c(ScalarKind::String, json!(["a"])), None);
    }

    #[test]
    fn container_rules() {
        assert_eq!(c(ScalarKind::Array, json!(5)), Some(json!([5])));
        assert_eq!(c(ScalarKind::Array, json!({"a": 1})), Some(json!({"a": 1})));
        assert_eq!(c(ScalarKind::Object, json!(["x", "y"])), Some(json!({"0": "x", "1": "y"})));
        assert_eq!(c(ScalarKind::Object, json!("v")), Some(json!({"scalar": "v"})));
    }
}
