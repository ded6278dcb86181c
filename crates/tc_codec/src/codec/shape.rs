use serde_json::Value;

use crate::error::Shape;

/// The shape of a container value, or `None` for scalars and null.
///
/// A non-empty list is positional, and so is a non-empty map whose keys are
/// exactly `"0".."n-1"` in order. Empty containers are associative.
pub fn shape_of(value: &Value) -> Option<Shape> {
    match value {
        Value::Array(items) if !items.is_empty() => Some(Shape::Positional),
        Value::Object(map) if !map.is_empty() && keys_are_positions(map.keys()) => {
            Some(Shape::Positional)
        }
        Value::Array(_) | Value::Object(_) => Some(Shape::Associative),
        _ => None,
    }
}

fn keys_are_positions<'a>(keys: impl Iterator<Item = &'a String>) -> bool {
    let mut expected = 0usize;
    for key in keys {
        if key.parse::<usize>().ok() != Some(expected) || key.len() != digits(expected) {
            return false;
        }
        expected += 1;
    }
    true
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// The entry of `data` under a field name.
///
/// Lists are addressed by the name parsed as a position.
pub(crate) fn get_named<'v>(data: &'v Value, name: &str) -> Option<&'v Value> {
    match data {
        Value::Object(map) => map.get(name),
        Value::Array(items) => name.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

/// The entry of `data` at a position.
///
/// Maps are addressed by the decimal form of the position.
pub(crate) fn get_indexed(data: &Value, index: usize) -> Option<&Value> {
    match data {
        Value::Array(items) => items.get(index),
        Value::Object(map) => map.get(&index.to_string()),
        _ => None,
    }
}
