use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use serde_json::{Map, Value};

use super::{Object, SlotError};

/// A decoded field value, ready to be assigned to a [`Slot`](super::Slot).
///
/// Containers produced from typed arrays keep their decoded elements, so a
/// `Vec<Point>` field receives constructed objects rather than raw maps.
pub enum Decoded {
    /// Untyped or coerced data, including null.
    Value(Value),
    /// Elements decoded from a positional source.
    List(Vec<Decoded>),
    /// Entries decoded from an associative source, in source order.
    Map(Vec<(String, Decoded)>),
    /// A constructed and filled object.
    Object(Box<dyn Object>),
}

impl Decoded {
    #[inline]
    pub const fn null() -> Self {
        Self::Value(Value::Null)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    /// A short description of the value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Value(value) => value_kind(value),
            Self::List(_) => "a list",
            Self::Map(_) => "a map",
            Self::Object(_) => "an object",
        }
    }

    /// Convert back to untyped data. Objects cannot be converted.
    pub fn into_value(self) -> Result<Value, SlotError> {
        match self {
            Self::Value(value) => Ok(value),
            Self::List(items) => items
                .into_iter()
                .map(Self::into_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Self::Map(entries) => entries
                .into_iter()
                .map(|(key, item)| Ok((key, item.into_value()?)))
                .collect::<Result<Map<_, _>, _>>()
                .map(Value::Object),
            Self::Object(_) => Err(SlotError::Mismatch {
                expected: "untyped data",
                found: "an object",
            }),
        }
    }

    /// Elements in order: list items, map values, or the items and values
    /// of untyped arrays and maps.
    pub fn into_elements(self, expected: &'static str) -> Result<Vec<Self>, SlotError> {
        match self {
            Self::List(items) => Ok(items),
            Self::Map(entries) => Ok(entries.into_iter().map(|(_, item)| item).collect()),
            Self::Value(Value::Array(items)) => Ok(items.into_iter().map(Self::Value).collect()),
            Self::Value(Value::Object(map)) => Ok(map.into_values().map(Self::Value).collect()),
            other => Err(SlotError::Mismatch {
                expected,
                found: other.kind_name(),
            }),
        }
    }

    /// Keyed entries; positional sources are keyed `"0".."n-1"`.
    pub fn into_entries(self, expected: &'static str) -> Result<Vec<(String, Self)>, SlotError> {
        match self {
            Self::Map(entries) => Ok(entries),
            Self::List(items) => Ok(numbered(items)),
            Self::Value(Value::Object(map)) => {
                Ok(map.into_iter().map(|(key, item)| (key, Self::Value(item))).collect())
            }
            Self::Value(Value::Array(items)) => {
                Ok(numbered(items.into_iter().map(Self::Value).collect()))
            }
            other => Err(SlotError::Mismatch {
                expected,
                found: other.kind_name(),
            }),
        }
    }

    /// Take the decoded object out as a concrete `T`.
    pub fn into_object<T: Object>(self) -> Result<T, SlotError> {
        let expected = core::any::type_name::<T>();
        match self {
            Self::Object(object) => {
                let found = object.reflect_source().type_path();
                let any: Box<dyn Any> = object;
                any.downcast::<T>()
                    .map(|object| *object)
                    .map_err(|_| SlotError::Mismatch { expected, found })
            }
            other => Err(SlotError::Mismatch {
                expected,
                found: other.kind_name(),
            }),
        }
    }
}

fn numbered(items: Vec<Decoded>) -> Vec<(String, Decoded)> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| (index.to_string(), item))
        .collect()
}

impl From<Value> for Decoded {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Object(object) => f
                .debug_tuple("Object")
                .field(&object.reflect_source().type_path())
                .finish(),
        }
    }
}

/// A short description of a data value's kind, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
