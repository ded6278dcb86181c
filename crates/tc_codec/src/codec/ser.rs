use alloc::vec::Vec;

use serde_json::{Map, Number, Value};

use super::{Codec, Context};
use crate::error::CodecError;
use crate::object::{Object, Slot, SlotRef};

impl Codec {
    pub(crate) fn encode_slot(&self, slot: &dyn Slot, context: Context<'_>) -> Result<Value, CodecError> {
        Ok(match slot.view() {
            SlotRef::Null => Value::Null,
            SlotRef::Bool(value) => Value::Bool(value),
            SlotRef::Int(value) => Value::from(value),
            SlotRef::UInt(value) => Value::from(value),
            SlotRef::Float(value) => Number::from_f64(value).map_or(Value::Null, Value::Number),
            SlotRef::Str(value) => Value::String(value.into()),
            SlotRef::Value(value) => encode_value(value),
            SlotRef::List(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.encode_slot(item, context))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            SlotRef::Map(entries) => {
                let mut map = Map::new();
                for (key, item) in entries {
                    let encoded = self.encode_slot(item, context)?;
                    if !encoded.is_null() {
                        map.insert(key.into(), encoded);
                    }
                }
                Value::Object(map)
            }
            SlotRef::Object(object) => self.encode_object(object, context)?,
        })
    }

    fn encode_object(&self, object: &dyn Object, context: Context<'_>) -> Result<Value, CodecError> {
        let info = self.type_info_of(object)?;

        if info.sequential() {
            // Every indexed field, unfiltered; later fields win a shared index.
            let mut items = alloc::vec![Value::Null; info.encoded_len()];
            for field in info.fields() {
                let (Some(index), Some(slot)) = (field.index(), object.field(field.name())) else {
                    continue;
                };
                items[index] = self.encode_slot(slot, context)?;
            }
            return Ok(Value::Array(items));
        }

        let mut map = Map::new();
        for field in info.fields() {
            let Some(slot) = object.field(field.name()) else {
                continue;
            };
            if matches!(slot.view(), SlotRef::Null) || !field.encodable_in(context) {
                continue;
            }

            let encoded = self.encode_slot(slot, context)?;
            if encoded.is_null() {
                continue;
            }
            map.insert(field.output_key().into(), encoded);
        }
        Ok(Value::Object(map))
    }
}

/// Untyped data: list elements are kept, null map entries are dropped.
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(encode_value).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, item)| !item.is_null())
                .map(|(key, item)| (key.clone(), encode_value(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::encode_value;

    #[test]
    fn untyped_nulls() {
        assert_eq!(
            encode_value(&json!({"a": null, "b": [1, null, {"c": null, "d": 2}]})),
            json!({"b": [1, null, {"d": 2}]}),
        );
        assert_eq!(encode_value(&json!(null)), json!(null));
    }
}
