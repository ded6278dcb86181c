use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt::Display;

use serde_json::Value;

use super::coerce::coerce;
use super::{Codec, Context, get_indexed, get_named, shape_of};
use crate::error::CodecError;
use crate::info::{FieldInfo, SignatureKind, TypeInfo};
use crate::object::{Decoded, Object, value_kind};

/// The field being decoded, for error reporting and name resolution.
#[derive(Clone, Copy)]
struct Site<'a> {
    owner: &'a TypeInfo,
    field: &'a FieldInfo,
}

impl Site<'_> {
    fn missing(self) -> CodecError {
        CodecError::MissingRequired {
            type_path: self.owner.type_path().into(),
            field: self.field.name().into(),
        }
    }

    fn not_nullable(self) -> CodecError {
        CodecError::NullNotAllowed {
            type_path: self.owner.type_path().into(),
            field: self.field.name().into(),
        }
    }

    fn coercion(self, expected: impl Display, found: &str) -> CodecError {
        CodecError::Coercion {
            type_path: self.owner.type_path().into(),
            field: self.field.name().into(),
            expected: expected.to_string().into(),
            found: found.into(),
        }
    }

    fn expected_container(self, found: &'static str) -> CodecError {
        CodecError::ExpectedContainer {
            type_path: self.owner.type_path().into(),
            field: self.field.name().into(),
            found,
        }
    }
}

/// The first decode key with a non-null value. A key present with null is
/// only used when no candidate carries a value.
fn named_candidate<'a>(data: &'a Value, field: &FieldInfo) -> Option<&'a Value> {
    let mut null = None;
    for value in field.decode_keys().filter_map(|key| get_named(data, key)) {
        if !value.is_null() {
            return Some(value);
        }
        null.get_or_insert(value);
    }
    null
}

impl Codec {
    pub(crate) fn deserialize_object(
        &self,
        target: &mut dyn Object,
        data: &Value,
        context: Context<'_>,
    ) -> Result<(), CodecError> {
        let info = self.type_info_of(target)?;

        let Some(found) = shape_of(data) else {
            return Err(CodecError::InvalidInput {
                type_path: info.type_path().into(),
                found: value_kind(data),
            });
        };
        if found != info.shape() {
            return Err(CodecError::ShapeMismatch {
                type_path: info.type_path().into(),
                expected: info.shape(),
                found,
            });
        }

        for field in info.fields() {
            let site = Site { owner: &info, field };

            let raw = if info.sequential() {
                let Some(index) = field.index() else { continue };
                get_indexed(data, index)
            } else {
                named_candidate(data, field)
            };

            let raw = match raw {
                Some(Value::Null) if field.required_in(context) => return Err(site.missing()),
                Some(raw) => raw,
                None if field.required_in(context) => return Err(site.missing()),
                None => continue,
            };

            let decoded = self.decode_field(site, raw, context)?;
            let Some(slot) = target.field_mut(field.name()) else {
                continue;
            };
            slot.assign(decoded)
                .map_err(|source| CodecError::SlotMismatch {
                    type_path: info.type_path().into(),
                    field: field.name().into(),
                    source,
                })?;
        }

        Ok(())
    }

    fn decode_field(&self, site: Site<'_>, raw: &Value, context: Context<'_>) -> Result<Decoded, CodecError> {
        let Some(signature) = site.field.signature() else {
            return Ok(Decoded::Value(raw.clone()));
        };

        let check_null = |value: &Value| match (value.is_null(), signature.nullable()) {
            (false, _) => Ok(None),
            (true, true) => Ok(Some(Decoded::null())),
            (true, false) => Err(site.not_nullable()),
        };

        if let Some(null) = check_null(raw)? {
            return Ok(null);
        }

        // Embedded text is parsed after the null check; text that parses to
        // `null` goes through the same check again.
        let value = match raw {
            Value::String(text) if site.field.embedded() => Cow::Owned(
                serde_json::from_str::<Value>(text)
                    .map_err(|_| site.coercion(signature, "a string that is not valid JSON"))?,
            ),
            _ => Cow::Borrowed(raw),
        };
        if let Some(null) = check_null(&value)? {
            return Ok(null);
        }

        self.decode_kind(site, signature.kind(), &value, context)
    }

    fn decode_kind(
        &self,
        site: Site<'_>,
        kind: &SignatureKind,
        value: &Value,
        context: Context<'_>,
    ) -> Result<Decoded, CodecError> {
        match kind {
            SignatureKind::Any => Ok(Decoded::Value(value.clone())),
            SignatureKind::Scalar(scalar) => coerce(*scalar, value)
                .map(Decoded::Value)
                .ok_or_else(|| site.coercion(scalar.name(), value_kind(value))),
            SignatureKind::Array(element) => self.decode_array(site, element, value, context),
            SignatureKind::Custom(name) => self.decode_custom(site, name, value, context),
        }
    }

    /// Decode every element of a container as `element`, keeping the keys
    /// of a map and the order of both.
    fn decode_array(
        &self,
        site: Site<'_>,
        element: &SignatureKind,
        value: &Value,
        context: Context<'_>,
    ) -> Result<Decoded, CodecError> {
        let container = match value {
            Value::String(text) => Cow::Owned(
                serde_json::from_str::<Value>(text).map_err(|_| site.expected_container("a string"))?,
            ),
            _ => Cow::Borrowed(value),
        };

        let decode_element = |item: &Value| {
            if item.is_null() {
                Ok(Decoded::null())
            } else {
                self.decode_kind(site, element, item, context)
            }
        };

        match &*container {
            Value::Array(items) => items
                .iter()
                .map(decode_element)
                .collect::<Result<Vec<_>, _>>()
                .map(Decoded::List),
            Value::Object(map) => map
                .iter()
                .map(|(key, item)| Ok((key.clone(), decode_element(item)?)))
                .collect::<Result<Vec<_>, _>>()
                .map(Decoded::Map),
            other => Err(site.expected_container(value_kind(other))),
        }
    }

    /// Construct and fill the registered type `name`, narrowed by its
    /// subtype rules.
    fn decode_custom(
        &self,
        site: Site<'_>,
        name: &str,
        value: &Value,
        context: Context<'_>,
    ) -> Result<Decoded, CodecError> {
        if !(value.is_array() || value.is_object()) {
            return Err(site.expected_container(value_kind(value)));
        }

        let declared = self.resolve_type(site.owner, name)?;
        let concrete = self.resolve_subtype(declared.type_id(), value)?;
        let object = self.construct_filled(concrete, value, context)?;
        Ok(Decoded::Object(object))
    }

    pub(crate) fn construct_filled(
        &self,
        type_id: TypeId,
        data: &Value,
        context: Context<'_>,
    ) -> Result<Box<dyn Object>, CodecError> {
        let meta = self.type_meta(type_id)?;
        let mut object = meta.construct();
        self.deserialize_object(&mut *object, data, context)?;
        Ok(object)
    }
}
