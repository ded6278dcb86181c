use alloc::boxed::Box;
use core::any::TypeId;

use serde_json::Value;

use crate::codec::get_named;
use crate::error::CodecError;
use crate::info::TypeInfo;
use crate::registry::TypeRegistry;

/// One parsed `@subtype FIELD VALUE TYPE` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtypeRule {
    field: Box<str>,
    literal: Box<str>,
    numeric: Option<f64>,
    target: TypeId,
    target_path: &'static str,
}

impl SubtypeRule {
    /// Parse `declaration` from the tags of `owner`, resolving `TYPE` in
    /// `registry` relative to the owner's module.
    ///
    /// Words after `TYPE` are ignored.
    pub fn parse(
        declaration: &str,
        owner: &TypeInfo,
        registry: &TypeRegistry,
    ) -> Result<Self, CodecError> {
        let mut words = declaration.split_whitespace();
        let (Some(field), Some(literal), Some(name)) = (words.next(), words.next(), words.next())
        else {
            return Err(CodecError::MalformedSubtype {
                type_path: owner.type_path().into(),
                rule: declaration.into(),
            });
        };

        let target = registry
            .resolve_name(name, owner.module_path())
            .ok_or_else(|| CodecError::UnknownType {
                type_path: owner.type_path().into(),
                name: name.into(),
            })?;

        Ok(Self {
            field: field.into(),
            literal: literal.into(),
            numeric: literal.parse::<f64>().ok().filter(|n| n.is_finite()),
            target: target.type_id(),
            target_path: target.type_path(),
        })
    }

    /// The discriminator field name.
    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The discriminator value, as written.
    #[inline]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    #[inline]
    pub fn target(&self) -> TypeId {
        self.target
    }

    #[inline]
    pub fn target_path(&self) -> &'static str {
        self.target_path
    }

    /// Whether `data` carries the discriminator with a matching value.
    ///
    /// A numeric literal is compared numerically against a number or a
    /// numeric string. Otherwise the string form of a string or number must
    /// equal the literal exactly; booleans, null and containers never match.
    pub fn matches(&self, data: &Value) -> bool {
        let Some(value) = get_named(data, &self.field) else {
            return false;
        };

        if let Some(expected) = self.numeric {
            let actual = match value {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => text.trim().parse::<f64>().ok(),
                _ => None,
            };
            if let Some(actual) = actual {
                return actual == expected;
            }
        }

        match value {
            Value::String(text) => **text == *self.literal,
            Value::Number(number) => number.to_string() == *self.literal,
            _ => false,
        }
    }
}
