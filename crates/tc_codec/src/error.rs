use core::fmt;

use thiserror::Error;

use crate::object::SlotError;

/// Coarse grouping of [`CodecError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The tags on a type are inconsistent or reference unknown types.
    Configuration,
    /// The data is not a container, or has the wrong container shape.
    Shape,
    /// A required field is absent or a non-nullable field is null.
    Required,
    /// A value could not be converted to the declared type.
    Coercion,
}

/// The container layout of a type or of a data value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A list, or a map keyed `"0".."n-1"` in order.
    Positional,
    /// Any other map.
    Associative,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional => f.write_str("positional"),
            Self::Associative => f.write_str("associative"),
        }
    }
}

/// An error raised while building descriptors, decoding or encoding.
///
/// Every variant names the type involved, and per-field variants also name
/// the field. A failing call leaves no partial result behind.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("field `{field}` of `{type_path}` has index `{index}`, expected an integer in 0..=65535")]
    InvalidIndex {
        type_path: Box<str>,
        field: Box<str>,
        index: Box<str>,
    },
    #[error("malformed subtype rule `{rule}` on `{type_path}`, expected `FIELD VALUE TYPE`")]
    MalformedSubtype { type_path: Box<str>, rule: Box<str> },
    #[error("type `{name}` referenced by `{type_path}` is not registered")]
    UnknownType { type_path: Box<str>, name: Box<str> },
    #[error("subtype rules starting at `{type_path}` revisit `{repeated}`")]
    SubtypeCycle {
        type_path: Box<str>,
        repeated: Box<str>,
    },
    /// `type_path` falls back to the `TypeId` debug form for a type this
    /// codec has never described.
    #[error("type `{type_path}` has no registered constructor")]
    NotConstructible { type_path: Box<str> },
    #[error("`{type_path}` can only be decoded from a list or a map, found {found}")]
    InvalidInput {
        type_path: Box<str>,
        found: &'static str,
    },
    #[error("`{type_path}` is {expected} but the data is {found}")]
    ShapeMismatch {
        type_path: Box<str>,
        expected: Shape,
        found: Shape,
    },
    #[error("required field `{field}` of `{type_path}` is missing")]
    MissingRequired { type_path: Box<str>, field: Box<str> },
    #[error("field `{field}` of `{type_path}` is not nullable")]
    NullNotAllowed { type_path: Box<str>, field: Box<str> },
    #[error("field `{field}` of `{type_path}`: cannot convert {found} to `{expected}`")]
    Coercion {
        type_path: Box<str>,
        field: Box<str>,
        expected: Box<str>,
        found: Box<str>,
    },
    #[error("field `{field}` of `{type_path}` expects a list or map, found {found}")]
    ExpectedContainer {
        type_path: Box<str>,
        field: Box<str>,
        found: &'static str,
    },
    #[error("field `{field}` of `{type_path}` rejected the decoded value: {source}")]
    SlotMismatch {
        type_path: Box<str>,
        field: Box<str>,
        #[source]
        source: SlotError,
    },
}

impl CodecError {
    /// The group this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidIndex { .. }
            | Self::MalformedSubtype { .. }
            | Self::UnknownType { .. }
            | Self::SubtypeCycle { .. }
            | Self::NotConstructible { .. } => ErrorClass::Configuration,
            Self::InvalidInput { .. } | Self::ShapeMismatch { .. } => ErrorClass::Shape,
            Self::MissingRequired { .. } | Self::NullNotAllowed { .. } => ErrorClass::Required,
            Self::Coercion { .. } | Self::ExpectedContainer { .. } | Self::SlotMismatch { .. } => {
                ErrorClass::Coercion
            }
        }
    }

    /// The path of the type that owns the failing field or rule.
    pub fn type_path(&self) -> &str {
        match self {
            Self::InvalidIndex { type_path, .. }
            | Self::MalformedSubtype { type_path, .. }
            | Self::UnknownType { type_path, .. }
            | Self::SubtypeCycle { type_path, .. }
            | Self::NotConstructible { type_path }
            | Self::InvalidInput { type_path, .. }
            | Self::ShapeMismatch { type_path, .. }
            | Self::MissingRequired { type_path, .. }
            | Self::NullNotAllowed { type_path, .. }
            | Self::Coercion { type_path, .. }
            | Self::ExpectedContainer { type_path, .. }
            | Self::SlotMismatch { type_path, .. } => type_path,
        }
    }

    /// The failing field, for per-field errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidIndex { field, .. }
            | Self::MissingRequired { field, .. }
            | Self::NullNotAllowed { field, .. }
            | Self::Coercion { field, .. }
            | Self::ExpectedContainer { field, .. }
            | Self::SlotMismatch { field, .. } => Some(field),
            _ => None,
        }
    }
}
