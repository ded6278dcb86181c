use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use serde_json::Value;
use thiserror::Error;

use super::{Decoded, Object};
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// SlotRef

/// A borrowed view of a field value, walked by the encoder.
#[derive(Clone)]
pub enum SlotRef<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(&'a str),
    /// Untyped data, encoded as-is.
    Value(&'a Value),
    /// An ordered sequence.
    List(Vec<&'a dyn Slot>),
    /// String-keyed entries, in iteration order.
    Map(Vec<(&'a str, &'a dyn Slot)>),
    /// A derived type.
    Object(&'a dyn Object),
}

impl fmt::Debug for SlotRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::List(items) => write!(f, "List(len = {})", items.len()),
            Self::Map(entries) => write!(f, "Map(len = {})", entries.len()),
            Self::Object(object) => write!(f, "Object({})", object.reflect_source().type_path()),
        }
    }
}

// -----------------------------------------------------------------------------
// SlotError

/// A decoded value that does not fit the Rust type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{value} is out of range for {expected}")]
    OutOfRange {
        expected: &'static str,
        value: String,
    },
}

// -----------------------------------------------------------------------------
// Traits

/// A value that can live in a field of a derived type.
///
/// The encoder reads it through [`view`](Slot::view); the decoder writes it
/// through [`assign`](Slot::assign). A failed assignment leaves the slot
/// unchanged.
pub trait Slot: Any + Send + Sync {
    /// Borrow the value for encoding.
    fn view(&self) -> SlotRef<'_>;

    /// Replace the value with a decoded one.
    fn assign(&mut self, value: Decoded) -> Result<(), SlotError>;

    /// Register the object types reachable through this slot.
    fn register_dependencies(_registry: &mut TypeRegistry)
    where
        Self: Sized,
    {
    }
}

/// Build a value from decoded data.
pub trait FromDecoded: Sized {
    fn from_decoded(value: Decoded) -> Result<Self, SlotError>;
}

/// The zero value of a field.
///
/// `#[derive(Codec)]` builds instances from the blanks of their fields, so
/// the codec can construct a type without running any user constructor or
/// `Default` impl.
///
/// `Box<dyn Object>` has no blank; write a polymorphic field as
/// `Option<Box<dyn Object>>`.
pub trait Blank {
    fn blank() -> Self;
}
