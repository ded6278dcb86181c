//! The object model the codec reads from and writes into.
//!
//! A derived type is an [`Object`]: its public fields are [`Slot`]s reached
//! by name. Decoding produces a [`Decoded`] per field and assigns it;
//! encoding walks each slot's [`SlotRef`] view.
//!
//! Field types supported out of the box: `bool`, all integers, `f32`, `f64`,
//! `String`, `serde_json::Value`, `serde_json::Map<String, Value>`,
//! `Option<T>`, `Vec<T>`, `BTreeMap<String, T>`, `Box<dyn Object>` and every
//! `#[derive(Codec)]` type.

// -----------------------------------------------------------------------------
// Modules

mod decoded;
mod impls;
mod object;
mod slot;

// -----------------------------------------------------------------------------
// Exports

pub use decoded::Decoded;
pub use object::Object;
pub use slot::{Blank, FromDecoded, Slot, SlotError, SlotRef};

pub(crate) use decoded::value_kind;
