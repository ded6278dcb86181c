//! Annotation-driven object codec.
//!
//! `tc_codec` converts between untyped data ([`serde_json::Value`]) and typed
//! object graphs. The conversion is steered by `@tag value` lines in the doc
//! comments of a type and its public fields, collected by
//! [`#[derive(Codec)]`](derive::Codec).
//!
//! ```
//! use tc_codec::derive::Codec;
//! use serde_json::json;
//!
//! /// A point on the map.
//! #[derive(Codec)]
//! pub struct Point {
//!     /// @type-signature int
//!     /// @required
//!     pub x: i64,
//!     /// @type-signature int
//!     /// @decode-alias y_pos
//!     pub y: i64,
//! }
//!
//! let point: Point = tc_codec::Codec::global()
//!     .deserialize_new(&json!({ "x": "3", "y_pos": 4 }), "")
//!     .unwrap();
//! assert_eq!((point.x, point.y), (3, 4));
//!
//! let value = tc_codec::serialize(&point, "").unwrap();
//! assert_eq!(value, json!({ "x": 3, "y": 4 }));
//! ```
//!
//! ## Tags
//!
//! | tag | on | meaning |
//! |-----|----|---------|
//! | `sequential` | type | data is a positional list |
//! | `subtype FIELD VALUE TYPE` | type | discriminator rule, repeatable |
//! | `type-signature SIG` | field | `string`, `int[]`, `null\|Foo`, `mixed`, ... |
//! | `index N` | field | position in a sequential type |
//! | `required [CONTEXT]` | field | must be present (in CONTEXT only) |
//! | `decode-alias NAME` | field | extra input key, repeatable |
//! | `encode-alias NAME` | field | output key |
//! | `encode-context CONTEXT` | field | only encoded in CONTEXT, repeatable |
//! | `ignore` | field | never encoded |
//! | `decode-as-embedded-value` | field | a string value holds JSON text |

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to `::tc_codec`, which must also resolve inside this
// crate's own tests and doc tests.
extern crate self as tc_codec;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod codec;
pub mod info;
pub mod meta;
pub mod object;
pub mod registry;
pub mod subtype;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use codec::{Codec, CodecBuilder, Context};
pub use error::{CodecError, ErrorClass, Shape};
pub use object::{Blank, Decoded, FromDecoded, Object, Slot, SlotError, SlotRef};
pub use tc_codec_derive as derive;

/// Fill `target` from `data` with the [global codec](Codec::global).
///
/// See [`Codec::deserialize`].
#[inline]
pub fn deserialize(
    target: &mut dyn Object,
    data: &serde_json::Value,
    context: &str,
) -> Result<(), CodecError> {
    Codec::global().deserialize(target, data, context)
}

/// Encode `value` with the [global codec](Codec::global).
///
/// See [`Codec::serialize`].
#[inline]
pub fn serialize(value: &dyn Slot, context: &str) -> Result<serde_json::Value, CodecError> {
    Codec::global().serialize(value, context)
}
