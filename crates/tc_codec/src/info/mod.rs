//! Static type sources and the descriptors parsed from them.
//!
//! - [`TypePath`] / [`Typed`]: implemented by `#[derive(Codec)]`, giving a
//!   `'static` [`TypeSource`] with the raw doc text of the type and its
//!   public fields.
//! - [`TypeInfo`] / [`FieldInfo`]: the parsed form, built by the codec on
//!   first use and shared behind an `Arc`.
//! - [`TypeSignature`]: the parsed `@type-signature` of a field.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod signature;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::{FieldInfo, MAX_INDEX, Requirement};
pub use signature::{ScalarKind, SignatureKind, TypeSignature};
pub use type_info::TypeInfo;
pub use type_path::TypePath;
pub use typed::{FieldSource, TypeSource, Typed};
