//! Registration of object types.
//!
//! A [`TypeRegistry`] holds one [`TypeMeta`] per registered type, which is
//! how the codec instantiates types named in tags.
//!
//! ## auto_register
//!
//! With the default `auto_register` feature, every non-generic
//! `#[derive(Codec)]` type is submitted to a link-time list and picked up by
//! [`TypeRegistry::auto_register`]. Opt a type out with
//! `#[codec(auto_register = false)]` and register it by hand.

// -----------------------------------------------------------------------------
// Modules

mod type_meta;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
