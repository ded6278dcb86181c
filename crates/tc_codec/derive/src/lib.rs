//! See [`Codec`](derive_codec).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static CODEC_ATTRIBUTE_NAME: &str = "codec";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Codec Derivation
///
/// `#[derive(Codec)]` implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `Object`
/// - `Slot`
/// - `FromDecoded`
/// - `Blank`
/// - `GetTypeMeta`
///
/// Only structs with named fields and unit structs are supported. Generic
/// parameters, including lifetimes, are rejected.
///
/// ## Fields
///
/// Public fields are visible to the codec and must implement `Slot`,
/// `FromDecoded` and `Blank`. Private fields are invisible to the codec but
/// still need `Blank`, since a fresh instance is built from the blanks of all
/// fields.
///
/// ## Tags
///
/// Doc comments carry the codec tags:
///
/// ```rust, ignore
/// /// @subtype kind circle Circle
/// #[derive(Codec)]
/// pub struct Shape {
///     /// @type-signature string
///     /// @required
///     pub kind: String,
/// }
/// ```
///
/// To read tags from other text than the doc comments, use one or more
/// `#[codec(doc = "...")]` attributes. Once such an attribute is present, the
/// `#[doc = "..."]` attributes of the same item are no longer collected.
/// `#[codec(doc = false)]` drops the text entirely.
///
/// ```rust, ignore
/// /// Shown by rustdoc only.
/// #[derive(Codec)]
/// #[codec(doc = "@sequential")]
/// pub struct Pair {
///     #[codec(doc = "@index 0")]
///     pub first: i64,
///     #[codec(doc = "@index 1")]
///     pub second: i64,
/// }
/// ```
///
/// This attribute can be applied at the type and field levels.
///
/// ## Custom Type Path
///
/// The path defaults to `module_path!()` followed by the type name. Type
/// names written in tags are resolved against it, so a type moved between
/// modules can keep its name with:
///
/// ```rust, ignore
/// #[derive(Codec)]
/// #[codec(type_path = "geo::Circle")]
/// pub struct Circle;
/// ```
///
/// This attribute can only be applied at the type level.
///
/// ## Auto Registration
///
/// With the `auto_register` feature, every derived type is submitted to the
/// global list read by `TypeRegistry::auto_register`. Opt out with:
///
/// ```rust, ignore
/// #[derive(Codec)]
/// #[codec(auto_register = false)]
/// pub struct Local;
/// ```
///
/// This attribute is a no-op when the `auto_register` feature is disabled.
///
/// This attribute can only be applied at the type level.
#[proc_macro_derive(Codec, attributes(codec))]
pub fn derive_codec(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_codec_impls(&ast)
}
