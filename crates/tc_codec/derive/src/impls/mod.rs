//! Generate the trait implementations.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_blank;
mod trait_get_type_meta;
mod trait_object;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::CodecDerive;

/// Provided for `#[derive(Codec)]`.
pub(crate) fn match_codec_impls(ast: &DeriveInput) -> TokenStream {
    let derive = match CodecDerive::from_input(ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let type_path_impl = trait_type_path::impl_trait_type_path(&derive);
    let typed_impl = trait_typed::impl_trait_typed(&derive);
    let object_impl = trait_object::impl_trait_object(&derive);
    let blank_impl = trait_blank::impl_trait_blank(&derive);
    let get_type_meta_impl = trait_get_type_meta::impl_trait_get_type_meta(&derive);
    let auto_register_impl = auto_register::get_auto_register_impl(&derive);

    TokenStream::from(quote! {
        const _: () = {
            #type_path_impl
            #typed_impl
            #object_impl
            #blank_impl
            #get_type_meta_impl
            #auto_register_impl
        };
    })
}
