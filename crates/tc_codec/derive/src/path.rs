//! Paths into `tc_codec`, so that generated code keeps working when the
//! crate is reached through a facade.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `tc_codec` crate.
///
/// 1. For crates that depend on `tc_codec`, `::tc_codec` is returned.
/// 2. For crates that depend on `tagcodec`, `tc_core` or `tc`, the `codec`
///    module of the facade is returned, e.g. `::tc_core::codec`.
/// 3. Otherwise `::tc_codec` is returned, which may be incorrect.
///
/// This reads the caller's `Cargo.toml`, so the path is computed once per
/// derive and passed around.
pub(crate) fn tc_codec() -> syn::Path {
    tc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("tc_codec"))
}

#[inline(always)]
pub(crate) fn type_path_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::info::TypePath
    }
}

#[inline(always)]
pub(crate) fn typed_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_source_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::info::TypeSource
    }
}

#[inline(always)]
pub(crate) fn field_source_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::info::FieldSource
    }
}

#[inline(always)]
pub(crate) fn object_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::Object
    }
}

#[inline(always)]
pub(crate) fn slot_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::Slot
    }
}

#[inline(always)]
pub(crate) fn slot_ref_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::SlotRef
    }
}

#[inline(always)]
pub(crate) fn slot_error_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::SlotError
    }
}

#[inline(always)]
pub(crate) fn decoded_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::Decoded
    }
}

#[inline(always)]
pub(crate) fn from_decoded_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::FromDecoded
    }
}

#[inline(always)]
pub(crate) fn blank_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::Blank
    }
}

#[inline(always)]
pub(crate) fn type_registry_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::registry::TypeRegistry
    }
}

#[inline(always)]
pub(crate) fn get_type_meta_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::registry::GetTypeMeta
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(tc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec_path::__macro_exports::auto_register
    }
}
