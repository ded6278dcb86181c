//! Fully qualified paths of prelude items.
//!
//! Generated code must not rely on the caller's prelude, a user may shadow
//! `Option` or `Box` in the module that invokes the derive.
//!
//! ```ignore
//! use tc_macro_utils::full_path::OptionFP;
//! let tokens = quote::quote!(#OptionFP::None);
//! ```

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

macro_rules! define_full_path {
    ($($(#[$attr:meta])* $name:ident => $path:path;)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Debug)]
            pub struct $name;

            impl ToTokens for $name {
                #[inline]
                fn to_tokens(&self, tokens: &mut TokenStream) {
                    tokens.extend(quote!($path));
                }
            }
        )*
    };
}

define_full_path! {
    /// `::core::any::Any`
    AnyFP => ::core::any::Any;
    /// `::core::option::Option`
    OptionFP => ::core::option::Option;
    /// `::core::result::Result`
    ResultFP => ::core::result::Result;
    /// `::std::boxed::Box`
    BoxFP => ::std::boxed::Box;
    /// `::core::marker::Send`
    SendFP => ::core::marker::Send;
    /// `::core::marker::Sync`
    SyncFP => ::core::marker::Sync;
}
