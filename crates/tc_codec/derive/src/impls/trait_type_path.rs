use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::CodecDerive;

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(derive: &CodecDerive) -> TokenStream {
    use tc_macro_utils::full_path::OptionFP;

    let trait_type_path_ = crate::path::type_path_(derive.tc_codec_path());

    let ident = derive.ident();
    let type_path = derive.type_path();
    let type_name = derive.type_name();
    let module_path = derive.module_path();

    quote! {
        impl #trait_type_path_ for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> #OptionFP<&'static str> {
                #module_path
            }
        }
    }
}
