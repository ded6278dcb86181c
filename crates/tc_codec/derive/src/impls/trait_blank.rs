use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::CodecDerive;

/// Generate implementation codes for `Blank`.
///
/// Every field, public or not, starts from its own blank.
pub(crate) fn impl_trait_blank(derive: &CodecDerive) -> TokenStream {
    let blank_ = crate::path::blank_(derive.tc_codec_path());

    let ident = derive.ident();

    let body = if derive.is_unit() {
        quote! { Self }
    } else {
        let fields = derive.fields().iter().map(|field| {
            let member = field.ident;
            let ty = field.ty;
            quote! {
                #member: <#ty as #blank_>::blank()
            }
        });
        quote! {
            Self { #(#fields),* }
        }
    };

    quote! {
        impl #blank_ for #ident {
            #[inline]
            fn blank() -> Self {
                #body
            }
        }
    }
}
