use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::CodecDerive;

/// Generate implementation codes for `Typed`.
///
/// The source lives in a `static`, so every call returns the same reference.
pub(crate) fn impl_trait_typed(derive: &CodecDerive) -> TokenStream {
    let tc_codec_path = derive.tc_codec_path();
    let typed_ = crate::path::typed_(tc_codec_path);
    let type_source_ = crate::path::type_source_(tc_codec_path);
    let field_source_ = crate::path::field_source_(tc_codec_path);

    let ident = derive.ident();
    let type_path = derive.type_path();
    let type_name = derive.type_name();
    let module_path = derive.module_path();
    let docs = derive.attrs().docs.doc_string();

    let fields = derive.visible_fields().map(|field| {
        let name = field.name();
        let docs = field.attrs.docs.doc_string();
        quote! {
            #field_source_::new(#name, #docs)
        }
    });

    quote! {
        impl #typed_ for #ident {
            fn type_source() -> &'static #type_source_ {
                static SOURCE: #type_source_ = #type_source_::new(
                    #type_path,
                    #type_name,
                    #module_path,
                    #docs,
                    &[#(#fields),*],
                );
                &SOURCE
            }
        }
    }
}
