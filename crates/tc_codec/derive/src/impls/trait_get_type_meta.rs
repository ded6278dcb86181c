use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::CodecDerive;

/// Generate implementation codes for `GetTypeMeta`.
///
/// The object types reachable through public fields are registered along
/// with the type itself.
pub(crate) fn impl_trait_get_type_meta(derive: &CodecDerive) -> TokenStream {
    let tc_codec_path = derive.tc_codec_path();
    let get_type_meta_ = crate::path::get_type_meta_(tc_codec_path);
    let type_registry_ = crate::path::type_registry_(tc_codec_path);
    let slot_ = crate::path::slot_(tc_codec_path);

    let ident = derive.ident();

    let dependencies = derive
        .visible_fields()
        .map(|field| {
            let ty = field.ty;
            quote! {
                <#ty as #slot_>::register_dependencies(registry);
            }
        })
        .collect::<Vec<_>>();

    if dependencies.is_empty() {
        return quote! {
            impl #get_type_meta_ for #ident {}
        };
    }

    quote! {
        impl #get_type_meta_ for #ident {
            fn register_dependencies(registry: &mut #type_registry_) {
                #(#dependencies)*
            }
        }
    }
}
