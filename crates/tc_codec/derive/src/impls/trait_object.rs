use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::CodecDerive;

/// Generate implementation codes for `Object`, `Slot` and `FromDecoded`.
pub(crate) fn impl_trait_object(derive: &CodecDerive) -> TokenStream {
    use tc_macro_utils::full_path::{OptionFP, ResultFP};

    let tc_codec_path = derive.tc_codec_path();
    let object_ = crate::path::object_(tc_codec_path);
    let slot_ = crate::path::slot_(tc_codec_path);
    let slot_ref_ = crate::path::slot_ref_(tc_codec_path);
    let slot_error_ = crate::path::slot_error_(tc_codec_path);
    let decoded_ = crate::path::decoded_(tc_codec_path);
    let from_decoded_ = crate::path::from_decoded_(tc_codec_path);
    let typed_ = crate::path::typed_(tc_codec_path);
    let type_source_ = crate::path::type_source_(tc_codec_path);
    let type_registry_ = crate::path::type_registry_(tc_codec_path);

    let ident = derive.ident();
    // Interpolated inside repetitions, which bind by name.
    let option_fp = OptionFP;

    let names = derive
        .visible_fields()
        .map(|field| field.name())
        .collect::<Vec<_>>();
    let members = derive
        .visible_fields()
        .map(|field| field.ident)
        .collect::<Vec<_>>();

    quote! {
        impl #object_ for #ident {
            #[inline]
            fn reflect_source(&self) -> &'static #type_source_ {
                <Self as #typed_>::type_source()
            }

            fn field(&self, name: &str) -> #OptionFP<&dyn #slot_> {
                match name {
                    #(#names => #option_fp::Some(&self.#members as &dyn #slot_),)*
                    _ => #OptionFP::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #OptionFP<&mut dyn #slot_> {
                match name {
                    #(#names => #option_fp::Some(&mut self.#members as &mut dyn #slot_),)*
                    _ => #OptionFP::None,
                }
            }
        }

        impl #slot_ for #ident {
            #[inline]
            fn view(&self) -> #slot_ref_<'_> {
                #slot_ref_::Object(self)
            }

            fn assign(&mut self, value: #decoded_) -> #ResultFP<(), #slot_error_> {
                *self = <Self as #from_decoded_>::from_decoded(value)?;
                #ResultFP::Ok(())
            }

            fn register_dependencies(registry: &mut #type_registry_) {
                registry.register::<Self>();
            }
        }

        impl #from_decoded_ for #ident {
            #[inline]
            fn from_decoded(value: #decoded_) -> #ResultFP<Self, #slot_error_> {
                value.into_object::<Self>()
            }
        }
    }
}
