use crate::derive_data::CodecDerive;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(derive: &CodecDerive) -> proc_macro2::TokenStream {
    if !derive.attrs().auto_register {
        return proc_macro2::TokenStream::new();
    }

    let auto_register_ = crate::path::auto_register_(derive.tc_codec_path());
    let ident = derive.ident();

    quote::quote_spanned! { ident.span() =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                <#ident as #auto_register_::__RegisterType>::__register
            )
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &CodecDerive) -> proc_macro2::TokenStream {
    proc_macro2::TokenStream::new()
}
