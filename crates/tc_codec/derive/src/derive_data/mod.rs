//! Provide some tools for parsing the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod docs;

// -----------------------------------------------------------------------------
// Internal API

use docs::CodecDocs;

pub(crate) use attributes::{FieldAttributes, TypeAttributes};

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, Type, Visibility, ext::IdentExt, spanned::Spanned};

/// One field of the derived struct.
pub(crate) struct CodecField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// Public fields are the ones the codec reads and writes.
    pub visible: bool,
    pub attrs: FieldAttributes,
}

impl CodecField<'_> {
    /// The field name as written in data, without a raw identifier prefix.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }
}

/// A parsed `#[derive(Codec)]` input.
pub(crate) struct CodecDerive<'a> {
    ident: &'a Ident,
    attrs: TypeAttributes,
    fields: Vec<CodecField<'a>>,
    unit: bool,
    tc_codec_path: syn::Path,
}

impl<'a> CodecDerive<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`#[derive(Codec)]` does not support generic parameters",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let fields = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named
                    .named
                    .iter()
                    .map(|field| {
                        Ok(CodecField {
                            ident: field.ident.as_ref().ok_or_else(|| {
                                syn::Error::new(field.span(), "expected a named field")
                            })?,
                            ty: &field.ty,
                            visible: matches!(field.vis, Visibility::Public(_)),
                            attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                        })
                    })
                    .collect::<syn::Result<Vec<_>>>()?,
                Fields::Unit => Vec::new(),
                Fields::Unnamed(unnamed) => {
                    return Err(syn::Error::new(
                        unnamed.span(),
                        "`#[derive(Codec)]` does not support tuple structs",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`#[derive(Codec)]` does not support enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`#[derive(Codec)]` does not support unions",
                ));
            }
        };

        let unit = matches!(&ast.data, Data::Struct(data) if matches!(data.fields, Fields::Unit));

        Ok(Self {
            ident: &ast.ident,
            attrs,
            fields,
            unit,
            tc_codec_path: crate::path::tc_codec(),
        })
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn tc_codec_path(&self) -> &syn::Path {
        &self.tc_codec_path
    }

    /// Whether the input is `struct T;`.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.unit
    }

    /// All fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[CodecField<'a>] {
        &self.fields
    }

    /// Public fields in declaration order.
    pub fn visible_fields(&self) -> impl Iterator<Item = &CodecField<'a>> {
        self.fields.iter().filter(|field| field.visible)
    }

    /// The type name, from the custom path if any.
    pub fn type_name(&self) -> String {
        match &self.attrs.type_path {
            Some(lit) => {
                let path = lit.value();
                match path.rsplit_once("::") {
                    Some((_, name)) => name.to_owned(),
                    None => path,
                }
            }
            None => self.ident.unraw().to_string(),
        }
    }

    /// Tokens of a `&'static str` expression for the full path.
    pub fn type_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => quote! { #lit },
            None => {
                let name = self.type_name();
                quote! {
                    ::core::concat!(::core::module_path!(), "::", #name)
                }
            }
        }
    }

    /// Tokens of an `Option<&'static str>` expression for the module path.
    pub fn module_path(&self) -> TokenStream {
        use tc_macro_utils::full_path::OptionFP;

        match &self.attrs.type_path {
            Some(lit) => match lit.value().rsplit_once("::") {
                Some((module, _)) => quote! { #OptionFP::Some(#module) },
                None => quote! { #OptionFP::None },
            },
            None => quote! { #OptionFP::Some(::core::module_path!()) },
        }
    }
}
