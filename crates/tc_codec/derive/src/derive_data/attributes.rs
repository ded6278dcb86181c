use syn::{
    Attribute, Expr, Lit, LitStr, Meta, MetaNameValue, Token, punctuated::Punctuated,
    spanned::Spanned,
};

use super::CodecDocs;
use crate::CODEC_ATTRIBUTE_NAME;

/// Iterate the `key = value` pairs of every `#[codec(...)]` attribute, and
/// hand every `#[doc = "..."]` to `docs`.
fn for_each_pair(
    attrs: &[Attribute],
    docs: &mut CodecDocs,
    mut func: impl FnMut(&mut CodecDocs, &MetaNameValue) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if attr.path().is_ident("doc") {
            if let Meta::NameValue(pair) = &attr.meta {
                docs.parse_default_docs(pair)?;
            }
        } else if attr.path().is_ident(CODEC_ATTRIBUTE_NAME) {
            let pairs =
                attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;
            for pair in &pairs {
                func(docs, pair)?;
            }
        }
    }
    Ok(())
}

fn expect_str(pair: &MetaNameValue) -> syn::Result<&LitStr> {
    match &pair.value {
        Expr::Lit(syn::ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit),
        other => Err(syn::Error::new(other.span(), "Expected a string literal")),
    }
}

fn expect_bool(pair: &MetaNameValue) -> syn::Result<bool> {
    match &pair.value {
        Expr::Lit(syn::ExprLit {
            lit: Lit::Bool(lit),
            ..
        }) => Ok(lit.value()),
        other => Err(syn::Error::new(other.span(), "Expected `true` or `false`")),
    }
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes of the derived type.
#[derive(Debug)]
pub(crate) struct TypeAttributes {
    pub docs: CodecDocs,
    pub type_path: Option<LitStr>,
    pub auto_register: bool,
}

impl Default for TypeAttributes {
    fn default() -> Self {
        Self {
            docs: CodecDocs::new(),
            type_path: None,
            auto_register: true,
        }
    }
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();
        let mut type_path = None;
        let mut auto_register = None;

        for_each_pair(attrs, &mut res.docs, |docs, pair| {
            let key = &pair.path;
            if key.is_ident("doc") {
                docs.parse_custom_docs(pair)
            } else if key.is_ident("type_path") {
                if type_path.is_some() {
                    return Err(syn::Error::new(key.span(), "duplicate `type_path`"));
                }
                let lit = expect_str(pair)?;
                validate_type_path(lit)?;
                type_path = Some(lit.clone());
                Ok(())
            } else if key.is_ident("auto_register") {
                if auto_register.is_some() {
                    return Err(syn::Error::new(key.span(), "duplicate `auto_register`"));
                }
                auto_register = Some(expect_bool(pair)?);
                Ok(())
            } else {
                Err(syn::Error::new(
                    key.span(),
                    "unknown attribute, expected `doc`, `type_path` or `auto_register`",
                ))
            }
        })?;

        res.type_path = type_path;
        res.auto_register = auto_register.unwrap_or(true);
        Ok(res)
    }
}

fn validate_type_path(lit: &LitStr) -> syn::Result<()> {
    let value = lit.value();
    let valid = value
        .split("::")
        .all(|segment| !segment.is_empty() && !segment.contains(char::is_whitespace));
    if valid {
        Ok(())
    } else {
        Err(syn::Error::new(
            lit.span(),
            "expected a path such as `app::model::User`",
        ))
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes of one field.
#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    pub docs: CodecDocs,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();
        for_each_pair(attrs, &mut res.docs, |docs, pair| {
            if pair.path.is_ident("doc") {
                docs.parse_custom_docs(pair)
            } else {
                Err(syn::Error::new(
                    pair.path.span(),
                    "unknown field attribute, expected `doc`",
                ))
            }
        })?;
        Ok(res)
    }
}
