use syn::{Expr, Lit, MetaNameValue, spanned::Spanned};

/// The text tags are parsed from.
///
/// This corresponds to `tc_codec::info::TypeSource::docs` and
/// `tc_codec::info::FieldSource::docs`.
///
/// By default, this will use the content of `#[doc = "..."]`, including the
/// standard `/// ...` format. But if the user explicitly adds
/// `#[codec(doc = "...")]`, this will switch to the custom document.
#[derive(Debug)]
pub(crate) struct CodecDocs {
    enabled: bool,
    is_custom: bool,
    docs: Vec<String>,
}

impl Default for CodecDocs {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl CodecDocs {
    #[inline]
    pub const fn new() -> Self {
        Self {
            enabled: true,
            is_custom: false,
            docs: Vec::new(),
        }
    }

    /// Parse `#[doc = "..."]`.
    ///
    /// The key is checked by the caller.
    pub fn parse_default_docs(&mut self, pair: &MetaNameValue) -> syn::Result<()> {
        if self.enabled && !self.is_custom {
            if let Expr::Lit(syn::ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) = &pair.value
            {
                self.docs.push(lit_str.value());
            } else {
                return Err(syn::Error::new(
                    pair.value.span(),
                    "`#[doc = ...]` expected a string literal value",
                ));
            }
        }
        Ok(())
    }

    /// Parse `#[codec(doc = "...")]` or `#[codec(doc = false)]`.
    ///
    /// The key is checked by the caller.
    pub fn parse_custom_docs(&mut self, pair: &MetaNameValue) -> syn::Result<()> {
        let Expr::Lit(expr_lit) = &pair.value else {
            return Err(syn::Error::new(
                pair.value.span(),
                "Expected a string or `false` literal",
            ));
        };

        match &expr_lit.lit {
            Lit::Str(lit_str) => {
                if self.enabled {
                    if !self.is_custom {
                        self.docs.clear();
                        self.is_custom = true;
                    }
                    self.docs.push(lit_str.value());
                }
            }
            Lit::Bool(lit_bool) => {
                if lit_bool.value() {
                    return Err(syn::Error::new(
                        expr_lit.span(),
                        "Explicit `true` is invalid, doc text is collected by default.",
                    ));
                }
                self.enabled = false;
                self.docs.clear();
            }
            _ => {
                return Err(syn::Error::new(
                    expr_lit.span(),
                    "Expected a string or `false` literal",
                ));
            }
        }
        Ok(())
    }

    /// All collected lines joined by `\n`, or an empty string.
    pub fn doc_string(&self) -> String {
        if !self.enabled {
            return String::new();
        }
        self.docs.join("\n")
    }
}
