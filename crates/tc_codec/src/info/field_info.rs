use alloc::boxed::Box;

use crate::codec::Context;
use crate::error::CodecError;
use crate::meta::{Tags, tag};

use super::TypeSignature;

/// The largest `@index` accepted on a sequential type.
///
/// The encoded list is allocated up to the largest index.
pub const MAX_INDEX: usize = u16::MAX as usize;

/// When a field must be present in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// `@required`: in every context.
    Always,
    /// `@required CONTEXT`: only while decoding in `CONTEXT`.
    Context(Box<str>),
}

impl Requirement {
    fn from_value(value: &str) -> Self {
        match value.trim() {
            "" => Self::Always,
            context => Self::Context(context.into()),
        }
    }

    /// Whether the requirement is active in `context`.
    pub fn applies_in(&self, context: Context<'_>) -> bool {
        match self {
            Self::Always => true,
            Self::Context(label) => **label == *context.label(),
        }
    }
}

/// The parsed metadata of one public field.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    name: &'static str,
    signature: Option<TypeSignature>,
    index: Option<usize>,
    decode_aliases: Box<[Box<str>]>,
    encode_alias: Option<Box<str>>,
    ignore: bool,
    requirement: Option<Requirement>,
    encode_contexts: Box<[Box<str>]>,
    embedded: bool,
}

impl FieldInfo {
    /// Build from a field's tags.
    ///
    /// `index` is only read when the owner is `sequential`. An index that is
    /// not an integer up to [`MAX_INDEX`] is an
    /// [`InvalidIndex`](CodecError::InvalidIndex) error.
    pub(crate) fn from_tags(
        type_path: &str,
        name: &'static str,
        tags: &Tags,
        sequential: bool,
    ) -> Result<Self, CodecError> {
        let index = match tags.first(tag::INDEX) {
            Some(raw) if sequential => match raw.parse::<usize>() {
                Ok(index) if index <= MAX_INDEX => Some(index),
                _ => {
                    return Err(CodecError::InvalidIndex {
                        type_path: type_path.into(),
                        field: name.into(),
                        index: raw.into(),
                    });
                }
            },
            Some(_) => {
                log::warn!("`@index` on field `{name}` of associative type `{type_path}` is ignored");
                None
            }
            None => None,
        };

        Ok(Self {
            name,
            signature: tags.first(tag::TYPE_SIGNATURE).and_then(TypeSignature::parse),
            index,
            decode_aliases: tags.all(tag::DECODE_ALIAS).map(Box::from).collect(),
            encode_alias: tags
                .first(tag::ENCODE_ALIAS)
                .filter(|alias| !alias.is_empty())
                .map(Box::from),
            ignore: tags.contains(tag::IGNORE),
            requirement: tags.first(tag::REQUIRED).map(Requirement::from_value),
            encode_contexts: tags.all(tag::ENCODE_CONTEXT).map(Box::from).collect(),
            embedded: tags.contains(tag::EMBEDDED_VALUE),
        })
    }

    /// The declared field name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn signature(&self) -> Option<&TypeSignature> {
        self.signature.as_ref()
    }

    /// Whether a null value is accepted. Fields without a signature accept
    /// anything.
    #[inline]
    pub fn nullable(&self) -> bool {
        self.signature.as_ref().is_none_or(TypeSignature::nullable)
    }

    /// Position in a sequential owner.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Alternative input keys, tried in order before the real name.
    #[inline]
    pub fn decode_aliases(&self) -> &[Box<str>] {
        &self.decode_aliases
    }

    #[inline]
    pub fn encode_alias(&self) -> Option<&str> {
        self.encode_alias.as_deref()
    }

    /// The key this field is written under.
    #[inline]
    pub fn output_key(&self) -> &str {
        self.encode_alias.as_deref().unwrap_or(self.name)
    }

    /// Input keys in lookup order: decode aliases, then the real name.
    pub fn decode_keys(&self) -> impl Iterator<Item = &str> {
        self.decode_aliases
            .iter()
            .map(|alias| &**alias)
            .chain(core::iter::once(self.name))
    }

    #[inline]
    pub fn ignored(&self) -> bool {
        self.ignore
    }

    #[inline]
    pub fn requirement(&self) -> Option<&Requirement> {
        self.requirement.as_ref()
    }

    /// Whether the field must be present when decoding in `context`.
    pub fn required_in(&self, context: Context<'_>) -> bool {
        self.requirement
            .as_ref()
            .is_some_and(|requirement| requirement.applies_in(context))
    }

    #[inline]
    pub fn encode_contexts(&self) -> &[Box<str>] {
        &self.encode_contexts
    }

    /// Whether the field is written when encoding in `context`.
    pub fn encodable_in(&self, context: Context<'_>) -> bool {
        !self.ignore
            && (self.encode_contexts.is_empty()
                || self
                    .encode_contexts
                    .iter()
                    .any(|label| **label == *context.label()))
    }

    /// Whether a string input is JSON text to be decoded first.
    #[inline]
    pub fn embedded(&self) -> bool {
        self.embedded
    }
}

impl FieldInfo {
    #[cfg(test)]
    pub(crate) fn parse(name: &'static str, docs: &str, sequential: bool) -> Result<Self, CodecError> {
        Self::from_tags("test::Owner", name, &crate::meta::parse_tags(docs), sequential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec::Vec;

    #[test]
    fn requirement_scoping() {
        let always = FieldInfo::parse("id", "@required", false).unwrap();
        assert!(always.required_in(Context::NONE));
        assert!(always.required_in(Context::new("update")));

        let scoped = FieldInfo::parse("id", "@required  update ", false).unwrap();
        assert_eq!(scoped.requirement(), Some(&Requirement::Context("update".into())));
        assert!(scoped.required_in(Context::new("update")));
        assert!(!scoped.required_in(Context::new("create")));
        assert!(!scoped.required_in(Context::NONE));

        let optional = FieldInfo::parse("id", "", false).unwrap();
        assert!(!optional.required_in(Context::NONE));
    }

    #[test]
    fn keys_and_aliases() {
        let field = FieldInfo::parse(
            "user_name",
            "@decode-alias userName\n@decode-alias name\n@encode-alias userName",
            false,
        )
        .unwrap();
        assert_eq!(
            field.decode_keys().collect::<Vec<_>>(),
            ["userName", "name", "user_name"]
        );
        assert_eq!(field.output_key(), "userName");

        let empty_alias = FieldInfo::parse("a", "@encode-alias", false).unwrap();
        assert_eq!(empty_alias.output_key(), "a");
    }

    #[test]
    fn encode_eligibility() {
        let field = FieldInfo::parse("a", "@encode-context admin\n@encode-context audit", false).unwrap();
        assert!(field.encodable_in(Context::new("audit")));
        assert!(!field.encodable_in(Context::NONE));

        let ignored = FieldInfo::parse("a", "@ignore", false).unwrap();
        assert!(!ignored.encodable_in(Context::NONE));
    }

    #[test]
    fn index_only_on_sequential() {
        let field = FieldInfo::parse("a", "@index 2", true).unwrap();
        assert_eq!(field.index(), Some(2));

        let field = FieldInfo::parse("a", "@index 2", false).unwrap();
        assert_eq!(field.index(), None);

        let err = FieldInfo::parse("a", "@index two", true).unwrap_err();
        assert!(matches!(err, CodecError::InvalidIndex { .. }));
    }

    #[test]
    fn index_is_bounded() {
        let field = FieldInfo::parse("a", "@index 65535", true).unwrap();
        assert_eq!(field.index(), Some(MAX_INDEX));

        for raw in ["65536", "18446744073709551615", "18446744073709551616", "-1"] {
            let err = FieldInfo::parse("a", &alloc::format!("@index {raw}"), true).unwrap_err();
            assert!(matches!(err, CodecError::InvalidIndex { ref index, .. } if &**index == raw));
        }
    }

    #[test]
    fn nullability_defaults() {
        assert!(FieldInfo::parse("a", "", false).unwrap().nullable());
        assert!(!FieldInfo::parse("a", "@type-signature int", false).unwrap().nullable());
        assert!(FieldInfo::parse("a", "@type-signature null|int", false).unwrap().nullable());
    }
}
