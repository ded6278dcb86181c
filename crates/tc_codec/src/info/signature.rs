use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// ScalarKind

/// The built-in value kinds a signature can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `string`
    String,
    /// `bool` or `boolean`
    Bool,
    /// `int` or `integer`
    Int,
    /// `float` or `double`
    Float,
    /// `array`: any list or map.
    Array,
    /// `object`: any map.
    Object,
}

impl ScalarKind {
    /// Match a simple type name. Names are case sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "string" => Self::String,
            "bool" | "boolean" => Self::Bool,
            "int" | "integer" => Self::Int,
            "float" | "double" => Self::Float,
            "array" => Self::Array,
            "object" => Self::Object,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

// -----------------------------------------------------------------------------
// SignatureKind

/// What a type signature, stripped of nullability, describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureKind {
    /// `mixed`: any value, assigned as-is.
    Any,
    /// A built-in kind.
    Scalar(ScalarKind),
    /// `T[]`: a list or map whose elements are decoded as `T`.
    Array(Box<SignatureKind>),
    /// Any other name: a registered object type, resolved relative to the
    /// declaring type's module.
    Custom(Box<str>),
}

impl SignatureKind {
    fn parse(core: &str) -> Self {
        if let Some(element) = core.strip_suffix("[]") {
            let (_, element) = split_nullable(element);
            return Self::Array(Box::new(Self::parse(&element)));
        }
        if core == "mixed" {
            return Self::Any;
        }
        match ScalarKind::from_name(core) {
            Some(kind) => Self::Scalar(kind),
            None => Self::Custom(core.into()),
        }
    }
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("mixed"),
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeSignature

/// A parsed `@type-signature` value.
///
/// Only the first whitespace-separated token of the tag value is the
/// signature; anything after it is free text. A `null` alternative anywhere
/// in a `|`-separated union makes the field nullable and is removed from the
/// kind.
///
/// ```
/// use tc_codec::info::{ScalarKind, SignatureKind, TypeSignature};
///
/// let sig = TypeSignature::parse("null|int[] the ids").unwrap();
/// assert!(sig.nullable());
/// assert_eq!(
///     sig.kind(),
///     &SignatureKind::Array(Box::new(SignatureKind::Scalar(ScalarKind::Int))),
/// );
/// assert_eq!(sig.raw(), "null|int[]");
///
/// assert!(TypeSignature::parse("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSignature {
    raw: Box<str>,
    nullable: bool,
    kind: SignatureKind,
}

impl TypeSignature {
    /// Parse a tag value. Returns `None` when the value is blank.
    pub fn parse(text: &str) -> Option<Self> {
        let raw = text.split_whitespace().next()?;
        let (nullable, core) = split_nullable(raw);
        Some(Self {
            raw: raw.into(),
            nullable,
            kind: SignatureKind::parse(&core),
        })
    }

    /// The signature token as written.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether a null value is accepted.
    #[inline]
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub fn kind(&self) -> &SignatureKind {
        &self.kind
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split `null` alternatives (any case) off a `|` union.
fn split_nullable(sig: &str) -> (bool, String) {
    let mut nullable = false;
    let rest: Vec<&str> = sig
        .split('|')
        .filter(|part| {
            let null = part.eq_ignore_ascii_case("null");
            nullable |= null;
            !null
        })
        .collect();
    (nullable, rest.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(text: &str) -> SignatureKind {
        TypeSignature::parse(text).unwrap().kind
    }

    #[test]
    fn scalar_aliases() {
        assert_eq!(kind("boolean"), SignatureKind::Scalar(ScalarKind::Bool));
        assert_eq!(kind("integer"), SignatureKind::Scalar(ScalarKind::Int));
        assert_eq!(kind("double"), SignatureKind::Scalar(ScalarKind::Float));
        assert_eq!(kind("mixed"), SignatureKind::Any);
        // Names are case sensitive: `Int` is a custom type.
        assert_eq!(kind("Int"), SignatureKind::Custom("Int".into()));
    }

    #[test]
    fn nullability() {
        assert!(TypeSignature::parse("NULL|string").unwrap().nullable());
        assert!(TypeSignature::parse("string|Null").unwrap().nullable());
        assert!(!TypeSignature::parse("string").unwrap().nullable());
        assert!(!TypeSignature::parse("nullable").unwrap().nullable());
        assert_eq!(kind("null|Point"), SignatureKind::Custom("Point".into()));
    }

    #[test]
    fn nested_arrays() {
        let expected = SignatureKind::Array(Box::new(SignatureKind::Array(Box::new(
            SignatureKind::Custom("geo::Point".into()),
        ))));
        assert_eq!(kind("geo::Point[][]"), expected);
        assert_eq!(expected.to_string(), "geo::Point[][]");
    }

    #[test]
    fn nullable_array_field() {
        let sig = TypeSignature::parse("null|Point[]").unwrap();
        assert!(sig.nullable());
        assert_eq!(
            sig.kind,
            SignatureKind::Array(Box::new(SignatureKind::Custom("Point".into())))
        );
    }
}
