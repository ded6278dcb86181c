use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// Tag names understood by the codec.
pub mod tag {
    pub const TYPE_SIGNATURE: &str = "type-signature";
    pub const SEQUENTIAL: &str = "sequential";
    pub const INDEX: &str = "index";
    pub const REQUIRED: &str = "required";
    pub const DECODE_ALIAS: &str = "decode-alias";
    pub const ENCODE_ALIAS: &str = "encode-alias";
    pub const SUBTYPE: &str = "subtype";
    pub const IGNORE: &str = "ignore";
    pub const EMBEDDED_VALUE: &str = "decode-as-embedded-value";
    pub const ENCODE_CONTEXT: &str = "encode-context";
}

/// Parsed metadata of one type or field: tag name to every value it was
/// given, in declaration order.
///
/// Tags keep the order of their first occurrence. A tag written without a
/// value carries the empty string.
///
/// ```
/// use tc_codec::meta::Tags;
///
/// let mut tags = Tags::new();
/// tags.push("decode-alias", "a");
/// tags.push("required", "");
/// tags.push("decode-alias", "b");
///
/// assert_eq!(tags.get("decode-alias"), Some(&["a".to_owned(), "b".to_owned()][..]));
/// assert_eq!(tags.first("required"), Some(""));
/// assert!(!tags.contains("ignore"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags {
    entries: Vec<(String, Vec<String>)>,
}

impl Tags {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append `value` to the values of `name`.
    pub fn push(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some((_, values)) => values.push(value.to_owned()),
            None => self
                .entries
                .push((name.to_owned(), alloc::vec![value.to_owned()])),
        }
    }

    /// All values of `name`, or `None` if the tag never appeared.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values.as_slice())
    }

    /// The first value of `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of `name`, empty if absent.
    pub fn all(&self, name: &str) -> impl Iterator<Item = &str> {
        self.get(name).unwrap_or_default().iter().map(String::as_str)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Tag names with their values, in first-occurrence order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Number of distinct tag names.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
