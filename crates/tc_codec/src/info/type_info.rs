use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;

use crate::error::{CodecError, Shape};
use crate::meta::{MetaCache, cached_tags, field_key, tag, type_key};

use super::{FieldInfo, TypeSource};

/// The parsed description of a derived type, built once per type.
///
/// Fields are kept in declaration order. For a `@sequential` type the
/// encoded list has [`encoded_len`](Self::encoded_len) slots, one per index
/// up to the largest.
#[derive(Debug)]
pub struct TypeInfo {
    type_id: TypeId,
    source: &'static TypeSource,
    sequential: bool,
    fields: Box<[FieldInfo]>,
    subtype_rules: Box<[Box<str>]>,
    max_index: Option<usize>,
}

impl TypeInfo {
    /// Parse the tags of `source` (through `cache`) into a descriptor.
    pub fn build(
        type_id: TypeId,
        source: &'static TypeSource,
        cache: &dyn MetaCache,
    ) -> Result<Self, CodecError> {
        let type_path = source.type_path();
        let type_tags = cached_tags(cache, &type_key(type_path), source.docs());
        let sequential = type_tags.contains(tag::SEQUENTIAL);

        let fields = source
            .fields()
            .iter()
            .map(|field| {
                let tags = cached_tags(cache, &field_key(type_path, field.name()), field.docs());
                FieldInfo::from_tags(type_path, field.name(), &tags, sequential)
            })
            .collect::<Result<Box<[_]>, _>>()?;

        let mut seen: Vec<(usize, &str)> = Vec::new();
        for field in &fields {
            let Some(index) = field.index() else { continue };
            if let Some((_, first)) = seen.iter().find(|(i, _)| *i == index) {
                log::warn!(
                    "fields `{first}` and `{}` of `{type_path}` share index {index}; \
                     the later one is written on encode",
                    field.name(),
                );
            } else {
                seen.push((index, field.name()));
            }
        }
        let max_index = seen.iter().map(|(index, _)| *index).max();

        let info = Self {
            type_id,
            source,
            sequential,
            fields,
            subtype_rules: type_tags.all(tag::SUBTYPE).map(Box::from).collect(),
            max_index,
        };
        log::debug!(
            "built descriptor for `{type_path}`: {} fields, {}",
            info.fields.len(),
            info.shape(),
        );
        Ok(info)
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn source(&self) -> &'static TypeSource {
        self.source
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.source.type_path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.source.type_name()
    }

    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.source.module_path()
    }

    /// Whether the type is `@sequential`.
    #[inline]
    pub fn sequential(&self) -> bool {
        self.sequential
    }

    /// The container shape this type is decoded from and encoded to.
    #[inline]
    pub fn shape(&self) -> Shape {
        if self.sequential {
            Shape::Positional
        } else {
            Shape::Associative
        }
    }

    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Raw `@subtype` declarations, in order.
    #[inline]
    pub fn subtype_rules(&self) -> &[Box<str>] {
        &self.subtype_rules
    }

    /// Length of the encoded list of a sequential type: `max(index) + 1`.
    ///
    /// A sequential type without indexed fields still encodes one slot.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        self.max_index.map_or(1, |max| max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::FieldSource;
    use crate::meta::{LocalMetaCache, NoopMetaCache};

    static PAIR: TypeSource = TypeSource::new(
        "test::Pair",
        "Pair",
        Some("test"),
        " A pair.\n @sequential",
        &[
            FieldSource::new("left", " @index 0\n @type-signature int"),
            FieldSource::new("note", ""),
            FieldSource::new("right", " @index 2"),
        ],
    );

    static BROKEN: TypeSource = TypeSource::new(
        "test::Broken",
        "Broken",
        Some("test"),
        "@sequential",
        &[FieldSource::new("a", "@index first")],
    );

    static EMPTY: TypeSource =
        TypeSource::new("test::Empty", "Empty", Some("test"), "@sequential", &[]);

    #[test]
    fn sequential_layout() {
        let info = TypeInfo::build(TypeId::of::<()>(), &PAIR, &NoopMetaCache).unwrap();
        assert!(info.sequential());
        assert_eq!(info.encoded_len(), 3);
        assert_eq!(info.field("left").unwrap().index(), Some(0));
        assert_eq!(info.field("note").unwrap().index(), None);
        assert_eq!(
            info.fields().iter().map(FieldInfo::name).collect::<Vec<_>>(),
            ["left", "note", "right"]
        );
    }

    #[test]
    fn no_indices_still_one_slot() {
        let info = TypeInfo::build(TypeId::of::<()>(), &EMPTY, &NoopMetaCache).unwrap();
        assert_eq!(info.encoded_len(), 1);
    }

    #[test]
    fn invalid_index_is_a_configuration_error() {
        let err = TypeInfo::build(TypeId::of::<()>(), &BROKEN, &NoopMetaCache).unwrap_err();
        assert_eq!(err.class(), crate::ErrorClass::Configuration);
        assert_eq!(err.field(), Some("a"));
    }

    #[test]
    fn tags_go_through_the_cache() {
        let cache = LocalMetaCache::new();
        TypeInfo::build(TypeId::of::<()>(), &PAIR, &cache).unwrap();
        assert!(cache.exists("anno_class_test::Pair"));
        assert!(cache.exists("anno_prop_test::Pair::right"));
        assert_eq!(cache.len(), 4);
    }
}
