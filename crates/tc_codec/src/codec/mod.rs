//! The codec: descriptor store, decode and encode.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod coerce;
mod context;
mod de;
mod ser;
mod shape;

// -----------------------------------------------------------------------------
// Exports

pub use builder::CodecBuilder;
pub use context::Context;
pub use shape::shape_of;

pub(crate) use shape::{get_indexed, get_named};

// -----------------------------------------------------------------------------
// Codec

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use std::sync::{OnceLock, PoisonError, RwLock};

use serde_json::Value;
use tc_utils::TypeIdMap;

use crate::error::CodecError;
use crate::info::{TypeInfo, TypeSource, Typed};
use crate::meta::MetaCache;
use crate::object::{Object, Slot};
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistryArc};
use crate::subtype::SubtypeResolver;

/// Converts between untyped data and derived types.
///
/// A codec owns a [type registry](TypeRegistryArc), a [metadata
/// cache](MetaCache), the descriptors built from it and the parsed subtype
/// rules. Everything is built lazily and shared between threads; a codec is
/// `Send + Sync` and usually lives for the whole process, see
/// [`Codec::global`].
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tc_codec::{Codec, derive::Codec};
///
/// /// @sequential
/// #[derive(Codec)]
/// pub struct Range {
///     /// @index 0
///     /// @type-signature int
///     pub start: i64,
///     /// @index 2
///     /// @type-signature int
///     pub end: i64,
/// }
///
/// let codec = Codec::new();
/// let range: Range = codec.deserialize_new(&json!([1, "unused", 5]), "").unwrap();
/// assert_eq!((range.start, range.end), (1, 5));
/// assert_eq!(codec.serialize(&range, "").unwrap(), json!([1, null, 5]));
/// ```
pub struct Codec {
    registry: TypeRegistryArc,
    meta_cache: Box<dyn MetaCache>,
    descriptors: RwLock<TypeIdMap<Arc<TypeInfo>>>,
    subtypes: SubtypeResolver,
}

impl Default for Codec {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Codec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Codec")
            .field("registry", &self.registry)
            .field(
                "descriptors",
                &self
                    .descriptors
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .len(),
            )
            .finish_non_exhaustive()
    }
}

impl Codec {
    /// A codec with an in-process metadata cache and, with the
    /// `auto_register` feature, every derived type registered.
    #[inline]
    pub fn new() -> Self {
        CodecBuilder::new().build()
    }

    #[inline]
    pub fn builder() -> CodecBuilder {
        CodecBuilder::new()
    }

    /// The process-wide codec, built on first use with [`Codec::new`].
    pub fn global() -> &'static Codec {
        static GLOBAL: OnceLock<Codec> = OnceLock::new();
        GLOBAL.get_or_init(Codec::new)
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    /// Register `T` and the object types of its fields.
    #[inline]
    pub fn register<T: GetTypeMeta>(&self) {
        self.registry.write().register::<T>();
    }

    // -------------------------------------------------------------------------
    // Descriptors

    /// The descriptor of `T`, built on first use.
    #[inline]
    pub fn type_info<T: Typed>(&self) -> Result<Arc<TypeInfo>, CodecError> {
        self.descriptor(TypeId::of::<T>(), T::type_source())
    }

    /// The descriptor of a registered type.
    pub fn type_info_by_id(&self, type_id: TypeId) -> Result<Arc<TypeInfo>, CodecError> {
        if let Some(info) = self.cached_descriptor(type_id) {
            return Ok(info);
        }
        let meta = self.type_meta(type_id)?;
        self.descriptor(type_id, meta.source())
    }

    /// The descriptor of the concrete type of `object`.
    #[inline]
    pub fn type_info_of(&self, object: &dyn Object) -> Result<Arc<TypeInfo>, CodecError> {
        self.descriptor(object.object_type_id(), object.reflect_source())
    }

    fn cached_descriptor(&self, type_id: TypeId) -> Option<Arc<TypeInfo>> {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    pub(crate) fn descriptor(
        &self,
        type_id: TypeId,
        source: &'static TypeSource,
    ) -> Result<Arc<TypeInfo>, CodecError> {
        if let Some(info) = self.cached_descriptor(type_id) {
            return Ok(info);
        }

        // Built outside the lock; concurrent builders store equal values.
        let info = Arc::new(TypeInfo::build(type_id, source, &*self.meta_cache)?);
        self.descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(type_id, info.clone());
        Ok(info)
    }

    fn type_meta(&self, type_id: TypeId) -> Result<TypeMeta, CodecError> {
        self.registry
            .read()
            .get(type_id)
            .copied()
            .ok_or_else(|| CodecError::NotConstructible {
                type_path: match self.cached_descriptor(type_id) {
                    Some(info) => info.type_path().into(),
                    None => alloc::format!("{type_id:?}").into(),
                },
            })
    }

    /// Resolve a type name written in a tag of `owner`.
    pub(crate) fn resolve_type(&self, owner: &TypeInfo, name: &str) -> Result<TypeMeta, CodecError> {
        self.registry
            .read()
            .resolve_name(name, owner.module_path())
            .copied()
            .ok_or_else(|| CodecError::UnknownType {
                type_path: owner.type_path().into(),
                name: name.into(),
            })
    }

    // -------------------------------------------------------------------------
    // Subtypes

    /// Follow the `@subtype` rules starting at `type_id` against `data`.
    ///
    /// Returns `type_id` itself when no rule matches. A chain of rules that
    /// comes back to an already visited type is a
    /// [`SubtypeCycle`](CodecError::SubtypeCycle) error.
    pub fn resolve_subtype(&self, type_id: TypeId, data: &Value) -> Result<TypeId, CodecError> {
        let mut current = self.type_info_by_id(type_id)?;
        let mut visited: Vec<TypeId> = alloc::vec![type_id];

        loop {
            let rules = self.subtypes.rules(&current, &self.registry.read())?;
            let Some(rule) = rules.iter().find(|rule| rule.matches(data)) else {
                return Ok(current.type_id());
            };

            log::trace!(
                "`{}` narrowed to `{}` by `{} = {}`",
                current.type_path(),
                rule.target_path(),
                rule.field(),
                rule.literal(),
            );

            if visited.contains(&rule.target()) {
                return Err(CodecError::SubtypeCycle {
                    type_path: self.type_info_by_id(type_id)?.type_path().into(),
                    repeated: rule.target_path().into(),
                });
            }
            visited.push(rule.target());
            current = self.type_info_by_id(rule.target())?;
        }
    }

    /// Construct the type selected by [`resolve_subtype`](Self::resolve_subtype)
    /// for `type_id` and fill it from `data`.
    pub fn instantiate(
        &self,
        type_id: TypeId,
        data: &Value,
        context: &str,
    ) -> Result<Box<dyn Object>, CodecError> {
        let concrete = self.resolve_subtype(type_id, data)?;
        self.construct_filled(concrete, data, Context::new(context))
    }

    // -------------------------------------------------------------------------
    // Entry points

    /// Fill `target` from `data`, a list or a map.
    ///
    /// Fields absent from `data` keep their current value. On error, fields
    /// assigned before the failure keep their new values; the caller should
    /// discard `target`.
    pub fn deserialize(
        &self,
        target: &mut dyn Object,
        data: &Value,
        context: &str,
    ) -> Result<(), CodecError> {
        self.deserialize_object(target, data, Context::new(context))
    }

    /// Construct a blank `T` and fill it from `data`.
    ///
    /// `T` is registered first, so the types of its fields can be named in
    /// tags without prior registration.
    pub fn deserialize_new<T: GetTypeMeta>(&self, data: &Value, context: &str) -> Result<T, CodecError> {
        if !self.registry.read().contains(TypeId::of::<T>()) {
            self.register::<T>();
        }
        let mut target = T::blank();
        self.deserialize_object(&mut target, data, Context::new(context))?;
        Ok(target)
    }

    /// Parse `json` and fill `target` from it.
    pub fn deserialize_str(
        &self,
        target: &mut dyn Object,
        json: &str,
        context: &str,
    ) -> Result<(), CodecError> {
        let data: Value = serde_json::from_str(json).map_err(|err| CodecError::InvalidInput {
            type_path: target.reflect_source().type_path().into(),
            found: invalid_json(&err),
        })?;
        self.deserialize(target, &data, context)
    }

    /// Encode `value` as untyped data.
    pub fn serialize(&self, value: &dyn Slot, context: &str) -> Result<Value, CodecError> {
        self.encode_slot(value, Context::new(context))
    }

    /// Encode `value` as JSON text.
    pub fn serialize_to_string(&self, value: &dyn Slot, context: &str) -> Result<String, CodecError> {
        Ok(self.serialize(value, context)?.to_string())
    }
}

fn invalid_json(err: &serde_json::Error) -> &'static str {
    use serde_json::error::Category;
    match err.classify() {
        Category::Io => "unreadable text",
        Category::Syntax => "invalid JSON text",
        Category::Data => "mistyped JSON text",
        Category::Eof => "truncated JSON text",
    }
}
