use alloc::boxed::Box;
use std::sync::RwLock;

use tc_utils::TypeIdMap;

use crate::meta::{LocalMetaCache, MetaCache};
use crate::registry::{TypeRegistry, TypeRegistryArc};
use crate::subtype::SubtypeResolver;

use super::Codec;

/// Configures a [`Codec`].
///
/// ```
/// use tc_codec::{Codec, meta::FileMetaCache, registry::TypeRegistry};
///
/// let dir = std::env::temp_dir().join("tc_codec_builder_doc");
/// let codec = Codec::builder()
///     .meta_cache(FileMetaCache::new(dir))
///     .registry(TypeRegistry::new())
///     .auto_register(false)
///     .build();
/// assert!(codec.registry().read().is_empty());
/// ```
pub struct CodecBuilder {
    meta_cache: Option<Box<dyn MetaCache>>,
    registry: TypeRegistry,
    auto_register: bool,
}

impl Default for CodecBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl CodecBuilder {
    /// Defaults: a [`LocalMetaCache`], an empty registry, auto registration on.
    #[inline]
    pub fn new() -> Self {
        Self {
            meta_cache: None,
            registry: TypeRegistry::new(),
            auto_register: true,
        }
    }

    /// Where parsed tags are kept.
    pub fn meta_cache(mut self, cache: impl MetaCache) -> Self {
        self.meta_cache = Some(Box::new(cache));
        self
    }

    /// Start from an existing registry.
    pub fn registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Whether [`TypeRegistry::auto_register`] runs at build time.
    pub fn auto_register(mut self, enabled: bool) -> Self {
        self.auto_register = enabled;
        self
    }

    pub fn build(self) -> Codec {
        let mut registry = self.registry;
        if self.auto_register && !registry.auto_register() {
            log::debug!("auto registration is unavailable, types must be registered by hand");
        }

        Codec {
            registry: TypeRegistryArc::new(registry),
            meta_cache: self
                .meta_cache
                .unwrap_or_else(|| Box::new(LocalMetaCache::new())),
            descriptors: RwLock::new(TypeIdMap::new()),
            subtypes: SubtypeResolver::new(),
        }
    }
}
