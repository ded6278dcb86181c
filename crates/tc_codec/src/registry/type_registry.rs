use alloc::format;
use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tc_utils::TypeIdMap;
use tc_utils::hash::{FixedHashState, HashMap, HashSet};

use super::{GetTypeMeta, TypeMeta};

// -----------------------------------------------------------------------------
// TypeRegistry

/// The registered object types: constructors and static sources, addressed
/// by [`TypeId`], full type path and short type name.
///
/// Custom types named in `@type-signature` and `@subtype` tags are looked up
/// here, see [`resolve_name`](Self::resolve_name).
///
/// # Example
///
/// ```
/// use core::any::TypeId;
/// use tc_codec::{derive::Codec, registry::TypeRegistry};
///
/// #[derive(Codec)]
/// #[codec(type_path = "shop::Item")]
/// pub struct Item {
///     pub price: Option<Price>,
/// }
///
/// #[derive(Codec)]
/// #[codec(type_path = "shop::Price")]
/// pub struct Price {
///     pub cents: u64,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Item>();
///
/// // The main type and the object types of its fields.
/// assert!(registry.contains(TypeId::of::<Item>()));
/// assert!(registry.contains(TypeId::of::<Price>()));
///
/// let meta = registry.resolve_name("Price", Some("shop")).unwrap();
/// assert_eq!(meta.type_path(), "shop::Price");
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create an empty [`TypeRegistry`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let type_name = type_meta.type_name();

        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, type_meta.type_id());
            }
        }

        if let Some(previous) = type_path_to_id.insert(type_meta.type_path(), type_meta.type_id())
        {
            log::warn!(
                "type path `{}` is registered by two types, the later one shadows {previous:?}",
                type_meta.type_path(),
            );
        }
    }

    /// Try add or do nothing.
    ///
    /// - If the [`TypeId`] is already present, nothing changes and `false` is returned.
    /// - Otherwise the meta is inserted and `true` is returned.
    ///
    /// This method does _not_ register type dependencies.
    /// Use [`register`](Self::register) to register a type with its dependencies.
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        self.type_meta_table.try_insert(type_meta.type_id(), || {
            Self::add_new_type_indices(
                &type_meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            type_meta
        })
    }

    /// Register `T` if it is not registered yet, then the object types of its
    /// public fields.
    ///
    /// If `T` is already present, neither it nor its dependencies are
    /// registered again.
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.try_insert_type_meta(T::get_type_meta()) {
            <T as GetTypeMeta>::register_dependencies(self);
        }
    }

    /// Register every non-generic `#[derive(Codec)]` type in the program,
    /// except those marked `#[codec(auto_register = false)]`.
    ///
    /// Repeated calls are cheap and never insert duplicates.
    ///
    /// Returns `false` when the `auto_register` feature is disabled, in which
    /// case nothing is registered.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            crate::__macro_exports::auto_register::register_types(self);
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Whether the type with the given [`TypeId`] is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    /// The [`TypeMeta`] of the type with the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// The [`TypeMeta`] of the type with the given full path.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// The [`TypeMeta`] of the type with the given short name.
    ///
    /// Returns `None` when the name is ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Whether the short name matches more than one registered type.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Resolve a type name written in a tag on a type declared in
    /// `declaring_module`.
    ///
    /// - `::a::B` is an absolute path, looked up verbatim.
    /// - `crate::a::B` is resolved against the first segment of
    ///   `declaring_module`.
    /// - Otherwise `{declaring_module}::{name}` is tried first, then `name`
    ///   as a full path, then `name` as an unambiguous short name.
    pub fn resolve_name(&self, name: &str, declaring_module: Option<&str>) -> Option<&TypeMeta> {
        if let Some(absolute) = name.strip_prefix("::") {
            return self.get_with_type_path(absolute);
        }

        if let Some(module) = declaring_module {
            if let Some(rest) = name.strip_prefix("crate::") {
                let root = module.split("::").next().unwrap_or(module);
                return self.get_with_type_path(&format!("{root}::{rest}"));
            }
            if let Some(meta) = self.get_with_type_path(&format!("{module}::{name}")) {
                return Some(meta);
            }
        }

        self.get_with_type_path(name)
            .or_else(|| self.get_with_type_name(name))
    }

    /// All registered metas, in no particular order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_meta_table.is_empty()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shared, lock-guarded [`TypeRegistry`].
///
/// Lock poisoning is ignored: registration never leaves the registry in a
/// partially written state.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    #[inline]
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&*self.read(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::Codec;

    mod left {
        use crate::derive::Codec;

        #[derive(Codec)]
        #[codec(auto_register = false)]
        pub struct Node {
            pub id: i64,
        }
    }

    mod right {
        use crate::derive::Codec;

        #[derive(Codec)]
        #[codec(auto_register = false)]
        pub struct Node {
            pub next: Option<super::Leaf>,
        }
    }

    #[derive(Codec)]
    #[codec(auto_register = false)]
    pub struct Leaf;

    #[test]
    fn dependencies_are_registered() {
        let mut registry = TypeRegistry::new();
        registry.register::<right::Node>();
        assert!(registry.contains(TypeId::of::<Leaf>()));
        assert_eq!(registry.len(), 2);

        // Registering again is a no-op.
        registry.register::<right::Node>();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn short_names_become_ambiguous() {
        let mut registry = TypeRegistry::new();
        registry.register::<left::Node>();
        assert!(registry.get_with_type_name("Node").is_some());

        registry.register::<right::Node>();
        assert!(registry.is_ambiguous("Node"));
        assert!(registry.get_with_type_name("Node").is_none());
        assert!(registry.get_with_type_path(<left::Node as crate::info::TypePath>::type_path()).is_some());
    }

    #[test]
    fn resolve_relative_to_module() {
        let mut registry = TypeRegistry::new();
        registry.register::<left::Node>();
        registry.register::<right::Node>();

        let left_path = <left::Node as crate::info::TypePath>::type_path();
        let module = <left::Node as crate::info::TypePath>::module_path();

        let meta = registry.resolve_name("Node", module).unwrap();
        assert_eq!(meta.type_path(), left_path);

        let absolute = format!("::{left_path}");
        assert_eq!(registry.resolve_name(&absolute, None).unwrap().type_path(), left_path);

        // Ambiguous and not relative to any module.
        assert!(registry.resolve_name("Node", None).is_none());
        assert!(registry.resolve_name("Leaf", module).is_some());

        let crate_relative = left_path.replacen("tc_codec::", "crate::", 1);
        assert_eq!(
            registry.resolve_name(&crate_relative, module).unwrap().type_path(),
            left_path
        );
    }
}
