use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::info::{TypeSource, Typed};
use crate::object::{Blank, Object};

use super::TypeRegistry;

/// Runtime storage for a registered type: its identity, static source, and
/// a constructor returning a [`Blank`] instance.
#[derive(Clone, Copy)]
pub struct TypeMeta {
    type_id: TypeId,
    source: &'static TypeSource,
    construct: fn() -> Box<dyn Object>,
}

impl TypeMeta {
    /// The meta of `T`.
    pub fn of<T: Typed + Object + Blank>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            source: T::type_source(),
            construct: || Box::new(T::blank()),
        }
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

    /// A new blank instance. No user constructor or `Default` impl runs.
    #[inline]
    pub fn construct(&self) -> Box<dyn Object> {
        (self.construct)()
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path())
            .finish_non_exhaustive()
    }
}

/// Types that can be added to a [`TypeRegistry`].
///
/// Implemented by `#[derive(Codec)]`, which registers the object types
/// reachable through the public fields as dependencies.
pub trait GetTypeMeta: Typed + Object + Blank + Sized {
    #[inline]
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }

    /// Register the types of the public fields.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
