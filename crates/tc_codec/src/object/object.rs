use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::info::TypeSource;

use super::Slot;

/// A derived type whose public fields are reachable by name.
///
/// Implemented by `#[derive(Codec)]`; only public fields are exposed.
///
/// ```
/// use tc_codec::{Object, derive::Codec};
///
/// #[derive(Codec)]
/// pub struct Tag {
///     pub label: String,
///     hidden: u32,
/// }
///
/// let tag = Tag { label: "a".into(), hidden: 7 };
/// let object: &dyn Object = &tag;
///
/// assert!(object.field("label").is_some());
/// assert!(object.field("hidden").is_none());
/// assert!(object.downcast_ref::<Tag>().is_some());
/// # let _ = tag.hidden;
/// ```
pub trait Object: Slot {
    /// The static source of the concrete type.
    fn reflect_source(&self) -> &'static TypeSource;

    /// The public field `name`.
    fn field(&self, name: &str) -> Option<&dyn Slot>;

    /// The public field `name`, mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Slot>;
}

impl dyn Object {
    /// The [`TypeId`] of the concrete type.
    #[inline]
    pub fn object_type_id(&self) -> TypeId {
        let any: &dyn Any = self;
        any.type_id()
    }

    #[inline]
    pub fn is<T: Object>(&self) -> bool {
        self.object_type_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }

    /// Take the concrete value out of the box.
    pub fn downcast<T: Object>(self: Box<Self>) -> Result<Box<T>, Box<dyn Any>> {
        let any: Box<dyn Any> = self;
        any.downcast()
    }
}
