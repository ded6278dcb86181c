//! Items used by the code `#[derive(Codec)]` generates. Not public API.

#[cfg(feature = "auto_register")]
#[doc(hidden)]
pub mod auto_register {
    pub use inventory;

    use crate::registry::{GetTypeMeta, TypeRegistry};

    /// One registration function per derived type.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Provides the registration function referenced by [`__AutoRegisterFunc`].
    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: GetTypeMeta> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    pub(crate) fn register_types(registry: &mut TypeRegistry) {
        let before = registry.len();
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
        log::debug!("auto registration added {} types", registry.len() - before);
    }
}
