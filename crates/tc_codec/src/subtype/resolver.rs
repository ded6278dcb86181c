use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock};

use tc_utils::TypeIdMap;

use crate::error::CodecError;
use crate::info::TypeInfo;
use crate::registry::TypeRegistry;

use super::SubtypeRule;

type RuleSet = Result<Arc<[SubtypeRule]>, CodecError>;

/// Parsed subtype rules per declaring type.
///
/// Rules are parsed on first use. A declaration that fails to parse or names
/// an unknown type makes the whole set an error, and the error is kept: the
/// type is not re-examined on later calls.
#[derive(Default)]
pub struct SubtypeResolver {
    rules: RwLock<TypeIdMap<RuleSet>>,
}

impl SubtypeResolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules declared on `owner`, in declaration order.
    pub fn rules(&self, owner: &TypeInfo, registry: &TypeRegistry) -> RuleSet {
        if let Some(cached) = self
            .rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&owner.type_id())
        {
            return cached.clone();
        }

        let parsed = owner
            .subtype_rules()
            .iter()
            .map(|declaration| SubtypeRule::parse(declaration, owner, registry))
            .collect::<Result<Arc<[_]>, _>>();
        if let Err(err) = &parsed {
            log::trace!("subtype rules of `{}` are invalid: {err}", owner.type_path());
        }

        self.rules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(owner.type_id(), parsed.clone());
        parsed
    }
}

impl core::fmt::Debug for SubtypeResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SubtypeResolver")
            .field(
                "types",
                &self.rules.read().unwrap_or_else(PoisonError::into_inner).len(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use serde_json::json;

    use super::*;
    use crate::derive::Codec;
    use crate::info::Typed;
    use crate::meta::NoopMetaCache;

    /// @subtype kind 2 Square
    /// @subtype kind circle Circle
    #[derive(Codec)]
    #[codec(auto_register = false)]
    pub struct Shape;

    #[derive(Codec)]
    #[codec(auto_register = false)]
    pub struct Square;

    #[derive(Codec)]
    #[codec(auto_register = false)]
    pub struct Circle;

    /// @subtype kind
    #[derive(Codec)]
    #[codec(auto_register = false)]
    pub struct Malformed;

    fn info<T: Typed>() -> TypeInfo {
        TypeInfo::build(TypeId::of::<T>(), T::type_source(), &NoopMetaCache).unwrap()
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register::<Shape>();
        registry.register::<Square>();
        registry.register::<Circle>();
        registry
    }

    #[test]
    fn numeric_and_string_matching() {
        let resolver = SubtypeResolver::new();
        let rules = resolver.rules(&info::<Shape>(), &registry()).unwrap();
        assert_eq!(rules.len(), 2);

        let square = &rules[0];
        assert_eq!(square.target(), TypeId::of::<Square>());
        assert!(square.matches(&json!({"kind": 2})));
        assert!(square.matches(&json!({"kind": "2.0"})));
        assert!(square.matches(&json!({"kind": 2.0})));
        assert!(!square.matches(&json!({"kind": "two"})));
        assert!(!square.matches(&json!({"other": 2})));

        let circle = &rules[1];
        assert!(circle.matches(&json!({"kind": "circle"})));
        assert!(!circle.matches(&json!({"kind": "Circle"})));
        assert!(!circle.matches(&json!({"kind": true})));
    }

    #[test]
    fn errors_are_cached() {
        let resolver = SubtypeResolver::new();

        let err = resolver.rules(&info::<Malformed>(), &registry()).unwrap_err();
        assert!(matches!(err, CodecError::MalformedSubtype { .. }));

        // Unknown target: the registry lacks `Square`.
        let mut partial = TypeRegistry::new();
        partial.register::<Circle>();
        let err = resolver.rules(&info::<Shape>(), &partial).unwrap_err();
        assert!(matches!(err, CodecError::UnknownType { ref name, .. } if &**name == "Square"));

        // Still an error once the type becomes known.
        assert!(resolver.rules(&info::<Shape>(), &registry()).is_err());
    }
}
