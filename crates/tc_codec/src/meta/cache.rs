use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use std::sync::{PoisonError, RwLock};

use tc_utils::hash::HashMap;

use super::Tags;

// -----------------------------------------------------------------------------
// Keys

/// Cache key of the tags attached to a type.
#[inline]
pub fn type_key(type_path: &str) -> String {
    format!("anno_class_{type_path}")
}

/// Cache key of the tags attached to one field of a type.
#[inline]
pub fn field_key(type_path: &str, field: &str) -> String {
    format!("anno_prop_{type_path}::{field}")
}

// -----------------------------------------------------------------------------
// MetaCache

/// A store for parsed [`Tags`], keyed by [`type_key`] / [`field_key`].
///
/// Implementations are shared between threads. Two threads may parse and
/// [`set`](MetaCache::set) the same key concurrently; since both store equal
/// values, the last write simply wins.
pub trait MetaCache: Send + Sync + 'static {
    /// Whether `key` holds a value.
    fn exists(&self, key: &str) -> bool;

    /// The value stored under `key`.
    fn get(&self, key: &str) -> Option<Tags>;

    /// Store `tags` under `key`, replacing any previous value.
    fn set(&self, key: &str, tags: Tags);
}

// -----------------------------------------------------------------------------
// LocalMetaCache

/// In-process [`MetaCache`], empty at startup.
#[derive(Default)]
pub struct LocalMetaCache {
    entries: RwLock<HashMap<Box<str>, Tags>>,
}

impl LocalMetaCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl MetaCache for LocalMetaCache {
    fn exists(&self, key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn get(&self, key: &str) -> Option<Tags> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, tags: Tags) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), tags);
    }
}

impl core::fmt::Debug for LocalMetaCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set()
            .entries(
                self.entries
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .keys(),
            )
            .finish()
    }
}

// -----------------------------------------------------------------------------
// NoopMetaCache

/// A [`MetaCache`] that stores nothing; tags are parsed on every lookup.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetaCache;

impl MetaCache for NoopMetaCache {
    #[inline]
    fn exists(&self, _key: &str) -> bool {
        false
    }

    #[inline]
    fn get(&self, _key: &str) -> Option<Tags> {
        None
    }

    #[inline]
    fn set(&self, _key: &str, _tags: Tags) {}
}

// -----------------------------------------------------------------------------
// Lookup

/// Tags for `key`, parsing `text` and storing the result on a miss.
pub(crate) fn cached_tags(cache: &dyn MetaCache, key: &str, text: &str) -> Tags {
    if cache.exists(key)
        && let Some(tags) = cache.get(key)
    {
        return tags;
    }

    log::trace!("metadata cache miss for `{key}`");
    let tags = super::parse_tags(text);
    cache.set(key, tags.clone());
    tags
}
