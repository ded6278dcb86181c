//! Declarative metadata: the `@tag value` parser and its caches.
//!
//! Tags are read from the doc text that `#[derive(Codec)]` records for a type
//! and for each public field. Parsing happens once per key; the parsed
//! [`Tags`] are kept in a [`MetaCache`].

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod file_cache;
mod parser;
mod tags;

// -----------------------------------------------------------------------------
// Exports

pub use cache::{LocalMetaCache, MetaCache, NoopMetaCache, field_key, type_key};
pub use file_cache::FileMetaCache;
pub use parser::parse_tags;
pub use tags::{Tags, tag};

pub(crate) use cache::cached_tags;
