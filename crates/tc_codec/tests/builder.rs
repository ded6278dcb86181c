use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use tc_codec::meta::{FileMetaCache, LocalMetaCache, MetaCache, Tags, field_key, type_key};
use tc_codec::registry::TypeRegistry;
use tc_codec::{Codec, derive::Codec};

#[derive(Codec, Debug, PartialEq)]
#[codec(type_path = "demo::Item")]
pub struct Item {
    /// @type-signature int
    pub count: i64,
    /// @type-signature string
    pub label: String,
}

#[derive(Codec)]
#[codec(auto_register = false, doc = "@sequential")]
pub struct Pair {
    #[codec(doc = "@index 1")]
    pub left: i64,
    #[codec(doc = "@index 0")]
    pub right: i64,
}

/// Counts lookups that reach the inner cache.
#[derive(Default)]
struct Counting {
    inner: LocalMetaCache,
    sets: Arc<AtomicUsize>,
}

impl MetaCache for Counting {
    fn exists(&self, key: &str) -> bool {
        self.inner.exists(key)
    }

    fn get(&self, key: &str) -> Option<Tags> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, tags: Tags) {
        self.sets.fetch_add(1, Ordering::Relaxed);
        self.inner.set(key, tags);
    }
}

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("tc_codec_builder_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn descriptors_are_built_once() {
    let counting = Counting::default();
    let sets = counting.sets.clone();
    let codec = Codec::builder().meta_cache(counting).build();

    let item = Item {
        count: 2,
        label: "x".into(),
    };
    codec.serialize(&item, "").unwrap();
    codec.serialize(&item, "").unwrap();
    let _: Item = codec.deserialize_new(&json!({"count": "3"}), "").unwrap();

    // One entry for the type, one per field.
    assert_eq!(sets.load(Ordering::Relaxed), 3);
}

#[test]
fn file_cache_is_shared_between_codecs() {
    let dir = scratch_dir("shared");

    let first = Codec::builder().meta_cache(FileMetaCache::new(&dir)).build();
    let item: Item = first
        .deserialize_new(&json!({"count": 1, "label": "a"}), "")
        .unwrap();
    assert!(fs::read_dir(&dir).unwrap().count() >= 3);

    // Cached tags take precedence over the doc text.
    let cache = FileMetaCache::new(&dir);
    let mut tags = Tags::new();
    tags.push("type-signature", "string");
    tags.push("encode-alias", "title");
    cache.set(&field_key("demo::Item", "label"), tags);
    assert!(cache.exists(&type_key("demo::Item")));

    let second = Codec::builder().meta_cache(FileMetaCache::new(&dir)).build();
    assert_eq!(
        second.serialize(&item, "").unwrap(),
        json!({"count": 1, "title": "a"}),
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn manual_registration() {
    let mut registry = TypeRegistry::new();
    registry.register::<Pair>();

    let codec = Codec::builder()
        .registry(registry)
        .auto_register(false)
        .build();
    assert_eq!(codec.registry().read().len(), 1);

    let pair: Pair = codec.deserialize_new(&json!([1, 2]), "").unwrap();
    assert_eq!((pair.left, pair.right), (2, 1));
    assert_eq!(codec.serialize(&pair, "").unwrap(), json!([1, 2]));
}

#[test]
fn global_helpers() {
    let mut item = Item {
        count: 0,
        label: String::new(),
    };
    tc_codec::deserialize(&mut item, &json!({"count": 4, "label": 5}), "").unwrap();
    assert_eq!(
        item,
        Item {
            count: 4,
            label: "5".into(),
        }
    );
    assert_eq!(
        tc_codec::serialize(&item, "").unwrap(),
        json!({"count": 4, "label": "5"}),
    );
}
