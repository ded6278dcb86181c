use core::any::TypeId;
use std::sync::{Arc, Barrier};
use std::thread;

use serde_json::json;
use tc_codec::info::TypePath;
use tc_codec::meta::{LocalMetaCache, MetaCache, Tags, field_key, type_key};
use tc_codec::{Codec, derive::Codec};

/// @subtype kind circle Circle
#[derive(Codec, Debug)]
pub struct Shape {
    /// @type-signature string
    /// @required
    pub kind: String,
}

#[derive(Codec, Debug, PartialEq)]
pub struct Circle {
    /// @type-signature string
    pub kind: String,
    /// @type-signature float
    pub radius: f64,
}

/// Shares one `LocalMetaCache` between the codec and the test.
struct Shared(Arc<LocalMetaCache>);

impl MetaCache for Shared {
    fn exists(&self, key: &str) -> bool {
        self.0.exists(key)
    }

    fn get(&self, key: &str) -> Option<Tags> {
        self.0.get(key)
    }

    fn set(&self, key: &str, tags: Tags) {
        self.0.set(key, tags);
    }
}

const THREADS: usize = 8;

#[test]
fn first_use_from_many_threads() {
    let cache = Arc::new(LocalMetaCache::new());
    let codec = Codec::builder()
        .meta_cache(Shared(cache.clone()))
        .auto_register(false)
        .build();
    codec.register::<Shape>();
    codec.register::<Circle>();

    let start = Barrier::new(THREADS);
    thread::scope(|scope| {
        for n in 0..THREADS {
            let (codec, start) = (&codec, &start);
            scope.spawn(move || {
                start.wait();
                let data = json!({"kind": "circle", "radius": n.to_string()});

                let object = codec.instantiate(TypeId::of::<Shape>(), &data, "").unwrap();
                let circle = object.downcast_ref::<Circle>().unwrap();
                assert_eq!(circle.radius, n as f64);

                assert_eq!(
                    codec.serialize(circle, "").unwrap(),
                    json!({"kind": "circle", "radius": n as f64}),
                );
            });
        }
    });

    // Every racing writer stored the same tags.
    for key in [
        type_key(Shape::type_path()),
        field_key(Shape::type_path(), "kind"),
        type_key(Circle::type_path()),
        field_key(Circle::type_path(), "radius"),
    ] {
        assert!(cache.exists(&key), "{key}");
    }
    assert_eq!(cache.len(), 5);

    let info = codec.type_info::<Circle>().unwrap();
    assert!(Arc::ptr_eq(&info, &codec.type_info::<Circle>().unwrap()));
    assert_eq!(info.fields().len(), 2);
}
