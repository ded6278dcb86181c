use core::any::TypeId;

use serde_json::json;
use tc_codec::{Codec, CodecError, ErrorClass, Object, derive::Codec};

/// @subtype kind dog Dog
/// @subtype kind 2 Bird
#[derive(Codec, Debug)]
pub struct Animal {
    /// @type-signature string
    pub name: String,
}

/// @subtype breed puppy Puppy
#[derive(Codec, Debug)]
pub struct Dog {
    /// @type-signature string
    pub name: String,
    /// @type-signature string
    pub breed: String,
}

#[derive(Codec, Debug)]
pub struct Puppy {
    /// @type-signature string
    pub name: String,
    /// @type-signature int
    pub age: u8,
}

#[derive(Codec, Debug)]
pub struct Bird {
    /// @type-signature bool
    pub flies: bool,
}

#[derive(Codec)]
pub struct Zoo {
    /// @type-signature null|Animal
    pub star: Option<Box<dyn Object>>,
    /// @type-signature Animal[]
    pub residents: Vec<Box<dyn Object>>,
}

/// @subtype loop yes Pong
#[derive(Codec)]
pub struct Ping;

/// @subtype loop yes Ping
#[derive(Codec)]
pub struct Pong;

/// @subtype kind
#[derive(Codec)]
pub struct Broken {
    /// @type-signature null|Broken
    pub next: Option<Box<dyn Object>>,
}

fn codec() -> Codec {
    let codec = Codec::builder().auto_register(false).build();
    codec.register::<Animal>();
    codec.register::<Dog>();
    codec.register::<Puppy>();
    codec.register::<Bird>();
    codec.register::<Ping>();
    codec.register::<Pong>();
    codec
}

#[test]
fn two_levels_of_discrimination() {
    let codec = codec();
    let data = json!({"kind": "dog", "breed": "puppy", "name": "Rex", "age": "1"});

    assert_eq!(
        codec.resolve_subtype(TypeId::of::<Animal>(), &data).unwrap(),
        TypeId::of::<Puppy>(),
    );

    let object = codec.instantiate(TypeId::of::<Animal>(), &data, "").unwrap();
    let puppy = object.downcast_ref::<Puppy>().unwrap();
    assert_eq!(puppy.name, "Rex");
    assert_eq!(puppy.age, 1);

    let data = json!({"kind": "dog", "breed": "hound", "name": "Rex"});
    let object = codec.instantiate(TypeId::of::<Animal>(), &data, "").unwrap();
    assert_eq!(object.downcast_ref::<Dog>().unwrap().breed, "hound");

    // Numeric literals also match numeric strings.
    let data = json!({"kind": "2.0", "flies": 1});
    let object = codec.instantiate(TypeId::of::<Animal>(), &data, "").unwrap();
    assert!(object.downcast_ref::<Bird>().unwrap().flies);

    let data = json!({"kind": "cat", "name": "Tom"});
    let object = codec.instantiate(TypeId::of::<Animal>(), &data, "").unwrap();
    assert!(object.is::<Animal>());
}

#[test]
fn polymorphic_fields() {
    let codec = codec();

    let zoo: Zoo = codec
        .deserialize_new(
            &json!({
                "star": {"kind": "dog", "name": "Rex", "breed": "puppy"},
                "residents": [{"kind": 2, "flies": true}, {"name": "Generic"}],
            }),
            "",
        )
        .unwrap();

    assert!(zoo.star.as_deref().is_some_and(|star| star.is::<Puppy>()));
    assert!(zoo.residents[0].is::<Bird>());
    assert_eq!(zoo.residents[1].downcast_ref::<Animal>().unwrap().name, "Generic");

    // Encoding follows the concrete type.
    assert_eq!(
        codec.serialize(&zoo, "").unwrap(),
        json!({
            "star": {"name": "Rex", "age": 0},
            "residents": [{"flies": true}, {"name": "Generic"}],
        }),
    );
}

#[test]
fn cycles_are_errors() {
    let Err(err) = codec().instantiate(TypeId::of::<Ping>(), &json!({"loop": "yes"}), "") else {
        panic!("a subtype cycle must not resolve");
    };
    assert!(matches!(err, CodecError::SubtypeCycle { .. }));
    assert_eq!(err.class(), ErrorClass::Configuration);
}

#[test]
fn configuration_errors() {
    let codec = codec();

    let Err(err) = codec.deserialize_new::<Broken>(&json!({"next": {}}), "") else {
        panic!("a malformed rule must fail");
    };
    assert!(matches!(err, CodecError::MalformedSubtype { .. }));

    // `Zoo` is registered, its field types are not known by name.
    let codec = Codec::builder().auto_register(false).build();
    let Err(err) = codec.deserialize_new::<Zoo>(&json!({"star": {"kind": "dog"}}), "") else {
        panic!("`Animal` is not registered");
    };
    assert!(matches!(err, CodecError::UnknownType { ref name, .. } if &**name == "Animal"));

    let Err(err) = codec.instantiate(TypeId::of::<Dog>(), &json!({}), "") else {
        panic!("`Dog` is not registered");
    };
    assert!(matches!(err, CodecError::NotConstructible { .. }));

    // Once described, the type is named in the error.
    codec.type_info::<Bird>().unwrap();
    let Err(err) = codec.instantiate(TypeId::of::<Bird>(), &json!({}), "") else {
        panic!("`Bird` is not registered");
    };
    assert!(
        matches!(err, CodecError::NotConstructible { ref type_path, .. } if type_path.ends_with("::Bird"))
    );
}
