use std::collections::BTreeMap;

use serde_json::json;
use tc_codec::{Codec, CodecError, ErrorClass, derive::Codec};

/// @sequential
#[derive(Codec, Debug, PartialEq)]
pub struct Point {
    /// @index 0
    /// @type-signature int
    pub x: i64,
    /// @index 1
    /// @type-signature int
    pub y: i64,
}

#[derive(Codec, Debug)]
pub struct Account {
    /// @type-signature string
    /// @required
    pub name: String,
    /// @type-signature int
    /// @required create
    pub id: i64,
    /// @type-signature null|string
    pub email: Option<String>,
    /// @type-signature int
    /// @decode-alias years
    /// @decode-alias age_in_years
    pub age: i64,
    /// @type-signature bool
    pub active: bool,
    pub extra: serde_json::Value,
    secret: String,
}

#[derive(Codec, Debug)]
pub struct Lists {
    /// @type-signature int[]
    pub numbers: Vec<i64>,
    /// @type-signature int[]
    pub by_name: BTreeMap<String, Option<i64>>,
    /// @type-signature Point[]
    pub points: Vec<Point>,
}

#[derive(Codec, Debug)]
pub struct Embedded {
    /// @type-signature null|Point
    /// @decode-as-embedded-value
    pub origin: Option<Point>,
}

/// The signature says string, the field is an integer.
#[derive(Codec, Debug)]
pub struct Wrong {
    /// @type-signature string
    pub value: i64,
}

fn codec() -> Codec {
    Codec::new()
}

#[test]
fn coerces_scalars_and_follows_aliases() {
    let account: Account = codec()
        .deserialize_new(
            &json!({
                "name": 42,
                "id": "7",
                "years": "30",
                "age_in_years": 99,
                "active": "yes",
                "extra": {"anything": [1, 2]},
            }),
            "",
        )
        .unwrap();

    assert_eq!(account.name, "42");
    assert_eq!(account.id, 7);
    // The first alias present wins over later aliases and the field name.
    assert_eq!(account.age, 30);
    assert!(account.active);
    assert_eq!(account.extra, json!({"anything": [1, 2]}));
    assert_eq!(account.email, None);
    assert_eq!(account.secret, "");
}

#[test]
fn name_is_the_last_candidate() {
    let account: Account = codec()
        .deserialize_new(&json!({"name": "a", "age": 5, "age_in_years": 6}), "")
        .unwrap();
    assert_eq!(account.age, 6);

    let account: Account = codec()
        .deserialize_new(&json!({"name": "a", "age": 5}), "")
        .unwrap();
    assert_eq!(account.age, 5);
}

#[test]
fn null_aliases_fall_through() {
    let account: Account = codec()
        .deserialize_new(&json!({"name": "a", "years": null, "age": 5}), "")
        .unwrap();
    assert_eq!(account.age, 5);

    // Only null candidates: the null is decoded and rejected.
    let err = codec()
        .deserialize_new::<Account>(&json!({"name": "a", "years": null, "age": null}), "")
        .unwrap_err();
    assert!(matches!(err, CodecError::NullNotAllowed { ref field, .. } if &**field == "age"));
}

#[test]
fn required_is_scoped_by_context() {
    let codec = codec();

    let err = codec
        .deserialize_new::<Account>(&json!({"id": 1}), "")
        .unwrap_err();
    assert!(matches!(err, CodecError::MissingRequired { ref field, .. } if &**field == "name"));
    assert_eq!(err.class(), ErrorClass::Required);

    // `id` is only required in `create`.
    assert!(codec.deserialize_new::<Account>(&json!({"name": "a"}), "update").is_ok());
    let err = codec
        .deserialize_new::<Account>(&json!({"name": "a"}), "create")
        .unwrap_err();
    assert!(matches!(err, CodecError::MissingRequired { ref field, .. } if &**field == "id"));

    // Present but null does not satisfy a requirement.
    let err = codec
        .deserialize_new::<Account>(&json!({"name": null}), "")
        .unwrap_err();
    assert!(matches!(err, CodecError::MissingRequired { .. }));
}

#[test]
fn nullability() {
    let codec = codec();

    let account: Account = codec
        .deserialize_new(&json!({"name": "a", "email": null}), "")
        .unwrap();
    assert_eq!(account.email, None);

    let err = codec
        .deserialize_new::<Account>(&json!({"name": "a", "age": null}), "")
        .unwrap_err();
    assert!(matches!(err, CodecError::NullNotAllowed { ref field, .. } if &**field == "age"));
}

#[test]
fn failed_coercion() {
    let err = codec()
        .deserialize_new::<Account>(&json!({"name": "a", "age": "old"}), "")
        .unwrap_err();
    assert!(matches!(err, CodecError::Coercion { ref field, .. } if &**field == "age"));
    assert_eq!(err.class(), ErrorClass::Coercion);
}

#[test]
fn absent_fields_keep_their_value() {
    let codec = codec();
    let mut account: Account = codec
        .deserialize_new(&json!({"name": "a", "age": 3}), "")
        .unwrap();

    codec.deserialize(&mut account, &json!({"name": "b"}), "").unwrap();
    assert_eq!(account.name, "b");
    assert_eq!(account.age, 3);
}

#[test]
fn typed_lists() {
    let codec = codec();

    let lists: Lists = codec
        .deserialize_new(
            &json!({
                "numbers": ["1", "2", "3"],
                "by_name": {"a": "4", "b": null},
                "points": [[1, 2], {"0": 3, "1": 4}],
            }),
            "",
        )
        .unwrap();
    assert_eq!(lists.numbers, [1, 2, 3]);
    assert_eq!(lists.by_name["a"], Some(4));
    assert_eq!(lists.by_name["b"], None);
    assert_eq!(lists.points, [Point { x: 1, y: 2 }, Point { x: 3, y: 4 }]);

    // A string holding a JSON list.
    let lists: Lists = codec
        .deserialize_new(&json!({"numbers": "[1,2,3]"}), "")
        .unwrap();
    assert_eq!(lists.numbers, [1, 2, 3]);

    let err = codec
        .deserialize_new::<Lists>(&json!({"numbers": 5}), "")
        .unwrap_err();
    assert!(matches!(err, CodecError::ExpectedContainer { .. }));
}

#[test]
fn sequential_positions() {
    let codec = codec();

    let point: Point = codec.deserialize_new(&json!([5, "6", "ignored"]), "").unwrap();
    assert_eq!(point, Point { x: 5, y: 6 });

    let err = codec
        .deserialize_new::<Point>(&json!({"x": 1, "y": 2}), "")
        .unwrap_err();
    assert!(matches!(
        err,
        CodecError::ShapeMismatch {
            expected: tc_codec::Shape::Positional,
            ..
        }
    ));

    let err = codec
        .deserialize_new::<Account>(&json!(["a"]), "")
        .unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch { .. }));

    let err = codec.deserialize_new::<Point>(&json!(12), "").unwrap_err();
    assert!(matches!(err, CodecError::InvalidInput { .. }));
    assert_eq!(err.class(), ErrorClass::Shape);
}

#[test]
fn embedded_values() {
    let codec = codec();

    let embedded: Embedded = codec
        .deserialize_new(&json!({"origin": "[1, 2]"}), "")
        .unwrap();
    assert_eq!(embedded.origin, Some(Point { x: 1, y: 2 }));

    let embedded: Embedded = codec
        .deserialize_new(&json!({"origin": "null"}), "")
        .unwrap();
    assert_eq!(embedded.origin, None);

    let embedded: Embedded = codec.deserialize_new(&json!({"origin": null}), "").unwrap();
    assert_eq!(embedded.origin, None);

    let err = codec
        .deserialize_new::<Embedded>(&json!({"origin": "[1, 2"}), "")
        .unwrap_err();
    assert!(matches!(err, CodecError::Coercion { .. }));
}

#[test]
fn field_type_mismatch() {
    let err = codec()
        .deserialize_new::<Wrong>(&json!({"value": 1}), "")
        .unwrap_err();
    assert!(matches!(err, CodecError::SlotMismatch { .. }));
}

#[test]
fn from_text() {
    let codec = codec();
    let mut point = Point { x: 0, y: 0 };

    codec.deserialize_str(&mut point, "[3, 4]", "").unwrap();
    assert_eq!(point, Point { x: 3, y: 4 });

    let err = codec.deserialize_str(&mut point, "[3, ", "").unwrap_err();
    assert!(matches!(err, CodecError::InvalidInput { .. }));
}
