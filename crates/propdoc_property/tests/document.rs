use std::collections::BTreeMap;

use propdoc_property::{
    Properties, PropertyErrorKind, ValueKind, deserialize, deserialize_into, from_str,
    impl_leaf, is_structured, serialize, to_string_pretty,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Properties, Default, Debug, PartialEq, Clone)]
struct NestedObject {
    r: [i32; 3],
    s: String,
    v: Vec<i32>,
}

#[derive(Properties, Default, Debug, PartialEq, Clone)]
struct MyObject {
    a: char,
    b: i32,
    c: f32,
    d: NestedObject,
}

fn my_object() -> MyObject {
    MyObject {
        a: 'c',
        b: 1,
        c: 3.0,
        d: NestedObject {
            r: [0, 1, 2],
            s: "string".into(),
            v: vec![3, 4],
        },
    }
}

#[test]
fn example_record_document() {
    let document = serialize(&my_object()).unwrap();
    assert_eq!(
        document,
        json!({
            "a": "c",
            "b": 1,
            "c": 3.0,
            "d": { "r": [0, 1, 2], "s": "string", "v": [3, 4] },
        })
    );
}

#[test]
fn example_record_round_trip() {
    let original = my_object();
    let restored: MyObject = deserialize(&serialize(&original).unwrap()).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn pretty_text_round_trip() {
    let text = to_string_pretty(&my_object()).unwrap();
    assert!(text.starts_with("{\n    \"a\": \"c\",\n    \"b\": 1,"));
    assert!(text.contains("\n        \"s\": \"string\","));
    assert_eq!(from_str::<MyObject>(&text).unwrap(), my_object());
}

#[test]
fn extra_keys_are_ignored() {
    let mut document = serialize(&my_object()).unwrap();
    document["unknown"] = json!([1, 2, 3]);
    document["d"]["also_unknown"] = json!(null);

    assert_eq!(deserialize::<MyObject>(&document).unwrap(), my_object());
}

#[test]
fn missing_top_level_key() {
    let mut document = serialize(&my_object()).unwrap();
    document.as_object_mut().unwrap().remove("c");

    let err = deserialize::<MyObject>(&document).unwrap_err();
    assert!(err.is_missing_field());
    assert_eq!(err.path().to_string(), "c");
    assert_eq!(err.to_string(), "missing field `c` at `c`");
}

#[test]
fn null_is_not_a_default() {
    let mut document = serialize(&my_object()).unwrap();
    document["b"] = json!(null);

    let err = deserialize::<MyObject>(&document).unwrap_err();
    match err.kind() {
        PropertyErrorKind::TypeMismatch { expected, found, .. } => {
            assert_eq!(expected, "i32");
            assert_eq!(found, "null");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn array_length_must_match() {
    let mut document = serialize(&my_object()).unwrap();
    document["d"]["r"] = json!([0, 1, 2, 3]);

    let err = deserialize::<MyObject>(&document).unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(err.path().to_string(), "d.r");
}

#[test]
fn nested_record_is_updated_in_place() {
    let mut target = MyObject::default();
    target.d.v = vec![9, 9, 9];

    deserialize_into(&serialize(&my_object()).unwrap(), &mut target).unwrap();
    assert_eq!(target, my_object());
}

// -----------------------------------------------------------------------------
// Attributes

#[derive(Properties, Default, Debug, PartialEq)]
struct Renamed {
    #[properties(rename = "type")]
    kind: String,
    r#loop: bool,
    #[properties(skip)]
    cache: Vec<u8>,
}

#[test]
fn rename_and_skip() {
    let names: Vec<_> = Renamed::property_list().names().collect();
    assert_eq!(names, ["type", "loop"]);

    let value = Renamed {
        kind: "k".into(),
        r#loop: true,
        cache: vec![1, 2, 3],
    };
    let document = serialize(&value).unwrap();
    assert_eq!(document, json!({ "type": "k", "loop": true }));

    let restored: Renamed = deserialize(&document).unwrap();
    assert!(restored.cache.is_empty());
    assert_eq!(restored.kind, "k");
}

#[derive(Properties, Default, Debug, PartialEq)]
struct Empty;

#[test]
fn unit_struct_is_an_empty_object() {
    assert!(Empty::property_list().is_empty());
    assert_eq!(serialize(&Empty).unwrap(), json!({}));
    assert_eq!(deserialize::<Empty>(&json!({ "x": 1 })).unwrap(), Empty);
}

// -----------------------------------------------------------------------------
// Generics and user leaves

#[derive(Properties, Default, Debug, PartialEq)]
struct Wrapper<T> {
    label: String,
    inner: T,
}

#[test]
fn generic_records() {
    let leafy = Wrapper {
        label: "n".into(),
        inner: 5_u64,
    };
    assert_eq!(serialize(&leafy).unwrap(), json!({ "label": "n", "inner": 5 }));

    let nested = Wrapper {
        label: "o".into(),
        inner: my_object(),
    };
    let document = serialize(&nested).unwrap();
    assert_eq!(document["inner"]["d"]["v"], json!([3, 4]));
    assert_eq!(deserialize::<Wrapper<MyObject>>(&document).unwrap(), nested);

    let leaf_list = Wrapper::<u64>::property_list();
    let nested_list = Wrapper::<MyObject>::property_list();
    assert_eq!(leaf_list.get("inner").unwrap().kind(), ValueKind::Leaf);
    assert_eq!(nested_list.get("inner").unwrap().kind(), ValueKind::Structured);
}

#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Clone, Copy)]
enum Quality {
    #[default]
    Low,
    High,
}

impl_leaf!(Quality);

#[derive(Properties, Default, Debug, PartialEq)]
struct Settings {
    quality: Quality,
    limits: BTreeMap<String, u32>,
    nickname: Option<String>,
}

#[test]
fn user_leaf_types() {
    assert!(!is_structured::<Quality>());

    let mut settings = Settings {
        quality: Quality::High,
        ..Settings::default()
    };
    settings.limits.insert("fps".into(), 60);

    let document = serialize(&settings).unwrap();
    assert_eq!(
        document,
        json!({ "quality": "High", "limits": { "fps": 60 }, "nickname": null })
    );
    assert_eq!(deserialize::<Settings>(&document).unwrap(), settings);

    let err = deserialize::<Settings>(&json!({
        "quality": "Medium",
        "limits": {},
        "nickname": null,
    }))
    .unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(err.path().to_string(), "quality");
}

#[derive(Properties, Default, Debug, PartialEq)]
struct Forward {
    id: u32,
    label: String,
    inner: NestedObject,
}

#[derive(Properties, Default, Debug, PartialEq)]
struct Backward {
    inner: NestedObject,
    label: String,
    id: u32,
}

#[test]
fn declaration_order_does_not_affect_values() {
    let inner = my_object().d;
    let forward = Forward { id: 7, label: "l".into(), inner: inner.clone() };
    let backward = Backward { inner, label: "l".into(), id: 7 };

    let forward_doc = serialize(&forward).unwrap();
    let backward_doc = serialize(&backward).unwrap();
    assert_eq!(deserialize::<Forward>(&forward_doc).unwrap(), forward);
    assert_eq!(deserialize::<Backward>(&backward_doc).unwrap(), backward);

    // Object equality ignores key order.
    assert_eq!(forward_doc, backward_doc);
    assert_eq!(deserialize::<Forward>(&backward_doc).unwrap(), forward);
    assert_eq!(deserialize::<Backward>(&forward_doc).unwrap(), backward);

    let shuffled: Forward = from_str(
        r#"{ "inner": { "v": [3, 4], "s": "string", "r": [0, 1, 2] }, "id": 7, "label": "l" }"#,
    )
    .unwrap();
    assert_eq!(shuffled, forward);
}
