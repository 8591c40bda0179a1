#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Inside this crate the derive must expand to `crate`, in doc tests to
// `propdoc_property`. `macro_utils::Manifest` can only pick one path, so
// `propdoc_property` is made an alias for `crate`.
extern crate self as propdoc_property;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod de;
mod descriptor;
mod error;
mod list;
mod property;
mod registry;
mod ser;
mod text;
mod value;

pub mod leaf;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use propdoc_property_derive as derive;
pub use propdoc_property_derive::Properties;

pub use serde_json;

pub use cell::{GenericPropertyListCell, PropertyListCell};
pub use de::{deserialize, deserialize_into};
pub use descriptor::FieldDescriptor;
pub use error::{FieldPath, PathSegment, PropertyError, PropertyErrorKind};
pub use leaf::Leaf;
pub use list::{Properties, PropertyList};
pub use property::Property;
pub use registry::{PropertyRegistry, Registration};
pub use ser::{serialize, serialize_into};
pub use text::{document_to_string_pretty, from_str, to_string, to_string_pretty};
pub use value::{PropertyValue, ValueKind, is_structured};

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use serde_json::json;

    use crate::{Properties, PropertyErrorKind, deserialize, is_structured, serialize};

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

    fn sample() -> MyObject {
        MyObject {
            a: 'c',
            b: 1,
            c: 3.0,
            d: NestedObject {
                r: [0, 1, 2],
                s: String::from("string"),
                v: vec![3, 4],
            },
        }
    }

    #[test]
    fn scenario_document() {
        assert_eq!(
            serialize(&sample()).unwrap(),
            json!({
                "a": "c",
                "b": 1,
                "c": 3.0,
                "d": { "r": [0, 1, 2], "s": "string", "v": [3, 4] },
            })
        );
    }

    #[test]
    fn scenario_round_trip() {
        let original = sample();
        let restored: MyObject = deserialize(&serialize(&original).unwrap()).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn structured_predicate() {
        assert!(is_structured::<MyObject>());
        assert!(is_structured::<NestedObject>());
        assert!(!is_structured::<char>());
        assert!(!is_structured::<Vec<i32>>());
    }

    #[test]
    fn nested_missing_key() {
        let mut doc = serialize(&sample()).unwrap();
        doc["d"].as_object_mut().unwrap().remove("s");

        let err = deserialize::<MyObject>(&doc).unwrap_err();
        assert_eq!(
            err.kind(),
            &PropertyErrorKind::MissingField { field: "s".into() }
        );
        assert_eq!(err.path().to_string(), "d.s");
    }

    #[test]
    fn wrong_leaf_kind() {
        let mut doc = serialize(&sample()).unwrap();
        doc["b"] = json!("one");

        let err = deserialize::<MyObject>(&doc).unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(err.path().to_string(), "b");
    }
}
