use alloc::string::String;

use serde_json::{Map, Value};

use crate::{Properties, PropertyError};

/// Serializes a record into a document object.
///
/// Each property becomes one key, in declared order. Structured fields
/// become nested objects and leaf fields are converted by the document
/// model.
///
/// # Examples
///
/// ```
/// use propdoc_property::{Properties, serialize};
/// use serde_json::json;
///
/// #[derive(Properties, Default)]
/// struct Inner { v: Vec<i32> }
///
/// #[derive(Properties, Default)]
/// struct Outer { b: i32, d: Inner }
///
/// let outer = Outer { b: 1, d: Inner { v: vec![3, 4] } };
/// assert_eq!(serialize(&outer).unwrap(), json!({ "b": 1, "d": { "v": [3, 4] } }));
/// ```
pub fn serialize<R: Properties>(record: &R) -> Result<Value, PropertyError> {
    let mut object = Map::new();
    serialize_into(record, &mut object)?;
    Ok(Value::Object(object))
}

/// Writes the properties of `record` into an existing object.
///
/// Existing keys with the same name are overwritten. On error, the
/// properties visited before the failing one have already been written.
pub fn serialize_into<R: Properties>(
    record: &R,
    object: &mut Map<String, Value>,
) -> Result<(), PropertyError> {
    for property in R::property_list() {
        let name = property.name();
        let node = property.encode(record).map_err(|err| err.at_field(name))?;
        object.insert(String::from(name), node);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use serde_json::{Map, Value, json};

    use crate::{Properties, PropertyErrorKind, serialize, serialize_into};

    #[derive(Properties, Default)]
    struct Leafy {
        z: u8,
        a: String,
        m: Option<f64>,
    }

    #[derive(Properties, Default)]
    struct Tree {
        name: String,
        left: Leafy,
        items: Vec<u16>,
    }

    #[test]
    #[cfg(feature = "preserve_order")]
    fn keys_follow_declared_order() {
        let value = serialize(&Leafy::default()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn nested_records_become_objects() {
        let tree = Tree {
            name: String::from("root"),
            left: Leafy { z: 9, a: String::from("x"), m: Some(0.5) },
            items: vec![1, 2],
        };
        assert_eq!(
            serialize(&tree).unwrap(),
            json!({
                "name": "root",
                "left": { "z": 9, "a": "x", "m": 0.5 },
                "items": [1, 2],
            })
        );
    }

    #[test]
    fn into_existing_object() {
        let mut object = Map::new();
        object.insert(String::from("extra"), Value::Bool(true));
        object.insert(String::from("z"), json!("replaced"));

        serialize_into(&Leafy::default(), &mut object).unwrap();

        assert_eq!(object["extra"], json!(true));
        assert_eq!(object["z"], json!(0));
        assert_eq!(object["m"], Value::Null);
    }

    #[derive(Properties, Default, Debug, PartialEq)]
    struct Reading {
        value: f64,
        trend: Vec<f32>,
    }

    #[test]
    fn non_finite_floats_are_unrepresentable() {
        let err = serialize(&Reading { value: f64::INFINITY, trend: vec![] }).unwrap_err();
        assert!(matches!(err.kind(), PropertyErrorKind::Unrepresentable { .. }));
        assert_eq!(err.path().to_string(), "value");

        let err = serialize(&Reading { value: 0.0, trend: vec![1.0, f32::NAN] }).unwrap_err();
        assert_eq!(err.path().to_string(), "trend[1]");
    }

    #[test]
    fn large_finite_floats_round_trip() {
        let reading = Reading { value: f64::MAX, trend: vec![f32::MIN, f32::EPSILON] };
        let restored: Reading = crate::deserialize(&serialize(&reading).unwrap()).unwrap();
        assert_eq!(restored, reading);
    }
}
