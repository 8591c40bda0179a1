use core::any::type_name;

use serde_json::Value;

use crate::{Properties, PropertyError};

/// Builds a record from a document object.
///
/// The record starts from [`Default`] and every declared property is then
/// read from the document. Keys that are not declared are ignored.
///
/// # Errors
///
/// - [`MissingField`]: a declared property has no key in the object.
/// - [`TypeMismatch`]: a node cannot convert to the field's type, or a
///   structured field's node is not an object.
///
/// The error path names the failing field from the top-level record down.
///
/// # Examples
///
/// ```
/// use propdoc_property::{Properties, deserialize};
/// use serde_json::json;
///
/// #[derive(Properties, Default, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = deserialize(&json!({ "x": 1, "y": 2, "z": 3 })).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
///
/// let err = deserialize::<Point>(&json!({ "x": 1 })).unwrap_err();
/// assert!(err.is_missing_field());
/// assert_eq!(err.path().to_string(), "y");
/// ```
///
/// [`MissingField`]: crate::PropertyErrorKind::MissingField
/// [`TypeMismatch`]: crate::PropertyErrorKind::TypeMismatch
pub fn deserialize<R: Properties>(node: &Value) -> Result<R, PropertyError> {
    let mut record = R::default();
    deserialize_into(node, &mut record)?;
    Ok(record)
}

/// Overwrites the properties of an existing record from a document object.
///
/// Nested records are updated in place. Properties are visited in declared
/// order and the first failure stops the walk, leaving the properties
/// visited before it already written.
pub fn deserialize_into<R: Properties>(node: &Value, record: &mut R) -> Result<(), PropertyError> {
    let Some(object) = node.as_object() else {
        return Err(PropertyError::type_mismatch(type_name::<R>(), node, None));
    };

    for property in R::property_list() {
        let name = property.name();
        match object.get(name) {
            Some(child) => property
                .decode(record, child)
                .map_err(|err| err.at_field(name))?,
            None => return Err(PropertyError::missing_field(name).at_field(name)),
        }
    }
    Ok(())
}
