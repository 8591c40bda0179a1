//! The textual form of documents.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{Properties, PropertyError};

/// Serializes a record into compact JSON text.
pub fn to_string<R: Properties>(record: &R) -> Result<String, PropertyError> {
    let value = crate::serialize(record)?;
    Ok(value.to_string())
}

/// Serializes a record into JSON text indented by four spaces.
///
/// # Examples
///
/// ```
/// use propdoc_property::{Properties, to_string_pretty};
///
/// #[derive(Properties, Default)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string_pretty(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(text, "{\n    \"x\": 1,\n    \"y\": 2\n}");
/// ```
pub fn to_string_pretty<R: Properties>(record: &R) -> Result<String, PropertyError> {
    let value = crate::serialize(record)?;
    document_to_string_pretty(&value)
}

/// Writes an already serialized document as JSON text indented by four
/// spaces.
pub fn document_to_string_pretty(value: &Value) -> Result<String, PropertyError> {
    let mut buffer = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|err| PropertyError::unrepresentable(err.to_string()))?;

    String::from_utf8(buffer).map_err(|err| PropertyError::unrepresentable(err.to_string()))
}

/// Parses JSON text and builds a record from it.
///
/// Malformed text fails with [`Parse`](crate::PropertyErrorKind::Parse);
/// otherwise this behaves like [`deserialize`](crate::deserialize).
pub fn from_str<R: Properties>(text: &str) -> Result<R, PropertyError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| PropertyError::parse(err.to_string()))?;
    crate::deserialize(&value)
}
