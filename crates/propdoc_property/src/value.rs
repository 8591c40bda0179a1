use core::fmt;

use serde_json::{Map, Value};

use crate::{Properties, PropertyError, PropertyRegistry};

// -----------------------------------------------------------------------------
// ValueKind

/// How a field type is carried into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// The type has a property list; its fields become a nested object.
    Structured,
    /// The type is converted directly by the document model.
    Leaf,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Structured => "structured",
            Self::Leaf => "leaf",
        })
    }
}

// -----------------------------------------------------------------------------
// PropertyValue

/// A type that can be stored in a property.
///
/// Every [`Properties`] type is a `PropertyValue` with
/// [`KIND`](Self::KIND) = [`ValueKind::Structured`] through a blanket
/// implementation. Leaf types are listed in [`leaf`](crate::leaf) and
/// user types join them with [`impl_leaf!`](crate::impl_leaf).
///
/// A type is exactly one of the two: implementing both `Properties` and
/// `impl_leaf!` for one type is rejected by coherence, and a field type
/// implementing neither is rejected when the property list is declared.
pub trait PropertyValue: Sized + 'static {
    /// The dispatch key between recursion and direct conversion.
    const KIND: ValueKind;

    /// Converts the value into a document node.
    fn to_node(&self) -> Result<Value, PropertyError>;

    /// Builds a value from a document node.
    fn from_node(node: &Value) -> Result<Self, PropertyError>;

    /// Overwrites `self` from a document node.
    ///
    /// Structured values are updated field by field in place, so a failure
    /// may leave `self` partially updated.
    fn update_from_node(&mut self, node: &Value) -> Result<(), PropertyError> {
        *self = Self::from_node(node)?;
        Ok(())
    }

    /// Registers the structured types reachable from this type.
    #[inline]
    fn register_dependencies(_registry: &mut PropertyRegistry) {}
}

impl<T: Properties> PropertyValue for T {
    const KIND: ValueKind = ValueKind::Structured;

    fn to_node(&self) -> Result<Value, PropertyError> {
        let mut child = Map::new();
        crate::serialize_into(self, &mut child)?;
        Ok(Value::Object(child))
    }

    fn from_node(node: &Value) -> Result<Self, PropertyError> {
        crate::deserialize(node)
    }

    fn update_from_node(&mut self, node: &Value) -> Result<(), PropertyError> {
        crate::deserialize_into(node, self)
    }

    fn register_dependencies(registry: &mut PropertyRegistry) {
        registry.register::<T>();
    }
}

/// Returns `true` if `T` has a property list, i.e. a field of type `T` is
/// serialized by recursion rather than handed to the document model.
///
/// Evaluated at compile time.
///
/// # Examples
///
/// ```
/// use propdoc_property::{Properties, is_structured};
///
/// #[derive(Properties, Default)]
/// struct Nested { s: String }
///
/// const NESTED: bool = is_structured::<Nested>();
///
/// assert!(NESTED);
/// assert!(!is_structured::<String>());
/// assert!(!is_structured::<[i32; 3]>());
/// ```
#[inline]
pub const fn is_structured<T: PropertyValue>() -> bool {
    matches!(T::KIND, ValueKind::Structured)
}
