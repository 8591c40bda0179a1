use alloc::boxed::Box;
use core::any::{TypeId, type_name};
use core::fmt;

use serde_json::Value;

use crate::{FieldDescriptor, PropertyError, PropertyRegistry, PropertyValue, ValueKind};

// -----------------------------------------------------------------------------
// Erased descriptor

trait ErasedProperty<R>: Send + Sync {
    fn name(&self) -> &'static str;
    fn kind(&self) -> ValueKind;
    fn field_type_id(&self) -> TypeId;
    fn field_type_path(&self) -> &'static str;
    fn encode(&self, record: &R) -> Result<Value, PropertyError>;
    fn decode(&self, record: &mut R, node: &Value) -> Result<(), PropertyError>;
    fn register_dependencies(&self, registry: &mut PropertyRegistry);
}

impl<R: 'static, F: PropertyValue> ErasedProperty<R> for FieldDescriptor<R, F> {
    #[inline]
    fn name(&self) -> &'static str {
        FieldDescriptor::name(self)
    }

    #[inline]
    fn kind(&self) -> ValueKind {
        F::KIND
    }

    #[inline]
    fn field_type_id(&self) -> TypeId {
        TypeId::of::<F>()
    }

    #[inline]
    fn field_type_path(&self) -> &'static str {
        type_name::<F>()
    }

    fn encode(&self, record: &R) -> Result<Value, PropertyError> {
        self.get(record).to_node()
    }

    fn decode(&self, record: &mut R, node: &Value) -> Result<(), PropertyError> {
        self.get_mut(record).update_from_node(node)
    }

    fn register_dependencies(&self, registry: &mut PropertyRegistry) {
        F::register_dependencies(registry);
    }
}

// -----------------------------------------------------------------------------
// Property

/// One entry of a [`PropertyList`](crate::PropertyList): a
/// [`FieldDescriptor`] with its field type erased.
///
/// The field type's [`ValueKind`] is captured at construction, so the
/// structured/leaf decision for this property never changes afterwards.
pub struct Property<R: 'static> {
    inner: Box<dyn ErasedProperty<R>>,
}

impl<R: 'static> Property<R> {
    /// Erases the field type of `descriptor`.
    #[inline]
    pub fn new<F: PropertyValue>(descriptor: FieldDescriptor<R, F>) -> Self {
        Self {
            inner: Box::new(descriptor),
        }
    }

    /// Returns the property name, which is also the document key.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Returns how the field's type is carried into the document.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.inner.kind()
    }

    /// Returns `true` if the field's type has its own property list.
    #[inline]
    pub fn is_structured(&self) -> bool {
        self.inner.kind() == ValueKind::Structured
    }

    /// Returns the [`TypeId`] of the field's type.
    #[inline]
    pub fn field_type_id(&self) -> TypeId {
        self.inner.field_type_id()
    }

    /// Returns the name of the field's type, as given by [`type_name`].
    #[inline]
    pub fn field_type_path(&self) -> &'static str {
        self.inner.field_type_path()
    }

    /// Reads the field of `record` and converts it into a document node.
    #[inline]
    pub fn encode(&self, record: &R) -> Result<Value, PropertyError> {
        self.inner.encode(record)
    }

    /// Writes the field of `record` from a document node.
    #[inline]
    pub fn decode(&self, record: &mut R, node: &Value) -> Result<(), PropertyError> {
        self.inner.decode(record, node)
    }

    #[inline]
    pub(crate) fn register_dependencies(&self, registry: &mut PropertyRegistry) {
        self.inner.register_dependencies(registry);
    }
}

impl<R: 'static> fmt::Debug for Property<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("type", &self.field_type_path())
            .finish()
    }
}

impl<R: 'static, F: PropertyValue> From<FieldDescriptor<R, F>> for Property<R> {
    #[inline]
    fn from(descriptor: FieldDescriptor<R, F>) -> Self {
        Self::new(descriptor)
    }
}
