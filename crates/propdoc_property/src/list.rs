use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::type_name;
use core::fmt;
use core::slice::Iter;

use crate::{Property, PropertyError};

// -----------------------------------------------------------------------------
// Properties

/// A record type with a declared property list.
///
/// Usually implemented with [`#[derive(Properties)]`](crate::derive::Properties).
/// Every `Properties` type is also a [`PropertyValue`](crate::PropertyValue)
/// of kind [`Structured`](crate::ValueKind::Structured), which is what makes
/// nested records recurse.
///
/// # Manually Impl
///
/// The list must be built once and live for the rest of the process.
/// [`PropertyListCell`] covers non-generic types and
/// [`GenericPropertyListCell`] covers generic ones.
///
/// ```
/// use propdoc_property::{Properties, PropertyList, PropertyListCell, property};
///
/// #[derive(Default)]
/// struct Nested {
///     r: [i32; 3],
///     s: String,
/// }
///
/// impl Properties for Nested {
///     fn property_list() -> &'static PropertyList<Self> {
///         static CELL: PropertyListCell<Nested> = PropertyListCell::new();
///         CELL.get_or_init(|| PropertyList::new([
///             property!(Nested, r),
///             property!(Nested, s as "text"),
///         ]))
///     }
/// }
///
/// let names: Vec<_> = Nested::property_list().names().collect();
/// assert_eq!(names, ["r", "text"]);
/// ```
///
/// [`PropertyListCell`]: crate::PropertyListCell
/// [`GenericPropertyListCell`]: crate::GenericPropertyListCell
pub trait Properties: Default + 'static {
    /// Returns the type's property list.
    fn property_list() -> &'static PropertyList<Self>;
}

// -----------------------------------------------------------------------------
// PropertyList

/// The ordered, uniquely named properties of record type `R`.
///
/// Declared order is the key emission order of serialization and the
/// visiting order of deserialization.
pub struct PropertyList<R: 'static> {
    properties: Box<[Property<R>]>,
}

impl<R: 'static> PropertyList<R> {
    /// Builds a list, rejecting duplicate names.
    ///
    /// # Examples
    ///
    /// ```
    /// use propdoc_property::{PropertyList, property};
    ///
    /// #[derive(Default)]
    /// struct Pair { a: u8, b: u8 }
    ///
    /// let err = PropertyList::try_new([
    ///     property!(Pair, a as "x"),
    ///     property!(Pair, b as "x"),
    /// ]).unwrap_err();
    ///
    /// assert!(err.to_string().ends_with("declares `x` twice"));
    /// ```
    pub fn try_new(
        properties: impl IntoIterator<Item = Property<R>>,
    ) -> Result<Self, PropertyError> {
        let properties: Vec<Property<R>> = properties.into_iter().collect();

        for (idx, property) in properties.iter().enumerate() {
            let name = property.name();
            if properties[..idx].iter().any(|prev| prev.name() == name) {
                return Err(PropertyError::duplicate_field(type_name::<R>(), name));
            }
        }

        Ok(Self {
            properties: properties.into_boxed_slice(),
        })
    }

    /// Builds a list.
    ///
    /// # Panics
    ///
    /// Panics if two properties share a name. See [`try_new`](Self::try_new).
    pub fn new(properties: impl IntoIterator<Item = Property<R>>) -> Self {
        match Self::try_new(properties) {
            Ok(list) => list,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns the name of the record type, as given by [`type_name`].
    #[inline]
    pub fn type_path(&self) -> &'static str {
        type_name::<R>()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates the properties in declared order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, Property<R>> {
        self.properties.iter()
    }

    /// Iterates the property names in declared order.
    #[inline]
    pub fn names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.properties.iter().map(Property::name)
    }

    /// Returns the property with the given name.
    pub fn get(&self, name: &str) -> Option<&Property<R>> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Returns the property at `index` in declared order.
    #[inline]
    pub fn get_at(&self, index: usize) -> Option<&Property<R>> {
        self.properties.get(index)
    }

    /// Returns the declared position of the named property.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name() == name)
    }
}

impl<'a, R: 'static> IntoIterator for &'a PropertyList<R> {
    type Item = &'a Property<R>;
    type IntoIter = Iter<'a, Property<R>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R: 'static> fmt::Debug for PropertyList<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyList")
            .field("type", &self.type_path())
            .field("properties", &self.properties)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// property!

/// Declares one [`Property`] of a hand-written list.
///
/// `property!(Type, field)` names the property after the field;
/// `property!(Type, field as "name")` renames it.
///
/// See [`Properties`] for a complete example.
#[macro_export]
macro_rules! property {
    ($record:ty, $field:ident) => {
        $crate::property!($record, $field as ::core::stringify!($field))
    };
    ($record:ty, $field:ident as $name:expr) => {
        $crate::Property::new($crate::FieldDescriptor::new(
            $name,
            |record: &$record| &record.$field,
            |record: &mut $record| &mut record.$field,
        ))
    };
}
