//! Containers for the process-wide storage of property lists.
//!
//! A property list is built on first use and never mutated or dropped
//! afterwards, so the engines can hold `&'static` references to it.
//!
//! ## PropertyListCell
//!
//! For non-generic records. A thin wrapper around [`OnceLock`].
//!
//! ## GenericPropertyListCell
//!
//! A `static` inside a generic function is shared by every instantiation,
//! so a generic record's cell maps [`TypeId`] to a leaked list behind a
//! [`RwLock`].

use alloc::boxed::Box;
use core::any::{Any, TypeId, type_name};
use std::sync::{OnceLock, PoisonError, RwLock};

use foldhash::fast::FixedState;
use hashbrown::HashMap;

use crate::PropertyList;

// -----------------------------------------------------------------------------
// PropertyListCell

/// Static storage of the property list of a non-generic record type.
///
/// ## Example
///
/// ```
/// use propdoc_property::{Properties, PropertyList, PropertyListCell, property};
///
/// #[derive(Default)]
/// struct A { a: u32 }
///
/// impl Properties for A {
///     fn property_list() -> &'static PropertyList<Self> {
///         static CELL: PropertyListCell<A> = PropertyListCell::new();
///         CELL.get_or_init(|| PropertyList::new([property!(A, a)]))
///     }
/// }
///
/// assert!(core::ptr::eq(A::property_list(), A::property_list()));
/// ```
pub struct PropertyListCell<R: 'static>(OnceLock<PropertyList<R>>);

impl<R: 'static> PropertyListCell<R> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored list, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> PropertyList<R>) -> &PropertyList<R> {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericPropertyListCell

type ErasedList = &'static (dyn Any + Send + Sync);

/// Static storage of the property lists of a generic record type.
///
/// ## Example
///
/// ```
/// use propdoc_property::{
///     GenericPropertyListCell, Properties, PropertyList, PropertyValue, property,
/// };
///
/// #[derive(Default)]
/// struct Wrapper<T> { inner: T }
///
/// impl<T: PropertyValue + Default> Properties for Wrapper<T> {
///     fn property_list() -> &'static PropertyList<Self> {
///         static CELL: GenericPropertyListCell = GenericPropertyListCell::new();
///         CELL.get_or_insert::<Self>(|| PropertyList::new([property!(Self, inner)]))
///     }
/// }
///
/// let a = Wrapper::<u8>::property_list();
/// let b = Wrapper::<String>::property_list();
/// assert_eq!(a.get("inner").unwrap().field_type_path(), "u8");
/// assert!(b.get("inner").unwrap().field_type_path().ends_with("String"));
/// ```
pub struct GenericPropertyListCell(RwLock<HashMap<TypeId, ErasedList, FixedState>>);

impl GenericPropertyListCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(HashMap::with_hasher(FixedState::with_seed(0))))
    }

    /// Returns the list of record type `R`, building it with `f` on first access.
    ///
    /// `f` runs outside the lock; if two threads race, one list is kept and
    /// the other dropped.
    pub fn get_or_insert<R: 'static>(
        &self,
        f: impl FnOnce() -> PropertyList<R>,
    ) -> &'static PropertyList<R> {
        let type_id = TypeId::of::<R>();
        let erased = match self.get_by_type_id(type_id) {
            Some(erased) => erased,
            None => self.insert_by_type_id(type_id, Box::new(f())),
        };

        match erased.downcast_ref::<PropertyList<R>>() {
            Some(list) => list,
            None => unreachable!(
                "property list stored under the TypeId of `{}` has another type",
                type_name::<R>()
            ),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<ErasedList> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, list: Box<dyn Any + Send + Sync>) -> ErasedList {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| &*Box::leak(list))
    }
}
