use core::fmt;

// -----------------------------------------------------------------------------
// FieldDescriptor

/// A named, typed handle to field `F` of record type `R`.
///
/// The accessors are plain function pointers, so a descriptor is `Copy`,
/// `Send` and `Sync` whatever `R` and `F` are, and it is bound to exactly
/// one field for its whole life.
///
/// The name is not validated; empty names are accepted. Uniqueness within
/// a record is checked by [`PropertyList`](crate::PropertyList).
///
/// # Examples
///
/// ```
/// use propdoc_property::FieldDescriptor;
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
///
/// let x = FieldDescriptor::new("x", |p: &Point| &p.x, |p: &mut Point| &mut p.x);
///
/// let mut point = Point::default();
/// x.set(&mut point, 7);
///
/// assert_eq!(x.name(), "x");
/// assert_eq!(*x.get(&point), 7);
/// assert_eq!(point.y, 0);
/// ```
pub struct FieldDescriptor<R, F> {
    name: &'static str,
    get: fn(&R) -> &F,
    get_mut: fn(&mut R) -> &mut F,
}

impl<R, F> FieldDescriptor<R, F> {
    /// Creates a descriptor from a name and a pair of accessors into the same field.
    #[inline]
    pub const fn new(
        name: &'static str,
        get: fn(&R) -> &F,
        get_mut: fn(&mut R) -> &mut F,
    ) -> Self {
        Self { name, get, get_mut }
    }

    /// Returns the property name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Borrows the field of `record`.
    #[inline]
    pub fn get<'a>(&self, record: &'a R) -> &'a F {
        (self.get)(record)
    }

    /// Mutably borrows the field of `record`.
    #[inline]
    pub fn get_mut<'a>(&self, record: &'a mut R) -> &'a mut F {
        (self.get_mut)(record)
    }

    /// Overwrites the field of `record`.
    #[inline]
    pub fn set(&self, record: &mut R, value: F) {
        *(self.get_mut)(record) = value;
    }
}

impl<R, F> Clone for FieldDescriptor<R, F> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, F> Copy for FieldDescriptor<R, F> {}

impl<R, F> fmt::Debug for FieldDescriptor<R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("record", &core::any::type_name::<R>())
            .field("field", &core::any::type_name::<F>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::FieldDescriptor;
    use alloc::string::String;

    #[derive(Default)]
    struct Named {
        label: String,
        count: u32,
    }

    const LABEL: FieldDescriptor<Named, String> =
        FieldDescriptor::new("label", |r| &r.label, |r| &mut r.label);

    #[test]
    fn const_descriptor() {
        let mut record = Named::default();
        LABEL.get_mut(&mut record).push_str("hi");
        assert_eq!(LABEL.get(&record), "hi");
        assert_eq!(record.count, 0);
    }

    #[test]
    fn copies_share_target() {
        let count = FieldDescriptor::new("count", |r: &Named| &r.count, |r: &mut Named| &mut r.count);
        let copy = count;

        let mut record = Named::default();
        count.set(&mut record, 3);
        assert_eq!(*copy.get(&record), 3);
        assert_eq!(copy.name(), "count");
    }

    #[test]
    fn empty_name_is_accepted() {
        let d = FieldDescriptor::new("", |r: &Named| &r.count, |r: &mut Named| &mut r.count);
        assert_eq!(d.name(), "");
    }
}
