//! Runtime lookup of record types.
//!
//! The engines in this crate are statically typed: a call names its record
//! type, and a type without a property list does not compile. The
//! [`PropertyRegistry`] is the dynamic counterpart. Records are looked up by
//! [`TypeId`], type path or short type name, and values are handled as
//! `dyn Any`. Asking for an unregistered type fails with
//! [`MissingPropertyList`](crate::PropertyErrorKind::MissingPropertyList).
//!
//! ## auto_register
//!
//! See [`PropertyRegistry::auto_register`].
//!
//! The [`inventory`] crate implements the static collection. Not every
//! platform supports it; where it does not, the method returns `false`.
//!
//! [`inventory`]: https://docs.rs/inventory

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use foldhash::fast::FixedState;
use hashbrown::{HashMap, HashSet};
use serde_json::{Map, Value};

use crate::{Properties, PropertyError};

// -----------------------------------------------------------------------------
// Registration

/// The registry entry of one record type.
pub struct Registration {
    type_id: TypeId,
    type_path: &'static str,
    type_name: String,
    field_names: Box<[&'static str]>,
    serialize: fn(&dyn Any) -> Result<Value, PropertyError>,
    deserialize: fn(&Value) -> Result<Box<dyn Any>, PropertyError>,
    default: fn() -> Box<dyn Any>,
}

impl Registration {
    /// Creates the entry of record type `R`.
    pub fn of<R: Properties>() -> Self {
        let type_path = type_name::<R>();
        Self {
            type_id: TypeId::of::<R>(),
            type_path,
            type_name: short_type_name(type_path),
            field_names: R::property_list().names().collect(),
            serialize: serialize_erased::<R>,
            deserialize: deserialize_erased::<R>,
            default: default_erased::<R>,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the full type path, e.g. `my_crate::shapes::Circle`.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the type path with module paths removed, e.g. `Circle`
    /// or `Wrapper<String>`.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the property names in declared order.
    #[inline]
    pub fn field_names(&self) -> &[&'static str] {
        &self.field_names
    }

    /// Creates a default value of the type.
    #[inline]
    pub fn default_value(&self) -> Box<dyn Any> {
        (self.default)()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("type_path", &self.type_path)
            .field("field_names", &self.field_names)
            .finish_non_exhaustive()
    }
}

fn serialize_erased<R: Properties>(value: &dyn Any) -> Result<Value, PropertyError> {
    match value.downcast_ref::<R>() {
        Some(record) => crate::serialize(record),
        None => unreachable!("registration of `{}` called with another type", type_name::<R>()),
    }
}

fn deserialize_erased<R: Properties>(node: &Value) -> Result<Box<dyn Any>, PropertyError> {
    let record: R = crate::deserialize(node)?;
    Ok(Box::new(record))
}

fn default_erased<R: Properties>() -> Box<dyn Any> {
    Box::new(R::default())
}

/// `a::b::Foo<c::Bar, [d::Baz; 2]>` becomes `Foo<Bar, [Baz; 2]>`.
fn short_type_name(type_path: &str) -> String {
    let mut output = String::with_capacity(type_path.len());
    let mut segment_start = 0;
    let mut chars = type_path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                output.truncate(segment_start);
            }
            '<' | '>' | ',' | ' ' | '[' | ']' | ';' | '(' | ')' | '&' => {
                output.push(c);
                segment_start = output.len();
            }
            _ => output.push(c),
        }
    }
    output
}

// -----------------------------------------------------------------------------
// PropertyRegistry

/// A registry of record types.
///
/// # Example
///
/// ```
/// use core::any::TypeId;
/// use propdoc_property::{Properties, PropertyRegistry};
/// use serde_json::json;
///
/// #[derive(Properties, Default, Debug, PartialEq)]
/// struct Inner { s: String }
///
/// #[derive(Properties, Default, Debug, PartialEq)]
/// struct Outer { b: i32, d: Inner }
///
/// let mut registry = PropertyRegistry::new();
/// registry.register::<Outer>();
///
/// // Structured field types are registered along with the record.
/// assert!(registry.is_structured(TypeId::of::<Inner>()));
/// assert!(!registry.is_structured(TypeId::of::<i32>()));
///
/// let value = Outer { b: 1, d: Inner { s: "x".into() } };
/// let tagged = registry.serialize_tagged(&value).unwrap();
///
/// let back = registry.deserialize_tagged(&tagged).unwrap();
/// assert_eq!(back.downcast_ref::<Outer>(), Some(&value));
/// ```
pub struct PropertyRegistry {
    registrations: HashMap<TypeId, Registration, FixedState>,
    type_path_to_id: HashMap<&'static str, TypeId, FixedState>,
    type_name_to_id: HashMap<String, TypeId, FixedState>,
    ambiguous_names: HashSet<String, FixedState>,
}

impl Default for PropertyRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            registrations: HashMap::with_hasher(FixedState::with_seed(0)),
            type_path_to_id: HashMap::with_hasher(FixedState::with_seed(0)),
            type_name_to_id: HashMap::with_hasher(FixedState::with_seed(0)),
            ambiguous_names: HashSet::with_hasher(FixedState::with_seed(0)),
        }
    }

    /// Registers record type `R` if it is not registered yet, then the
    /// structured types of its fields.
    ///
    /// Registering a type twice does nothing.
    pub fn register<R: Properties>(&mut self) {
        let type_id = TypeId::of::<R>();
        if self.registrations.contains_key(&type_id) {
            return;
        }

        let registration = Registration::of::<R>();
        log::debug!(
            "registered `{}` with {} properties",
            registration.type_path,
            registration.field_names.len()
        );
        self.add_indices(&registration);
        self.registrations.insert(type_id, registration);

        for property in R::property_list() {
            property.register_dependencies(self);
        }
    }

    fn add_indices(&mut self, registration: &Registration) {
        let name = registration.type_name();

        if !self.ambiguous_names.contains(name) {
            if let Some(previous) = self.type_name_to_id.remove(name) {
                let previous_path = self
                    .registrations
                    .get(&previous)
                    .map_or("?", Registration::type_path);
                log::warn!(
                    "type name `{name}` is shared by `{previous_path}` and `{}`; \
                     look it up by type path instead",
                    registration.type_path
                );
                self.ambiguous_names.insert(String::from(name));
            } else {
                self.type_name_to_id
                    .insert(String::from(name), registration.type_id);
            }
        }

        self.type_path_to_id
            .insert(registration.type_path, registration.type_id);
    }

    /// Registers every type marked `#[properties(auto_register)]`.
    ///
    /// Equivalent to calling [`register`](Self::register) for each such
    /// type. Repeated calls are cheap.
    ///
    /// Returns `true` if static collection works on the current platform.
    /// Without the `auto_register` feature this does nothing and returns
    /// `false`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use core::any::TypeId;
    /// use propdoc_property::{Properties, PropertyRegistry};
    ///
    /// #[derive(Properties, Default)]
    /// #[properties(auto_register)]
    /// struct Foo { value: i32 }
    ///
    /// let mut registry = PropertyRegistry::new();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(TypeId::of::<Foo>()));
    /// ```
    #[inline]
    pub fn auto_register(&mut self) -> bool {
        auto_register_types(self)
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.registrations.contains_key(&type_id)
    }

    /// Returns `true` if the type is a registered record type.
    ///
    /// The runtime counterpart of [`is_structured`](crate::is_structured).
    #[inline]
    pub fn is_structured(&self, type_id: TypeId) -> bool {
        self.contains(type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&Registration> {
        self.registrations.get(&type_id)
    }

    pub fn get_with_type_path(&self, type_path: &str) -> Option<&Registration> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the registration with the given short type name.
    ///
    /// Returns `None` if the name is unknown or shared by several types.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&Registration> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if several registered types share the short type name.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Iterates the registrations in unspecified order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Registration> {
        self.registrations.values()
    }

    /// An unregistered `TypeId` carries no name, so the error reports the id.
    fn get_or_missing(&self, type_id: TypeId) -> Result<&Registration, PropertyError> {
        self.get(type_id).ok_or_else(|| {
            PropertyError::missing_property_list(format!("<unregistered type, {type_id:?}>"))
        })
    }

    /// Serializes a value of a registered record type.
    pub fn serialize_dyn(&self, value: &dyn Any) -> Result<Value, PropertyError> {
        let registration = self.get_or_missing(value.type_id())?;
        (registration.serialize)(value)
    }

    /// Builds a value of the registered record type `type_id`.
    pub fn deserialize_dyn(
        &self,
        type_id: TypeId,
        node: &Value,
    ) -> Result<Box<dyn Any>, PropertyError> {
        let registration = self.get_or_missing(type_id)?;
        (registration.deserialize)(node)
    }

    /// Serializes a value into `{ "<type path>": { ... } }`.
    pub fn serialize_tagged(&self, value: &dyn Any) -> Result<Value, PropertyError> {
        let registration = self.get_or_missing(value.type_id())?;
        let body = (registration.serialize)(value)?;

        let mut object = Map::with_capacity(1);
        object.insert(String::from(registration.type_path), body);
        Ok(Value::Object(object))
    }

    /// Builds a value from `{ "<type path>": { ... } }`.
    ///
    /// The key is resolved as a type path first, then as an unambiguous
    /// short type name.
    pub fn deserialize_tagged(&self, node: &Value) -> Result<Box<dyn Any>, PropertyError> {
        let entry = node.as_object().and_then(|object| {
            let mut entries = object.iter();
            match (entries.next(), entries.next()) {
                (Some(entry), None) => Some(entry),
                _ => None,
            }
        });
        let Some((key, body)) = entry else {
            return Err(PropertyError::type_mismatch(
                "tagged document",
                node,
                Some(String::from("expected an object with a single type key")),
            ));
        };

        let registration = self
            .get_with_type_path(key)
            .or_else(|| self.get_with_type_name(key))
            .ok_or_else(|| PropertyError::missing_property_list(key.clone()))?;

        (registration.deserialize)(body)
    }
}

#[cfg(feature = "auto_register")]
fn auto_register_types(registry: &mut PropertyRegistry) -> bool {
    use crate::__macro_exports::auto_register;

    // Reduce the cost of repeated calls.
    if registry.contains(TypeId::of::<auto_register::__AvailFlag>()) {
        return true;
    }
    auto_register::__register_types(registry);
    registry.contains(TypeId::of::<auto_register::__AvailFlag>())
}

#[cfg(not(feature = "auto_register"))]
#[inline(always)]
fn auto_register_types(_: &mut PropertyRegistry) -> bool {
    false
}

impl fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&str> = self.type_path_to_id.keys().copied().collect();
        paths.sort_unstable();
        f.debug_set().entries(paths).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use serde_json::json;

    use super::{PropertyRegistry, short_type_name};
    use crate::{Properties, PropertyErrorKind};

    mod first {
        use crate::Properties;

        #[derive(Properties, Default, Debug, PartialEq)]
        pub struct Shape {
            pub sides: u8,
        }
    }

    mod second {
        use crate::Properties;

        #[derive(Properties, Default, Debug, PartialEq)]
        pub struct Shape {
            pub radius: f32,
        }
    }

    #[derive(Properties, Default, Debug, PartialEq)]
    struct Scene {
        title: String,
        shape: first::Shape,
    }

    #[derive(Properties, Default)]
    struct Unregistered {
        x: i8,
    }

    #[test]
    fn short_names() {
        assert_eq!(short_type_name("a::b::Foo"), "Foo");
        assert_eq!(short_type_name("Foo"), "Foo");
        assert_eq!(
            short_type_name("a::Wrap<alloc::string::String, [b::C; 2]>"),
            "Wrap<String, [C; 2]>"
        );
    }

    #[test]
    fn registers_dependencies_once() {
        let mut registry = PropertyRegistry::new();
        registry.register::<Scene>();
        registry.register::<Scene>();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(TypeId::of::<first::Shape>()));
        assert!(!registry.is_structured(TypeId::of::<String>()));

        let scene = registry.get_with_type_name("Scene").unwrap();
        assert_eq!(scene.field_names(), ["title", "shape"]);
        assert_eq!(scene.type_id(), TypeId::of::<Scene>());
    }

    #[test]
    fn ambiguous_names() {
        let mut registry = PropertyRegistry::new();
        registry.register::<first::Shape>();
        assert!(registry.get_with_type_name("Shape").is_some());

        registry.register::<second::Shape>();
        assert!(registry.is_ambiguous("Shape"));
        assert!(registry.get_with_type_name("Shape").is_none());

        let path = core::any::type_name::<second::Shape>();
        assert_eq!(
            registry.get_with_type_path(path).map(|r| r.type_id()),
            Some(TypeId::of::<second::Shape>())
        );
    }

    #[test]
    fn dynamic_round_trip() {
        let mut registry = PropertyRegistry::new();
        registry.register::<Scene>();

        let scene = Scene {
            title: String::from("t"),
            shape: first::Shape { sides: 3 },
        };
        let value = registry.serialize_dyn(&scene).unwrap();
        assert_eq!(value, json!({ "title": "t", "shape": { "sides": 3 } }));

        let back = registry.deserialize_dyn(TypeId::of::<Scene>(), &value).unwrap();
        assert_eq!(back.downcast_ref::<Scene>(), Some(&scene));

        let default = registry.get(TypeId::of::<Scene>()).unwrap().default_value();
        assert_eq!(default.downcast_ref::<Scene>(), Some(&Scene::default()));
    }

    #[test]
    fn unregistered_types_fail() {
        let registry = PropertyRegistry::new();

        let err = registry.serialize_dyn(&Unregistered::default()).unwrap_err();
        assert!(err.is_missing_property_list());
        let message = err.to_string();
        assert!(message.contains("unregistered type"), "{message}");
        assert!(message.contains(&format!("{:?}", TypeId::of::<Unregistered>())), "{message}");

        let err = registry
            .deserialize_dyn(TypeId::of::<Unregistered>(), &json!({ "x": 1 }))
            .unwrap_err();
        assert!(err.is_missing_property_list());

        let err = registry.deserialize_tagged(&json!({ "nope::Nope": {} })).unwrap_err();
        assert!(matches!(
            err.kind(),
            PropertyErrorKind::MissingPropertyList { type_path } if type_path == "nope::Nope"
        ));
    }

    #[test]
    fn tagged_documents() {
        let mut registry = PropertyRegistry::new();
        registry.register::<first::Shape>();

        let tagged = registry.serialize_tagged(&first::Shape { sides: 4 }).unwrap();
        let keys: Vec<&String> = tagged.as_object().unwrap().keys().collect();
        assert_eq!(keys, [core::any::type_name::<first::Shape>()]);

        let by_name = registry.deserialize_tagged(&json!({ "Shape": { "sides": 5 } })).unwrap();
        assert_eq!(by_name.downcast_ref::<first::Shape>(), Some(&first::Shape { sides: 5 }));

        let err = registry.deserialize_tagged(&json!({ "a": {}, "b": {} })).unwrap_err();
        assert!(err.is_type_mismatch());
    }
}
