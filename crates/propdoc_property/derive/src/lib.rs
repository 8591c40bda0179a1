//! See [`Properties`](derive_properties).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static PROPERTIES_ATTRIBUTE_NAME: &str = "properties";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Derive Properties
///
/// `#[derive(Properties)]` implements `Properties` for a struct with named
/// fields: every field becomes a property, named after the field, in
/// declared order.
///
/// The type must implement `Default`, and every field type must implement
/// `PropertyValue`, i.e. either derive `Properties` itself (it is then
/// serialized as a nested object) or be a leaf type.
///
/// ```rust, ignore
/// #[derive(Properties, Default)]
/// struct NestedObject {
///     r: [i32; 3],
///     s: String,
///     v: Vec<i32>,
/// }
///
/// #[derive(Properties, Default)]
/// struct MyObject {
///     a: char,
///     d: NestedObject,
/// }
/// ```
///
/// Enums, unions, tuple structs and types with lifetime parameters are
/// rejected. Unit structs have an empty property list.
///
/// ## Rename
///
/// `#[properties(rename = "...")]` sets the document key of a field.
/// The name is used as given.
///
/// ```rust, ignore
/// #[derive(Properties, Default)]
/// struct A {
///     #[properties(rename = "type")]
///     kind: String,
/// }
/// ```
///
/// Two properties of one type must not share a name. This is checked after
/// renaming and reported as a compile error.
///
/// This attribute can only be applied to fields.
///
/// ## Skip
///
/// `#[properties(skip)]` leaves a field out of the property list. It is
/// neither written nor read, and keeps its `Default` value on deserialization.
///
/// ```rust, ignore
/// #[derive(Properties, Default)]
/// struct A {
///     name: String,
///     #[properties(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// This attribute can only be applied to fields.
///
/// ## Generic Types
///
/// Generic structs are supported. Each field type naming a type parameter
/// gets a `PropertyValue` bound, and each instantiation builds its own list.
///
/// ```rust, ignore
/// #[derive(Properties, Default)]
/// struct Wrapper<T> {
///     inner: T,
/// }
/// ```
///
/// ## Auto Registration
///
/// `#[properties(auto_register)]` makes `PropertyRegistry::auto_register`
/// pick the type up. It has no effect on generic types, as the concrete
/// instantiations are unknown, and is a no-op when the `auto_register`
/// feature is disabled.
///
/// ```rust, ignore
/// #[derive(Properties, Default)]
/// #[properties(auto_register)]
/// struct A { /* ... */ }
/// ```
///
/// This attribute can only be applied at the type level.
#[proc_macro_derive(Properties, attributes(properties))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_properties_impls(&ast)
}
