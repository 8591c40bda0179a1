//! Leaf types: field types handed directly to the document model.
//!
//! ## Implemented Menu
//!
//! - `()` `bool` `char`
//! - `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//! - `String`, `serde_json::Value`
//! - `Vec<T>`, `VecDeque<T>`, `BTreeSet<T>`
//! - `BTreeMap<String, T>`, `HashMap<String, T>`
//! - `Option<T>`, `[T; N]` (field types only, not elements)
//!
//! where `T` is itself a [`Leaf`]. Collections of structured records are
//! not supported.
//!
//! Containers are converted element by element, so a bad element is
//! reported with its index or key in the error path.
//!
//! ## Floats
//!
//! JSON has no infinities or NaN. Writing a non-finite `f32` or `f64` fails
//! with [`Unrepresentable`](crate::PropertyErrorKind::Unrepresentable).
//! Floats nested inside a user leaf type are converted by `serde_json`
//! itself, which writes them as `null`.
//!
//! ## Options
//!
//! `None` is written as `null` and `null` is read back as `None`. `Option`
//! is not a [`Leaf`] itself, so `Option<Option<T>>` and `Vec<Option<T>>`
//! are rejected at compile time, as `Some(None)` could not be told apart
//! from `None`:
//!
//! ```compile_fail
//! use propdoc_property::Properties;
//!
//! #[derive(Properties, Default)]
//! struct Maybe { inner: Option<Option<i32>> }
//! ```
//!
//! The same holds for leaves whose own document is `null`: a field of type
//! `Option<()>` or `Option<serde_json::Value>` holding `Some(())` or
//! `Some(Value::Null)` is read back as `None`.

use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::type_name;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{PropertyError, PropertyValue, ValueKind};

// -----------------------------------------------------------------------------
// Leaf

/// A [`PropertyValue`] converted by `serde_json` rather than by recursion.
///
/// Implement it for your own `serde` types with [`impl_leaf!`](crate::impl_leaf).
pub trait Leaf: PropertyValue + Serialize + DeserializeOwned {}

/// Converts a serializable value into a document node.
pub fn to_node<T: Serialize + ?Sized>(value: &T) -> Result<Value, PropertyError> {
    serde_json::to_value(value).map_err(|err| PropertyError::unrepresentable(err.to_string()))
}

/// Extracts a leaf value of type `T` from a document node.
///
/// Fails with a type mismatch if the node's kind cannot convert to `T`,
/// e.g. a string where a number is expected or an out-of-range integer.
pub fn from_node<T: DeserializeOwned>(node: &Value) -> Result<T, PropertyError> {
    T::deserialize(node)
        .map_err(|err| PropertyError::type_mismatch(type_name::<T>(), node, Some(err.to_string())))
}

// -----------------------------------------------------------------------------
// impl_leaf!

/// Marks types as [`Leaf`] property values.
///
/// The types must implement `serde::Serialize` and `serde::de::DeserializeOwned`
/// and must not implement [`Properties`](crate::Properties).
///
/// # Examples
///
/// ```
/// use propdoc_property::{Properties, impl_leaf, serialize};
/// use serde::{Deserialize, Serialize};
/// use serde_json::json;
///
/// #[derive(Serialize, Deserialize, Default, PartialEq, Debug)]
/// enum Mode { #[default] Fast, Slow }
///
/// impl_leaf!(Mode);
///
/// #[derive(Properties, Default)]
/// struct Config { mode: Mode }
///
/// assert_eq!(serialize(&Config::default()).unwrap(), json!({ "mode": "Fast" }));
/// ```
#[macro_export]
macro_rules! impl_leaf {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Leaf for $ty {}

            impl $crate::PropertyValue for $ty {
                const KIND: $crate::ValueKind = $crate::ValueKind::Leaf;

                #[inline]
                fn to_node(&self) -> ::core::result::Result<
                    $crate::__macro_exports::Value,
                    $crate::PropertyError,
                > {
                    $crate::leaf::to_node(self)
                }

                #[inline]
                fn from_node(node: &$crate::__macro_exports::Value) -> ::core::result::Result<
                    Self,
                    $crate::PropertyError,
                > {
                    $crate::leaf::from_node(node)
                }
            }
        )+
    };
}

impl_leaf!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    String,
    Value,
);

macro_rules! impl_float_leaf {
    ($($ty:ty),+) => {
        $(
            impl Leaf for $ty {}

            impl PropertyValue for $ty {
                const KIND: ValueKind = ValueKind::Leaf;

                fn to_node(&self) -> Result<Value, PropertyError> {
                    if !self.is_finite() {
                        return Err(PropertyError::unrepresentable(alloc::format!(
                            "`{self}` has no JSON representation"
                        )));
                    }
                    to_node(self)
                }

                #[inline]
                fn from_node(node: &Value) -> Result<Self, PropertyError> {
                    from_node(node)
                }
            }
        )+
    };
}

impl_float_leaf!(f32, f64);

// -----------------------------------------------------------------------------
// Containers

impl<T: Leaf + Ord> Leaf for BTreeSet<T> {}

impl<T: Leaf + Ord> PropertyValue for BTreeSet<T> {
    const KIND: ValueKind = ValueKind::Leaf;

    fn to_node(&self) -> Result<Value, PropertyError> {
        sequence_to_node(self.iter())
    }

    fn from_node(node: &Value) -> Result<Self, PropertyError> {
        sequence_from_node::<Self, T>(node)?.collect()
    }
}

// Not a `Leaf`: `Some(None)` and `None` would share one document.
impl<T: Leaf> PropertyValue for Option<T> {
    const KIND: ValueKind = ValueKind::Leaf;

    #[inline]
    fn to_node(&self) -> Result<Value, PropertyError> {
        match self {
            Some(value) => value.to_node(),
            None => Ok(Value::Null),
        }
    }

    #[inline]
    fn from_node(node: &Value) -> Result<Self, PropertyError> {
        match node {
            Value::Null => Ok(None),
            node => T::from_node(node).map(Some),
        }
    }
}

impl<T: Leaf> Leaf for BTreeMap<String, T> {}

impl<T: Leaf> PropertyValue for BTreeMap<String, T> {
    const KIND: ValueKind = ValueKind::Leaf;

    fn to_node(&self) -> Result<Value, PropertyError> {
        map_to_node(self.iter())
    }

    fn from_node(node: &Value) -> Result<Self, PropertyError> {
        map_from_node::<Self, T>(node)?.collect()
    }
}

impl<T: Leaf> Leaf for HashMap<String, T> {}

impl<T: Leaf> PropertyValue for HashMap<String, T> {
    const KIND: ValueKind = ValueKind::Leaf;

    fn to_node(&self) -> Result<Value, PropertyError> {
        map_to_node(self.iter())
    }

    fn from_node(node: &Value) -> Result<Self, PropertyError> {
        map_from_node::<Self, T>(node)?.collect()
    }
}

impl<T: Leaf> Leaf for Vec<T> {}

impl<T: Leaf> PropertyValue for Vec<T> {
    const KIND: ValueKind = ValueKind::Leaf;

    fn to_node(&self) -> Result<Value, PropertyError> {
        sequence_to_node(self.iter())
    }

    fn from_node(node: &Value) -> Result<Self, PropertyError> {
        sequence_from_node::<Self, T>(node)?.collect()
    }
}

impl<T: Leaf> Leaf for VecDeque<T> {}

impl<T: Leaf> PropertyValue for VecDeque<T> {
    const KIND: ValueKind = ValueKind::Leaf;

    fn to_node(&self) -> Result<Value, PropertyError> {
        sequence_to_node(self.iter())
    }

    fn from_node(node: &Value) -> Result<Self, PropertyError> {
        sequence_from_node::<Self, T>(node)?.collect()
    }
}

// `[T; N]` only implements serde's traits up to `N = 32`, so arrays are a
// `PropertyValue` but not themselves a `Leaf`.
impl<T: Leaf, const N: usize> PropertyValue for [T; N] {
    const KIND: ValueKind = ValueKind::Leaf;

    fn to_node(&self) -> Result<Value, PropertyError> {
        sequence_to_node(self.iter())
    }

    fn from_node(node: &Value) -> Result<Self, PropertyError> {
        let items = expect_array::<Self>(node)?;
        if items.len() != N {
            return Err(PropertyError::type_mismatch(
                type_name::<Self>(),
                node,
                Some(alloc::format!("expected {N} elements, found {}", items.len())),
            ));
        }

        let values = sequence_from_node::<Self, T>(node)?.collect::<Result<Vec<T>, _>>()?;
        match <[T; N]>::try_from(values) {
            Ok(array) => Ok(array),
            Err(_) => unreachable!("length was checked above"),
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn expect_array<C>(node: &Value) -> Result<&Vec<Value>, PropertyError> {
    node.as_array()
        .ok_or_else(|| PropertyError::type_mismatch(type_name::<C>(), node, None))
}

fn expect_object<C>(node: &Value) -> Result<&serde_json::Map<String, Value>, PropertyError> {
    node.as_object()
        .ok_or_else(|| PropertyError::type_mismatch(type_name::<C>(), node, None))
}

fn sequence_to_node<'a, T: Leaf>(
    items: impl Iterator<Item = &'a T>,
) -> Result<Value, PropertyError> {
    items
        .enumerate()
        .map(|(idx, item)| item.to_node().map_err(|err| err.at_index(idx)))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn map_to_node<'a, T: Leaf>(
    entries: impl Iterator<Item = (&'a String, &'a T)>,
) -> Result<Value, PropertyError> {
    let mut object = serde_json::Map::new();
    for (key, value) in entries {
        let node = value.to_node().map_err(|err| err.at_field(key.clone()))?;
        object.insert(key.clone(), node);
    }
    Ok(Value::Object(object))
}

fn map_from_node<C, T: Leaf>(
    node: &Value,
) -> Result<impl Iterator<Item = Result<(String, T), PropertyError>> + '_, PropertyError> {
    let object = expect_object::<C>(node)?;
    Ok(object.iter().map(|(key, value)| match T::from_node(value) {
        Ok(value) => Ok((key.clone(), value)),
        Err(err) => Err(err.at_field(key.clone())),
    }))
}

/// `C` names the container in the mismatch message when `node` is not an array.
fn sequence_from_node<C, T: Leaf>(
    node: &Value,
) -> Result<impl Iterator<Item = Result<T, PropertyError>> + '_, PropertyError> {
    let items = expect_array::<C>(node)?;
    Ok(items
        .iter()
        .enumerate()
        .map(|(idx, item)| T::from_node(item).map_err(|err| err.at_index(idx))))
}
