//! Provide some tools for parsing the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod properties_meta;
mod properties_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use properties_meta::PropertiesMeta;
pub(crate) use properties_struct::{PropertiesStruct, StructField};
