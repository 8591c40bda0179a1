//! Paths into `propdoc_property` used by generated code.
//!
//! Kept in one module so a change of the runtime crate's layout only
//! touches this file.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the access path to the `propdoc_property` crate.
///
/// 1. For crates that depend on `propdoc_property`, `::propdoc_property` is returned.
/// 2. For crates that depend on `propdoc`, `::propdoc::property` is returned.
/// 3. Otherwise `::propdoc_property` is returned, which may be incorrect.
///
/// This reads the caller's `Cargo.toml`, so the path is computed once per
/// derive and passed around.
pub(crate) fn propdoc_property() -> syn::Path {
    propdoc_macro_utils::Manifest::shared(|manifest| manifest.crate_path("propdoc_property"))
}

#[inline(always)]
pub(crate) fn properties_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::Properties
    }
}

#[inline(always)]
pub(crate) fn property_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::Property
    }
}

#[inline(always)]
pub(crate) fn property_list_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::PropertyList
    }
}

#[inline(always)]
pub(crate) fn property_value_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::PropertyValue
    }
}

#[inline(always)]
pub(crate) fn field_descriptor_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::FieldDescriptor
    }
}

#[inline(always)]
pub(crate) fn property_list_cell_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::PropertyListCell
    }
}

#[inline(always)]
pub(crate) fn generic_property_list_cell_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::GenericPropertyListCell
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::__macro_exports::auto_register
    }
}
