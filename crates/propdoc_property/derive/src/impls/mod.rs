// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_properties;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::get_auto_register_impl;
use trait_properties::impl_trait_properties;

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::PropertiesStruct;

/// Provided for `#[derive(Properties)]`.
pub(crate) fn match_properties_impls(ast: &DeriveInput) -> TokenStream {
    let info = match PropertiesStruct::from_input(ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let properties_trait_tokens = impl_trait_properties(&info);

    // feature: auto_register
    let auto_register_tokens = get_auto_register_impl(info.meta());

    TokenStream::from(quote! {
        const _: () = {
            #properties_trait_tokens

            #auto_register_tokens
        };
    })
}
