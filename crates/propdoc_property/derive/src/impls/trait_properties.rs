use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::PropertiesStruct;

/// Implement `Properties` for a struct.
///
/// Non-generic types keep their list in a `PropertyListCell`, generic
/// types share one `GenericPropertyListCell` keyed by `TypeId`. The static
/// names the concrete type because `Self` is not allowed in a nested item.
pub(crate) fn impl_trait_properties(info: &PropertiesStruct) -> TokenStream {
    let meta = info.meta();
    let crate_path = meta.crate_path();
    let ident = meta.ident();

    let properties_ = crate::path::properties_(crate_path);
    let property_ = crate::path::property_(crate_path);
    let property_list_ = crate::path::property_list_(crate_path);
    let field_descriptor_ = crate::path::field_descriptor_(crate_path);

    let properties = info.active_fields().map(|field| {
        let member = field.ident;
        let name = field.property_name();
        quote! {
            #property_::new(#field_descriptor_::new(
                #name,
                |record: &Self| &record.#member,
                |record: &mut Self| &mut record.#member,
            ))
        }
    });

    let build_list = quote! {
        || #property_list_::new([ #(#properties),* ])
    };

    let body = if meta.impl_with_generic() {
        let cell_ = crate::path::generic_property_list_cell_(crate_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(#build_list)
        }
    } else {
        let cell_ = crate::path::property_list_cell_(crate_path);
        quote! {
            static CELL: #cell_<#ident> = #cell_::new();
            CELL.get_or_init(#build_list)
        }
    };

    let (impl_generics, ty_generics, where_clause) =
        meta.split_generics(info.active_fields().map(|field| field.ty));

    quote! {
        impl #impl_generics #properties_ for #ident #ty_generics #where_clause {
            fn property_list() -> &'static #property_list_<Self> {
                #body
            }
        }
    }
}
