use core::fmt;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, Ident, ImplGenerics, Path, Type, TypeGenerics};

use super::TypeAttributes;

/// Type-level information shared by every generated impl.
pub(crate) struct PropertiesMeta<'a> {
    crate_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl fmt::Debug for PropertiesMeta<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertiesMeta")
            .field("crate_path", &self.crate_path.to_token_stream())
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> PropertiesMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            crate_path: crate::path::propdoc_property(),
            attrs,
            ident,
            generics,
        }
    }

    #[inline]
    pub fn crate_path(&self) -> &Path {
        &self.crate_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    /// Lifetimes are rejected while parsing, so "generic" means type or
    /// const parameters.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// Return `impl_generics`, `ty_generics` and the full `where` clause.
    ///
    /// For generic types the clause requires:
    ///
    /// - `Self: Default + 'static`, the supertraits of `Properties`.
    /// - `Field: PropertyValue` for every field type naming a type parameter.
    ///
    /// Field types without parameters are checked where the list is built.
    pub fn split_generics<'b>(
        &self,
        field_types: impl Iterator<Item = &'b Type>,
    ) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        if !self.impl_with_generic() {
            return (impl_generics, ty_generics, where_clause.to_token_stream());
        }

        let mut generic_where_clause = quote! {
            where Self: ::core::default::Default + 'static,
        };

        if let Some(where_clause) = where_clause {
            let predicates = where_clause.predicates.iter();
            generic_where_clause.extend(quote! { #(#predicates,)* });
        }

        let type_param_idents: Vec<Ident> = self
            .generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect();

        let mut bounded: Vec<&Type> = Vec::new();
        for ty in field_types {
            if !bounded.contains(&ty)
                && crate::utils::is_any_ident_in_token_stream(&type_param_idents, ty.to_token_stream())
            {
                bounded.push(ty);
            }
        }

        let property_value_ = crate::path::property_value_(&self.crate_path);
        generic_where_clause.extend(quote! { #(#bounded: #property_value_,)* });

        (impl_generics, ty_generics, generic_where_clause)
    }
}
