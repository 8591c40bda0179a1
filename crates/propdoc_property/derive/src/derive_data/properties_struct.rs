use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type};

use super::{FieldAttributes, PropertiesMeta, TypeAttributes};

// -----------------------------------------------------------------------------
// StructField

/// One named field of the derived struct.
#[derive(Debug)]
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl StructField<'_> {
    /// The property name: the `rename` value, else the field name without `r#`.
    pub fn property_name(&self) -> LitStr {
        match &self.attrs.rename {
            Some(lit) => lit.clone(),
            None => LitStr::new(&self.ident.unraw().to_string(), self.ident.span()),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.attrs.skip
    }
}

// -----------------------------------------------------------------------------
// PropertiesStruct

/// A struct with named fields (or no fields) deriving `Properties`.
#[derive(Debug)]
pub(crate) struct PropertiesStruct<'a> {
    meta: PropertiesMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> PropertiesStruct<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`Properties` can only be derived for structs with named fields",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Properties` can only be derived for structs with named fields",
                ));
            }
        };

        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "`Properties` cannot be derived for types with lifetime parameters",
            ));
        }

        let fields = match &data.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .map(|field| {
                    Ok(StructField {
                        ident: field.ident.as_ref().ok_or_else(|| {
                            syn::Error::new(field.span(), "expected a named field")
                        })?,
                        ty: &field.ty,
                        attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                    })
                })
                .collect::<syn::Result<Vec<_>>>()?,
            Fields::Unit => Vec::new(),
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new(
                    unnamed.span(),
                    "`Properties` cannot be derived for tuple structs, property names come from field names",
                ));
            }
        };

        check_duplicate_names(&fields)?;

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = PropertiesMeta::new(attrs, &input.ident, &input.generics);

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &PropertiesMeta<'a> {
        &self.meta
    }

    /// The fields that become properties, in declared order.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.is_active())
    }
}

/// Names are compared after `rename`, so two fields renamed to one name
/// are caught as well.
fn check_duplicate_names(fields: &[StructField<'_>]) -> syn::Result<()> {
    let mut seen: Vec<String> = Vec::with_capacity(fields.len());

    for field in fields.iter().filter(|field| field.is_active()) {
        let name = field.property_name();
        let value = name.value();
        if seen.contains(&value) {
            return Err(syn::Error::new(
                name.span(),
                format!("duplicate property name `{value}`"),
            ));
        }
        seen.push(value);
    }

    Ok(())
}
