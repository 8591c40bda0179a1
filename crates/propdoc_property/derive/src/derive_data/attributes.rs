//! Parsing of `#[properties(...)]`.

use proc_macro2::Span;
use syn::{Attribute, LitStr};

use crate::PROPERTIES_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type-level options.
///
/// - `#[properties(auto_register)]`
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// The span is used to report errors at the attribute.
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(PROPERTIES_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("auto_register") {
                    if this.auto_register.is_some() {
                        return Err(meta.error("duplicate `auto_register`"));
                    }
                    this.auto_register = Some(meta.path.require_ident()?.span());
                    Ok(())
                } else if meta.path.is_ident("rename") || meta.path.is_ident("skip") {
                    Err(meta.error("this attribute can only be applied to fields"))
                } else {
                    Err(meta.error("unknown type attribute, expected `auto_register`"))
                }
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field-level options.
///
/// - `#[properties(rename = "name")]`
/// - `#[properties(skip)]`
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub skip: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(PROPERTIES_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if this.rename.is_some() {
                        return Err(meta.error("duplicate `rename`"));
                    }
                    this.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    this.skip = true;
                    Ok(())
                } else if meta.path.is_ident("auto_register") {
                    Err(meta.error("`auto_register` can only be applied to types"))
                } else {
                    Err(meta.error("unknown field attribute, expected `rename` or `skip`"))
                }
            })?;
        }

        if this.skip && this.rename.is_some() {
            return Err(syn::Error::new(
                this.rename.as_ref().map_or_else(Span::call_site, LitStr::span),
                "a skipped field cannot be renamed",
            ));
        }

        Ok(this)
    }
}
