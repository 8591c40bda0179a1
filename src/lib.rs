#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use propdoc_property as property;

/// The items most programs need.
pub mod prelude {
    pub use crate::property::{
        Properties, PropertyError, PropertyRegistry, deserialize, document_to_string_pretty,
        from_str, serialize, to_string_pretty,
    };
}
