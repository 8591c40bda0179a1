use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

use toml_edit::{DocumentMut, Item, Table};

/// The `Cargo.toml` of the crate currently invoking a proc-macro.
///
/// Generated code must name `propdoc_property` by a path that resolves from
/// the *caller*, which may depend on the core crate directly or only on the
/// `propdoc` facade.
///
/// # Example
///
/// ```rust
/// # use propdoc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.crate_path("propdoc_property"));
/// ```
///
/// # Resolution rules
///
/// For each of `[dependencies]` then `[dev-dependencies]`:
///
/// 1. `name` itself is listed: `::name`.
/// 2. `name` is `propdoc_xxx` and the facade `propdoc` is listed: `::propdoc::xxx`.
///
/// If neither table matches, `::name` is returned as is.
///
/// A crate that invokes its own derive (as `propdoc_property` does in its tests)
/// needs `extern crate self as propdoc_property;` at its root for rule 1's
/// fallback to resolve.
#[derive(Debug)]
pub struct Manifest {
    document: DocumentMut,
    modified: Option<SystemTime>,
}

const FACADE_NAME: &str = "propdoc";
const MEMBER_PREFIX: &str = "propdoc_";

impl Manifest {
    fn manifest_path() -> PathBuf {
        let Some(dir) = env::var_os("CARGO_MANIFEST_DIR") else {
            panic!("CARGO_MANIFEST_DIR is not set; proc-macros must be expanded by cargo");
        };
        PathBuf::from(dir).join("Cargo.toml")
    }

    fn load(path: &Path, modified: Option<SystemTime>) -> Self {
        let source = std::fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("cannot read `{}`: {err}", path.display()));
        let document = source
            .parse::<DocumentMut>()
            .unwrap_or_else(|err| panic!("cannot parse `{}`: {err}", path.display()));
        Self { document, modified }
    }

    fn parse_path(text: &str) -> syn::Path {
        match syn::parse_str(text) {
            Ok(path) => path,
            Err(err) => panic!("`{text}` is not a valid path: {err}"),
        }
    }

    fn lookup(table: &Table, name: &str) -> Option<syn::Path> {
        if table.contains_key(name) {
            return Some(Self::parse_path(&format!("::{name}")));
        }

        let member = name.strip_prefix(MEMBER_PREFIX)?;
        table
            .contains_key(FACADE_NAME)
            .then(|| Self::parse_path(&format!("::{FACADE_NAME}::{member}")))
    }

    /// Returns the path under which the caller reaches the crate `name`.
    ///
    /// See the type-level documentation for the resolution rules.
    pub fn crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|key| match self.document.get(key) {
                Some(Item::Table(table)) => Some(table),
                _ => None,
            })
            .find_map(|table| Self::lookup(table, name))
            .unwrap_or_else(|| Self::parse_path(&format!("::{name}")))
    }

    /// Runs `func` against the caller's manifest.
    ///
    /// Parsed manifests are cached per path and reparsed only when the file's
    /// modification time changes, so a long-lived rust-analyzer process picks
    /// up dependency edits.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: Mutex<BTreeMap<PathBuf, Manifest>> = Mutex::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified = std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .ok();

        let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
        let stale = cache
            .get(&path)
            .is_none_or(|cached| cached.modified.is_none() || cached.modified != modified);
        if stale {
            let fresh = Self::load(&path, modified);
            cache.insert(path.clone(), fresh);
        }

        func(&cache[&path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            document: text.parse().unwrap(),
            modified: None,
        }
    }

    fn path_string(path: &syn::Path) -> String {
        let mut out = String::new();
        if path.leading_colon.is_some() {
            out.push_str("::");
        }
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        out.push_str(&segments.join("::"));
        out
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\npropdoc_property = \"0.0.1\"\n");
        assert_eq!(path_string(&m.crate_path("propdoc_property")), "::propdoc_property");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dependencies]\npropdoc = \"0.0.1\"\n");
        assert_eq!(path_string(&m.crate_path("propdoc_property")), "::propdoc::property");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\npropdoc = \"0.0.1\"\n");
        assert_eq!(path_string(&m.crate_path("propdoc_property")), "::propdoc::property");

        let m = manifest("[dependencies]\nserde = \"1\"\n");
        assert_eq!(path_string(&m.crate_path("propdoc_property")), "::propdoc_property");
    }
}
