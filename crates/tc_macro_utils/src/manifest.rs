use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for another crate as seen from the
/// caller's Cargo.toml.
///
/// Derive macros emit absolute paths such as `::tc_codec::Object`; whether
/// that path resolves depends on how the invoking crate depends on the codec.
///
/// # Example
///
/// ```rust
/// # use tc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("tc_codec"));
/// ```
///
/// Reading and parsing the manifest is not cheap, callers should resolve the
/// path once per macro invocation and pass it along.
///
/// # Resolution rules
///
/// For `dependencies`, then `dev-dependencies`:
///
/// 1. A dependency whose key is the requested crate: `::crate_name`.
/// 2. A renamed dependency (`alias = { package = "crate_name" }`): `::alias`.
/// 3. A requested `tc_*` crate reached through a facade crate
///    (`tagcodec`, `tc_core` or the short alias `tc`): `::facade::short_name`,
///    e.g. `tc_codec` -> `::tc_core::codec`.
///
/// Otherwise the absolute path `::crate_name` is returned.
///
/// ## Note
///
/// A crate referring to itself through the absolute path needs
/// `extern crate self as tc_codec;` in its root.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAMES: [&str; 3] = ["tagcodec", "tc_core", "tc"];
const ENGINE_PREFIX: &str = "tc_";
const DEPENDENCY_SECTIONS: [&str; 2] = ["dependencies", "dev-dependencies"];

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        syn::parse_str(&format!("::{}", segments.join("::")))
            .expect("crate names are valid path segments")
    }

    /// The key under which `name` is reachable in `deps`, honoring `package = "..."` renames.
    fn dependency_key<'t>(deps: &'t Table, name: &str) -> Option<&'t str> {
        if let Some((key, _)) = deps.get_key_value(name) {
            return Some(key.get());
        }

        deps.iter().find_map(|(key, item)| {
            let package = item.get("package").and_then(Item::as_str)?;
            (package == name).then_some(key)
        })
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if let Some(key) = Self::dependency_key(deps, name) {
            return Some(Self::absolute(&[&key.replace('-', "_")]));
        }

        let module = name.strip_prefix(ENGINE_PREFIX)?;
        FACADE_NAMES.iter().find_map(|facade| {
            let key = Self::dependency_key(deps, facade)?;
            Some(Self::absolute(&[&key.replace('-', "_"), module]))
        })
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the top-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        DEPENDENCY_SECTIONS
            .iter()
            .filter_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Some(deps),
                _ => None,
            })
            .find_map(|deps| Self::find_in_deps(deps, name))
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Obtain the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// Manifests are cached per path and re-read only when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = std::fs::metadata(&manifest_path)
            .and_then(|metadata| metadata.modified())
            .expect("The Cargo.toml should have a modified time.");

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&manifest_path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.to_owned().into_boxed_str()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn path_string(path: syn::Path) -> String {
        path.to_token_stream().to_string().replace(' ', "")
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\ntc_codec = \"0.0.1\"\n");
        assert_eq!(path_string(m.get_crate_path("tc_codec")), "::tc_codec");
    }

    #[test]
    fn renamed_dependency() {
        let m = manifest("[dependencies]\ncodec = { package = \"tc_codec\", version = \"0.0.1\" }\n");
        assert_eq!(path_string(m.get_crate_path("tc_codec")), "::codec");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dev-dependencies]\ntc_core = { path = \"../..\" }\n");
        assert_eq!(path_string(m.get_crate_path("tc_codec")), "::tc_core::codec");
    }

    #[test]
    fn fallback_is_absolute() {
        let m = manifest("[package]\nname = \"demo\"\n");
        assert_eq!(path_string(m.get_crate_path("tc_codec")), "::tc_codec");
    }
}
