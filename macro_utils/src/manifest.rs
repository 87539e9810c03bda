use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for the runtime crate as seen from
/// the caller's Cargo.toml.
///
/// Generated code must name `keyed_codable` items by a path that is valid
/// in the *invoking* crate, which may have renamed the dependency. The
/// manifest is scanned once and cached per path.
///
/// # Example
///
/// ```rust
/// # use keyed_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("keyed_codable"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies` under its own
///    name, return `::crate_name`.
/// 2. If it is listed under a rename (`other = { package = "crate_name" }`),
///    return `::other`.
/// 3. Repeat steps 1-2 for `dev-dependencies`.
/// 4. Otherwise fall back to the absolute path `::crate_name`.
///
/// ## Note
///
/// When the runtime crate needs to reference itself the fallback path is
/// still correct, provided the crate root declares
/// `extern crate self as keyed_codable;`.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

impl Manifest {
    // Try get `Cargo.toml` path.
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    // Try get `Cargo.toml` modified time.
    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    // Attempt to parse the provided path as a syntax tree node.
    #[inline]
    fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
        syn::parse_str(path).unwrap()
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            // This dependency exists under its own name.
            return Some(Self::parse_str(&format!("::{name}")));
        }

        // Scan for a rename: `alias = { package = "name", ... }`.
        for (alias, item) in deps.iter() {
            let package = item
                .as_table_like()
                .and_then(|table| table.get("package"))
                .and_then(Item::as_str);
            if package == Some(name) {
                return Some(Self::parse_str(&format!("::{alias}")));
            }
        }

        None
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from
    /// this crate's Cargo.toml. See the top-level documentation for the
    /// resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        if let Some(Item::Table(deps)) = self.manifest.get("dependencies")
            && let Some(val) = Self::find_in_deps(deps, name)
        {
            return val;
        }

        if let Some(Item::Table(deps)) = self.manifest.get("dev-dependencies")
            && let Some(val) = Self::find_in_deps(deps, name)
        {
            return val;
        }

        Self::parse_str(&format!("::{name}"))
    }

    /// Obtain the [Manifest] of the caller's Cargo.toml.
    ///
    /// Reading and parsing the manifest is relatively expensive for a
    /// proc-macro, so the parsed document is cached per manifest path and
    /// refreshed only when the file's modified time changes. Callers
    /// should still invoke this sparingly (typically once per macro
    /// invocation) and pass the resolved [`syn::Path`] around.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

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
