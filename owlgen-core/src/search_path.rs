//! Include search path handed to the generator.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::kind::MSG_DIR;

/// Mapping from package name to the directories searched for its definitions.
///
/// Insertion order is preserved. Re-inserting a package replaces its
/// directories but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    entries: IndexMap<String, Vec<PathBuf>>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the search path for generating definitions of `package`.
    ///
    /// The result holds, in order: the package's own message directory, the
    /// implicit core package, then one entry per dependency.
    pub fn for_package<I, S>(package: &str, root: &Path, core: (&str, &Path), depends: I) -> Self
    where
        I: IntoIterator<Item = (S, PathBuf)>,
        S: Into<String>,
    {
        let mut search_path = Self::new();
        search_path.insert_package(package, root);
        // the core package is an implicit dependency because of Header
        search_path.insert_package(core.0, core.1);
        for (name, dep_root) in depends {
            search_path.insert_package(name, &dep_root);
        }
        search_path
    }

    /// Set the directories for a package, returning the previous ones.
    pub fn insert(
        &mut self,
        package: impl Into<String>,
        dirs: Vec<PathBuf>,
    ) -> Option<Vec<PathBuf>> {
        self.entries.insert(package.into(), dirs)
    }

    /// Point a package at the message directory under its root.
    pub fn insert_package(&mut self, package: impl Into<String>, root: &Path) {
        self.insert(package, vec![root.join(MSG_DIR)]);
    }

    pub fn get(&self, package: &str) -> Option<&[PathBuf]> {
        self.entries.get(package).map(Vec::as_slice)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.entries.contains_key(package)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Package names in insertion order.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.entries
            .iter()
            .map(|(name, dirs)| (name.as_str(), dirs.as_slice()))
    }

    /// Render as generator include arguments, `-I<package>:<dir>` per directory.
    pub fn include_args(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(name, dirs)| {
                dirs.iter()
                    .map(move |dir| format!("-I{}:{}", name, dir.display()))
            })
            .collect()
    }
}
