//! Package lookup and dependency resolution.
//!
//! A package is a directory marked by a `manifest.xml` or `package.xml`.
//! [`locate_package`] finds the package a file belongs to, and a
//! [`PackageRegistry`] answers where a named package lives and what it
//! depends on. [`RosPack`] is the registry backed by the directories on
//! `ROS_ROOT` and `ROS_PACKAGE_PATH`.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
pub mod manifest;
mod package;
mod rospack;

use std::path::PathBuf;

pub use error::{Error, Result};
pub use manifest::{Manifest, ManifestFormat};
pub use package::{Package, locate_package};
pub use rospack::{ROS_PACKAGE_PATH, ROS_ROOT, RosPack, search_roots};

/// Source of package locations and dependencies.
pub trait PackageRegistry {
    /// Root directory of the named package.
    fn path_of(&self, name: &str) -> Result<PathBuf>;

    /// Transitive dependencies of the named package.
    ///
    /// Each dependency appears once, before its own dependencies.
    fn depends_of(&self, name: &str) -> Result<Vec<String>>;
}
