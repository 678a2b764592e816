//! Locating the package a file belongs to.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    Error, Result,
    manifest::{Manifest, ManifestFormat, find_manifest},
};

/// A located package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub root: PathBuf,
}

impl Package {
    /// Build a package from a directory holding a manifest.
    ///
    /// Catkin manifests declare their name; anything else is named after
    /// its directory.
    pub fn from_root(root: &Path, format: ManifestFormat, manifest_path: &Path) -> Result<Self> {
        let declared = match format {
            ManifestFormat::Catkin => Manifest::read(format, manifest_path)?.name,
            ManifestFormat::Rosbuild => None,
        };
        let name = match declared {
            Some(name) => name,
            None => dir_name(root)?,
        };
        Ok(Self {
            name,
            root: root.to_path_buf(),
        })
    }
}

/// Find the package containing `path` by walking up from it until a
/// directory with a manifest is found.
pub fn locate_package(path: &Path) -> Result<Package> {
    let start = fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .map_err(|e| Error::io(path, e))?;

    for dir in start.ancestors() {
        if let Some((format, manifest_path)) = find_manifest(dir) {
            let package = Package::from_root(dir, format, &manifest_path)?;
            tracing::debug!(
                file = %path.display(),
                package = %package.name,
                root = %package.root.display(),
                "located package"
            );
            return Ok(package);
        }
    }

    Err(Box::new(Error::NotInPackage {
        path: path.to_path_buf(),
    }))
}

fn dir_name(root: &Path) -> Result<String> {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Box::new(Error::NotInPackage {
                path: root.to_path_buf(),
            })
        })
}
