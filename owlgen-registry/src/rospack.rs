//! Filesystem-backed package registry.

use std::{
    cell::{OnceCell, RefCell},
    collections::HashMap,
    ffi::OsString,
    path::{Path, PathBuf},
};

use indexmap::{IndexMap, IndexSet};
use walkdir::WalkDir;

use crate::{
    Error, PackageRegistry, Result,
    manifest::{Manifest, find_manifest},
    package::Package,
};

pub const ROS_ROOT: &str = "ROS_ROOT";
pub const ROS_PACKAGE_PATH: &str = "ROS_PACKAGE_PATH";

/// A directory holding this file is not searched for packages.
const NOSUBDIRS_MARKER: &str = "rospack_nosubdirs";
/// A directory holding this file is skipped entirely.
const IGNORE_MARKER: &str = "CATKIN_IGNORE";

/// Package registry crawling a list of root directories.
///
/// The crawl happens once, on first lookup. When two packages share a
/// name, the one found first (earlier root, then sorted directory order)
/// wins.
#[derive(Debug)]
pub struct RosPack {
    roots: Vec<PathBuf>,
    packages: OnceCell<IndexMap<String, Found>>,
    depends: RefCell<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone)]
struct Found {
    root: PathBuf,
    manifest: (crate::manifest::ManifestFormat, PathBuf),
}

impl RosPack {
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut unique = IndexSet::new();
        for root in roots {
            unique.insert(root);
        }
        Self {
            roots: unique.into_iter().collect(),
            packages: OnceCell::new(),
            depends: RefCell::new(HashMap::new()),
        }
    }

    /// Registry over `ROS_ROOT` and `ROS_PACKAGE_PATH`.
    pub fn from_env() -> Self {
        Self::new(search_roots(
            std::env::var_os(ROS_ROOT),
            std::env::var_os(ROS_PACKAGE_PATH),
        ))
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Names of all known packages, in discovery order.
    pub fn list(&self) -> Vec<&str> {
        self.packages().keys().map(String::as_str).collect()
    }

    fn packages(&self) -> &IndexMap<String, Found> {
        self.packages.get_or_init(|| {
            let mut packages = IndexMap::new();
            for root in &self.roots {
                crawl(root, &mut packages);
            }
            tracing::debug!(count = packages.len(), "crawled package roots");
            packages
        })
    }

    fn found(&self, name: &str) -> Result<&Found> {
        self.packages().get(name).ok_or_else(|| {
            tracing::debug!(
                package = name,
                roots = ?self.roots(),
                known = ?self.list(),
                "package not found"
            );
            Box::new(Error::PackageNotFound {
                name: name.to_string(),
            })
        })
    }

    fn direct_depends(&self, name: &str) -> Result<Vec<String>> {
        if let Some(cached) = self.depends.borrow().get(name) {
            return Ok(cached.clone());
        }
        let found = self.found(name)?;
        let (format, path) = &found.manifest;
        let depends = Manifest::read(*format, path)?.depends;
        self.depends
            .borrow_mut()
            .insert(name.to_string(), depends.clone());
        Ok(depends)
    }

    fn collect_depends(
        &self,
        name: &str,
        stack: &mut Vec<String>,
        out: &mut IndexSet<String>,
    ) -> Result<()> {
        for dep in self.direct_depends(name)? {
            if let Some(pos) = stack.iter().position(|s| *s == dep) {
                let mut cycle = stack[pos..].to_vec();
                cycle.push(dep);
                return Err(Box::new(Error::CircularDependency { cycle }));
            }
            if !out.insert(dep.clone()) {
                continue;
            }
            stack.push(dep.clone());
            self.collect_depends(&dep, stack, out)?;
            stack.pop();
        }
        Ok(())
    }
}

impl PackageRegistry for RosPack {
    fn path_of(&self, name: &str) -> Result<PathBuf> {
        self.found(name).map(|found| found.root.clone())
    }

    fn depends_of(&self, name: &str) -> Result<Vec<String>> {
        let mut stack = vec![name.to_string()];
        let mut out = IndexSet::new();
        self.collect_depends(name, &mut stack, &mut out)?;
        Ok(out.into_iter().collect())
    }
}

/// Compute crawl roots: `ROS_ROOT` first, then each entry of
/// `ROS_PACKAGE_PATH`. Empty entries are dropped.
pub fn search_roots(ros_root: Option<OsString>, package_path: Option<OsString>) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(root) = ros_root.filter(|r| !r.is_empty()) {
        roots.push(PathBuf::from(root));
    }
    if let Some(path) = package_path {
        roots.extend(std::env::split_paths(&path).filter(|p| !p.as_os_str().is_empty()));
    }
    roots
}

fn crawl(root: &Path, packages: &mut IndexMap<String, Found>) {
    let mut entries = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = entries.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(root = %root.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if (entry.depth() > 0 && hidden) || dir.join(IGNORE_MARKER).exists() {
            entries.skip_current_dir();
            continue;
        }

        if let Some((format, manifest_path)) = find_manifest(dir) {
            match Package::from_root(dir, format, &manifest_path) {
                Ok(package) => {
                    if packages.contains_key(&package.name) {
                        tracing::debug!(
                            package = %package.name,
                            shadowed = %dir.display(),
                            "package already found earlier"
                        );
                    } else {
                        packages.insert(
                            package.name,
                            Found {
                                root: package.root,
                                manifest: (format, manifest_path),
                            },
                        );
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        path = %manifest_path.display(),
                        error = %err,
                        "ignoring package"
                    );
                }
            }
            entries.skip_current_dir();
            continue;
        }

        if dir.join(NOSUBDIRS_MARKER).exists() {
            entries.skip_current_dir();
        }
    }
}
