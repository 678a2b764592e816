//! Output directory layout and creation.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Error, Result, SpecKind};

/// Compute the directory generated sources are written to:
/// `<root>/src/<package>/<msg|srv>`.
pub fn output_dir(root: &Path, package: &str, kind: SpecKind) -> PathBuf {
    root.join("src").join(package).join(kind.subdir())
}

/// Make sure `path` exists as a directory.
///
/// A missing directory is created along with its parents. An "already
/// exists" failure during creation is ignored since another build job may
/// create the same directory concurrently. A non-directory already sitting
/// at `path` is an error.
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    ensure_dir_with(path, |p| fs::create_dir_all(p))
}

/// Compute the output directory for `package` and make sure it exists.
pub fn prepare_output_dir(root: &Path, package: &str, kind: SpecKind) -> Result<PathBuf> {
    let outdir = output_dir(root, package, kind);
    ensure_output_dir(&outdir)?;
    Ok(outdir)
}

fn ensure_dir_with<F>(path: &Path, create: F) -> Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    if !path.exists() {
        match create(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "created output directory"),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), "output directory appeared concurrently");
            }
            Err(source) => {
                return Err(Box::new(Error::CreateDir {
                    path: path.to_path_buf(),
                    source,
                }));
            }
        }
    } else if !path.is_dir() {
        return Err(Box::new(Error::FileInTheWay {
            path: path.to_path_buf(),
        }));
    }
    Ok(())
}
