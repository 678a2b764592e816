use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for registry operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("'{path}' is not inside a package")]
    #[diagnostic(
        code(owlgen::not_in_package),
        help("a package is a directory holding a manifest.xml or package.xml")
    )]
    NotInPackage { path: PathBuf },

    #[error("package '{name}' not found")]
    #[diagnostic(
        code(owlgen::package_not_found),
        help("make sure the package is on ROS_PACKAGE_PATH")
    )]
    PackageNotFound { name: String },

    #[error("failed to read '{path}'")]
    #[diagnostic(code(owlgen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    #[diagnostic(code(owlgen::manifest_parse))]
    Manifest { path: PathBuf, message: String },

    #[error("circular dependency: {}", .cycle.join(" -> "))]
    #[diagnostic(code(owlgen::circular_dependency))]
    CircularDependency { cycle: Vec<String> },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    pub(crate) fn manifest(path: impl Into<PathBuf>, message: impl ToString) -> Box<Self> {
        Box::new(Error::Manifest {
            path: path.into(),
            message: message.to_string(),
        })
    }
}
