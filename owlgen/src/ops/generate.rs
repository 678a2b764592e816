//! Generate operation - resolve a definition's package and run the generator.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use owlgen_core::{Config, SearchPath, SpecKind, prepare_output_dir};
use owlgen_generator::{GenerateError, MessageGenerator};
use owlgen_registry::{PackageRegistry, locate_package};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Kind of definition being generated.
    pub kind: SpecKind,
    /// Explicit config file, overriding the package's `owlgen.toml`.
    pub config_path: Option<&'a Path>,
}

/// What a successful generation touched.
#[derive(Debug)]
pub struct Generated {
    pub package: String,
    pub file: PathBuf,
    pub outdir: PathBuf,
    pub search_path: SearchPath,
}

/// Execute the generate operation.
///
/// The output directory is prepared before the generator is created, so a
/// blocked output path fails without running anything.
pub fn generate<F>(
    file: &Path,
    registry: &dyn PackageRegistry,
    opts: GenerateOptions,
    make_generator: F,
) -> Result<Generated>
where
    F: FnOnce(SpecKind, &Config) -> std::result::Result<Box<dyn MessageGenerator>, GenerateError>,
{
    if SpecKind::from_path(file).is_some_and(|kind| kind != opts.kind) {
        tracing::warn!(
            file = %file.display(),
            expected = %opts.kind,
            "definition file extension does not match generator kind"
        );
    }

    let package = locate_package(file)?.name;
    let root = registry
        .path_of(&package)
        .wrap_err_with(|| format!("failed to resolve package of '{}'", file.display()))?;
    let config = Config::discover(opts.config_path, &root)?;

    let search_path = resolve_search_path(registry, &package, &root, &config.search.core_package)?;
    tracing::debug!(include = ?search_path.include_args(), "resolved search path");

    let outdir = prepare_output_dir(&root, &package, opts.kind)?;

    let generator = make_generator(opts.kind, &config)?;
    let files = vec![file.to_path_buf()];
    generator.generate_messages(&package, &files, &outdir, &search_path)?;

    tracing::info!(
        package = %package,
        file = %file.display(),
        outdir = %outdir.display(),
        "generated"
    );

    Ok(Generated {
        package,
        file: file.to_path_buf(),
        outdir,
        search_path,
    })
}

/// Build the include search path for `package`: its own messages, the
/// implicit core package, and every dependency.
pub fn resolve_search_path(
    registry: &dyn PackageRegistry,
    package: &str,
    root: &Path,
    core_package: &str,
) -> Result<SearchPath> {
    let core_root = registry
        .path_of(core_package)
        .wrap_err_with(|| format!("failed to resolve core package '{}'", core_package))?;

    let depends = registry
        .depends_of(package)
        .wrap_err_with(|| format!("failed to resolve dependencies of '{}'", package))?
        .into_iter()
        .map(|dep| {
            let dep_root = registry.path_of(&dep)?;
            Ok((dep, dep_root))
        })
        .collect::<owlgen_registry::Result<Vec<_>>>()?;

    Ok(SearchPath::for_package(
        package,
        root,
        (core_package, &core_root),
        depends,
    ))
}
