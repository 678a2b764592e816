//! Generator seam for the owl message generator driver.
//!
//! Parsing definition files and emitting bindings is the job of an external
//! generator. This crate defines the [`MessageGenerator`] trait the driver
//! talks to, the failure categories a generator can report, and
//! [`ExternalGenerator`], which runs a generator program as a child process.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod external;

use std::path::{Path, PathBuf};

pub use error::{Category, GenerateError};
pub use external::{EXIT_GENERATION, EXIT_INVALID_SPEC, ExternalGenerator};
use owlgen_core::{SearchPath, SpecKind, config::GeneratorConfig};

/// Produces bindings for message or service definitions.
pub trait MessageGenerator {
    /// Which kind of definitions this generator handles.
    fn kind(&self) -> SpecKind;

    /// Generate bindings for `files` of `package` into `outdir`, resolving
    /// referenced types through `search_path`.
    fn generate_messages(
        &self,
        package: &str,
        files: &[PathBuf],
        outdir: &Path,
        search_path: &SearchPath,
    ) -> Result<(), GenerateError>;
}

/// Create the generator for the given kind.
pub fn generator_for(
    kind: SpecKind,
    config: &GeneratorConfig,
) -> Result<Box<dyn MessageGenerator>, GenerateError> {
    let generator = match kind {
        SpecKind::Msg => ExternalGenerator::msg(config)?,
        SpecKind::Srv => ExternalGenerator::srv(config)?,
    };
    Ok(Box::new(generator))
}
