//! Driver for generating bindings from ROS message and service definitions.
//!
//! Given one `.msg` or `.srv` file, the driver finds the package it belongs
//! to, builds the include search path from the package's dependencies (plus
//! the implicit core message package), prepares
//! `<package-root>/src/<package>/<msg|srv>/` and hands everything to the
//! configured generator. Failures map to exit codes:
//!
//! | code | meaning                                  |
//! |------|------------------------------------------|
//! | 0    | success                                  |
//! | 1    | invalid message/service definition       |
//! | 2    | generation failed                        |
//! | 3    | anything else (trace printed to stderr)  |

mod command;
pub mod failure;
pub mod logging;
pub mod ops;
pub mod reports;

use std::{ffi::OsString, path::Path, process::ExitCode};

use clap::Parser;
pub use command::{ArgsError, GenCommand};
pub use failure::Failure;
use owlgen_core::{Config, SpecKind};
use owlgen_generator::{GenerateError, MessageGenerator, generator_for};
use owlgen_registry::{PackageRegistry, RosPack};

use crate::{
    failure::EXIT_SUCCESS,
    reports::{FailureReport, Output, Report, TerminalOutput, UsageReport},
};

/// Entry point shared by the `genmsg_owl` and `gensrv_owl` binaries.
pub fn genmain(kind: SpecKind) -> ExitCode {
    logging::init();
    if let Err(err) = color_eyre::install() {
        tracing::debug!(error = %err, "error report hook already installed");
    }

    let argv: Vec<OsString> = std::env::args_os().collect();
    let registry = RosPack::from_env();
    let config_path = Config::env_path();

    let code = run(
        &argv,
        kind,
        &registry,
        config_path.as_deref(),
        default_generator,
        &mut TerminalOutput::new(),
    );
    ExitCode::from(code)
}

/// The generator used outside of tests: the configured external program.
pub fn default_generator(
    kind: SpecKind,
    config: &Config,
) -> Result<Box<dyn MessageGenerator>, GenerateError> {
    generator_for(kind, &config.generator)
}

/// Parse `argv`, generate, and report. Returns the process exit code.
pub fn run<F>(
    argv: &[OsString],
    kind: SpecKind,
    registry: &dyn PackageRegistry,
    config_path: Option<&Path>,
    make_generator: F,
    out: &mut dyn Output,
) -> u8
where
    F: FnOnce(SpecKind, &Config) -> Result<Box<dyn MessageGenerator>, GenerateError>,
{
    let cmd = match GenCommand::try_parse_from(argv) {
        Ok(cmd) => cmd,
        Err(err) => return fail(Failure::Unexpected(eyre::Report::new(err)), out),
    };

    if argv.len() <= 1 {
        let program = argv
            .first()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "owlgen".to_string());
        UsageReport { program }.render(out);
    }

    let result = cmd
        .selected_file()
        .map_err(eyre::Report::new)
        .and_then(|file| {
            ops::generate(
                &file,
                registry,
                ops::GenerateOptions { kind, config_path },
                make_generator,
            )
        });

    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(report) => fail(Failure::from(report), out),
    }
}

fn fail(failure: Failure, out: &mut dyn Output) -> u8 {
    FailureReport::new(&failure).render(out);
    failure.exit_code()
}
