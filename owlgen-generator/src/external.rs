//! Generator backed by an external program.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};

use owlgen_core::{SearchPath, SpecKind, config::GeneratorConfig};

use crate::{GenerateError, MessageGenerator};

/// Exit status the generator uses for a malformed definition.
pub const EXIT_INVALID_SPEC: i32 = 1;
/// Exit status the generator uses for a failed generation.
pub const EXIT_GENERATION: i32 = 2;

/// Runs the configured generator program once per invocation.
///
/// The program is called as
/// `<command...> <msg|srv> --package <pkg> --out <dir> -I<pkg>:<dir>... <files...>`
/// and its exit status decides the failure category.
#[derive(Debug, Clone)]
pub struct ExternalGenerator {
    kind: SpecKind,
    program: String,
    args: Vec<String>,
}

impl ExternalGenerator {
    pub fn new(kind: SpecKind, config: &GeneratorConfig) -> Result<Self, GenerateError> {
        let (program, args) = config.program().ok_or(GenerateError::NoCommand)?;
        Ok(Self {
            kind,
            program: program.to_string(),
            args: args.to_vec(),
        })
    }

    /// Generator for message definitions.
    pub fn msg(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        Self::new(SpecKind::Msg, config)
    }

    /// Generator for service definitions.
    pub fn srv(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        Self::new(SpecKind::Srv, config)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed after the program name.
    pub fn arguments(
        &self,
        package: &str,
        files: &[PathBuf],
        outdir: &Path,
        search_path: &SearchPath,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push(self.kind.subdir().into());
        args.push("--package".into());
        args.push(package.into());
        args.push("--out".into());
        args.push(outdir.into());
        args.extend(search_path.include_args().into_iter().map(OsString::from));
        args.extend(files.iter().map(OsString::from));
        args
    }

    fn classify(&self, status: ExitStatus, stderr: String) -> GenerateError {
        let message = if stderr.is_empty() {
            format!("{} generation failed ({})", self.kind, status)
        } else {
            stderr.clone()
        };
        match status.code() {
            Some(EXIT_INVALID_SPEC) => GenerateError::InvalidSpec(message),
            Some(EXIT_GENERATION) => GenerateError::Generation(message),
            _ => GenerateError::Unexpected {
                program: self.program.clone(),
                status: status.to_string(),
                stderr,
            },
        }
    }
}

impl MessageGenerator for ExternalGenerator {
    fn kind(&self) -> SpecKind {
        self.kind
    }

    fn generate_messages(
        &self,
        package: &str,
        files: &[PathBuf],
        outdir: &Path,
        search_path: &SearchPath,
    ) -> Result<(), GenerateError> {
        let args = self.arguments(package, files, outdir, search_path);
        tracing::debug!(program = %self.program, ?args, "running generator");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| GenerateError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if output.status.success() {
            for line in stderr.lines() {
                tracing::warn!(target: "owlgen::generator", "{}", line);
            }
            return Ok(());
        }
        Err(self.classify(output.status, stderr))
    }
}
