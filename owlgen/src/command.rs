use std::{
    ffi::{OsStr, OsString},
    path::PathBuf,
};

use clap::Parser;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("expected exactly one definition file, got none")]
    NoFile,

    #[error("expected exactly one definition file, got {}: {}", .0.len(), .0.join(", "))]
    TooManyFiles(Vec<String>),
}

/// Every `--` argument is ignored, `--help` and `--version` included.
#[derive(Parser, Debug)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(about = "Generate bindings for a message or service definition")]
pub struct GenCommand {
    /// Definition file (.msg or .srv); arguments starting with `--` are ignored
    #[arg(value_name = "FILE", allow_hyphen_values = true, trailing_var_arg = true)]
    pub args: Vec<OsString>,
}

impl GenCommand {
    /// Arguments that name files, with `--` flags dropped.
    pub fn files(&self) -> Vec<&OsStr> {
        self.args
            .iter()
            .map(OsString::as_os_str)
            .filter(|a| !a.as_encoded_bytes().starts_with(b"--"))
            .collect()
    }

    /// The single definition file to generate from.
    pub fn selected_file(&self) -> Result<PathBuf, ArgsError> {
        match self.files().as_slice() {
            [] => Err(ArgsError::NoFile),
            [file] => Ok(PathBuf::from(file)),
            many => Err(ArgsError::TooManyFiles(
                many.iter()
                    .map(|f| f.to_string_lossy().into_owned())
                    .collect(),
            )),
        }
    }
}
