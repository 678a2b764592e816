//! Failure categories and their exit codes.

use owlgen_generator::{Category, GenerateError};

pub const EXIT_SUCCESS: u8 = 0;
/// The definition file is malformed.
pub const EXIT_INVALID_SPEC: u8 = 1;
/// The generator could not produce bindings.
pub const EXIT_GENERATION: u8 = 2;
/// Anything else.
pub const EXIT_UNEXPECTED: u8 = 3;

/// A failed run, classified by what went wrong.
#[derive(Debug)]
pub enum Failure {
    InvalidSpec(String),
    Generation(String),
    Unexpected(eyre::Report),
}

impl Failure {
    pub fn exit_code(&self) -> u8 {
        match self {
            Failure::InvalidSpec(_) => EXIT_INVALID_SPEC,
            Failure::Generation(_) => EXIT_GENERATION,
            Failure::Unexpected(_) => EXIT_UNEXPECTED,
        }
    }

    /// One-line description, including the cause chain for unexpected failures.
    pub fn message(&self) -> String {
        match self {
            Failure::InvalidSpec(message) | Failure::Generation(message) => message.clone(),
            Failure::Unexpected(report) => report
                .chain()
                .map(|cause| cause.to_string())
                .collect::<Vec<_>>()
                .join(": "),
        }
    }
}

impl From<eyre::Report> for Failure {
    fn from(report: eyre::Report) -> Self {
        match report.downcast_ref::<GenerateError>() {
            Some(err) => match err.category() {
                Category::InvalidSpec => Failure::InvalidSpec(err.to_string()),
                Category::Generation => Failure::Generation(err.to_string()),
                Category::Other => Failure::Unexpected(report),
            },
            None => Failure::Unexpected(report),
        }
    }
}
