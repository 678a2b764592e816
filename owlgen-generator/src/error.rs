use miette::Diagnostic;
use thiserror::Error;

/// Failure categories reported by a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// The definition file itself is malformed.
    InvalidSpec,
    /// The definition was understood but bindings could not be produced.
    Generation,
    /// Anything else.
    Other,
}

#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error("{0}")]
    #[diagnostic(code(owlgen::invalid_spec))]
    InvalidSpec(String),

    #[error("{0}")]
    #[diagnostic(code(owlgen::generation_failed))]
    Generation(String),

    #[error("no generator command configured")]
    #[diagnostic(
        code(owlgen::no_generator),
        help("set [generator] command in owlgen.toml")
    )]
    NoCommand,

    #[error("failed to run generator '{program}'")]
    #[diagnostic(code(owlgen::generator_spawn))]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("generator '{program}' failed ({status}){}", stderr_suffix(.stderr))]
    #[diagnostic(code(owlgen::generator_crashed))]
    Unexpected {
        program: String,
        status: String,
        stderr: String,
    },
}

impl GenerateError {
    pub fn category(&self) -> Category {
        match self {
            GenerateError::InvalidSpec(_) => Category::InvalidSpec,
            GenerateError::Generation(_) => Category::Generation,
            _ => Category::Other,
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}
