//! Core types for the owl message generator driver.
//!
//! This crate holds the pieces shared between the registry, the generator
//! seam and the command-line driver: the kind of definition being generated,
//! the include search path, the output directory layout, and configuration.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod config;
mod error;
mod kind;
mod outdir;
mod search_path;

pub use config::Config;
pub use error::{Error, Result};
pub use kind::{MSG_DIR, SpecKind};
pub use outdir::{ensure_output_dir, output_dir, prepare_output_dir};
pub use search_path::SearchPath;
