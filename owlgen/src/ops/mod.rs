//! Core operations.
//!
//! Business logic for the generator drivers, separated from argument
//! parsing and output rendering.

pub mod generate;

pub use generate::{GenerateOptions, Generated, generate};
