//! Report data structures.
//!
//! Operations build reports, then render them to an Output target.

mod failure;
mod output;
mod usage;

pub use failure::FailureReport;
pub use output::{BufferedOutput, Output, Report, TerminalOutput};
pub use usage::UsageReport;
