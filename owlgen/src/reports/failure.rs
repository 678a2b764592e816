//! Failure report.

use super::output::{Output, Report};
use crate::failure::Failure;

/// Error lines for a failed run.
///
/// Unexpected failures get the full diagnostic trace before the error line.
pub struct FailureReport<'a> {
    failure: &'a Failure,
}

impl<'a> FailureReport<'a> {
    pub fn new(failure: &'a Failure) -> Self {
        Self { failure }
    }
}

impl Report for FailureReport<'_> {
    fn render(&self, out: &mut dyn Output) {
        if let Failure::Unexpected(report) = self.failure {
            out.trace(&format!("{:?}", report));
        }
        out.error(&format!("ERROR: {}", self.failure.message()));
    }
}
