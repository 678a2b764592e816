use super::output::{Output, Report};

/// One-line usage hint.
pub struct UsageReport {
    pub program: String,
}

impl Report for UsageReport {
    fn render(&self, out: &mut dyn Output) {
        out.line(&format!("{} file(s)", self.program));
    }
}
