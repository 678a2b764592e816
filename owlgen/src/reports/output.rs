//! Output trait for rendering reports.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render it.
pub trait Output {
    /// Render a line of regular output.
    fn line(&mut self, text: &str);

    /// Render an error line.
    fn error(&mut self, text: &str);

    /// Render a multi-line diagnostic trace.
    fn trace(&mut self, text: &str);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output: regular lines to stdout, errors and traces to stderr.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn error(&mut self, text: &str) {
        eprintln!("{}", text);
    }

    fn trace(&mut self, text: &str) {
        eprintln!("{}", text);
    }
}

/// Output kept in memory, split by stream.
#[derive(Debug, Default)]
pub struct BufferedOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Output for BufferedOutput {
    fn line(&mut self, text: &str) {
        self.stdout.push(text.to_string());
    }

    fn error(&mut self, text: &str) {
        self.stderr.push(text.to_string());
    }

    fn trace(&mut self, text: &str) {
        self.stderr.push(text.to_string());
    }
}
