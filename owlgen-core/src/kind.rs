use std::{fmt, path::Path, str::FromStr};

/// Directory inside a package that holds message definitions.
///
/// Services reference messages, so include directories always point here
/// regardless of which kind is being generated.
pub const MSG_DIR: &str = "msg";

/// The kind of definition file being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecKind {
    /// Structured data definition (`.msg`).
    Msg,
    /// Request/response pair (`.srv`).
    Srv,
}

impl SpecKind {
    /// Subdirectory name, used both in the package tree and in the output layout.
    pub fn subdir(self) -> &'static str {
        match self {
            SpecKind::Msg => "msg",
            SpecKind::Srv => "srv",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        self.subdir()
    }

    /// Guess the kind from a definition file's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for SpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subdir())
    }
}

impl FromStr for SpecKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "msg" => Ok(SpecKind::Msg),
            "srv" => Ok(SpecKind::Srv),
            other => Err(format!("invalid spec kind '{}', expected 'msg' or 'srv'", other)),
        }
    }
}
