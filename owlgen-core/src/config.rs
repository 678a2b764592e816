//! Optional `owlgen.toml` configuration.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{Error, Result, error::SourceContext};

/// File name looked up in a package root.
pub const CONFIG_FILE: &str = "owlgen.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "OWLGEN_CONFIG";

/// Package that every generated package implicitly depends on.
pub const DEFAULT_CORE_PACKAGE: &str = "std_msgs";

/// Program invoked to generate bindings when nothing else is configured.
pub const DEFAULT_GENERATOR: &str = "genowl";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Program followed by its leading arguments.
    pub command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub core_package: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: vec![DEFAULT_GENERATOR.to_string()],
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            core_package: DEFAULT_CORE_PACKAGE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Split the command into program and leading arguments.
    pub fn program(&self) -> Option<(&str, &[String])> {
        self.command
            .split_first()
            .map(|(program, args)| (program.as_str(), args))
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, CONFIG_FILE)
    }
}

impl Config {
    /// Parse a config file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse config content with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let config: Config = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        config.validate(&ctx)?;
        Ok(config)
    }

    /// Find and load the config for a package.
    ///
    /// An explicit path (from [`CONFIG_ENV`]) must exist. Otherwise
    /// `<package_root>/owlgen.toml` is used when present, falling back to
    /// defaults.
    pub fn discover(explicit: Option<&Path>, package_root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }

        let local = package_root.join(CONFIG_FILE);
        if local.is_file() {
            tracing::debug!(path = %local.display(), "loading package config");
            Self::from_file(&local)
        } else {
            Ok(Self::default())
        }
    }

    /// Config path named by the environment, if any.
    pub fn env_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if self.generator.command.is_empty() {
            return Err(ctx.validation_error_near("generator command must not be empty", "command"));
        }
        if self.search.core_package.trim().is_empty() {
            return Err(ctx.validation_error_near("core package must not be empty", "core_package"));
        }
        Ok(())
    }
}
