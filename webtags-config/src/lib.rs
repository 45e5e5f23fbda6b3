//! Shared configuration loader for webtags.
//!
//! `defaults/webtags.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. The CLI layers a user file and its own flags on
//! top of those defaults via [`Loader`] before deserializing into [`WebtagsConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use webtags_core::GlobalScope;

const DEFAULT_TOML: &str = include_str!("../defaults/webtags.default.toml");

/// Top-level configuration consumed by the webtags binary.
#[derive(Debug, Clone, Deserialize)]
pub struct WebtagsConfig {
    pub webref: WebrefConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    pub run: RunConfig,
    pub scopes: ScopesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebrefConfig {
    /// URL of the webref crawl index.
    pub index: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub specs: Vec<String>,
    pub pretty_print: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub keep_going: bool,
}

/// Which element identifiers count as "every element".
#[derive(Debug, Clone, Deserialize)]
pub struct ScopesConfig {
    pub global: Vec<String>,
    #[serde(default)]
    pub specs: HashMap<String, Vec<String>>,
}

/// Log levels accepted on the command line and in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const NAMES: &'static [&'static str] = &[
        "trace", "debug", "info", "notice", "warning", "error", "critical",
    ];
}

impl ScopesConfig {
    /// Global scope for a spec. Short names match case-insensitively.
    pub fn scope_for(&self, shortname: &str) -> GlobalScope {
        let ids = self
            .specs
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(shortname))
            .map(|(_, ids)| ids)
            .unwrap_or(&self.global);
        GlobalScope::new(ids.iter().cloned())
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<WebtagsConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<WebtagsConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use webtags_core::scope::DEFAULT_GLOBAL_IDS;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.webref.index, "https://w3c.github.io/webref/ed/index.json");
        assert_eq!(
            config.output.specs,
            vec!["html", "SVG2", "svg-animations", "mathml-core"]
        );
        assert!(!config.output.pretty_print);
        assert_eq!(config.logging.level, LogLevel::Warning);
        assert!(!config.run.keep_going);
        assert!(config.scopes.specs.is_empty());
    }

    #[test]
    fn default_scope_matches_builtin_ids() {
        let config = load_defaults().expect("defaults to deserialize");
        let scope = config.scopes.scope_for("html");
        assert_eq!(
            scope.ids().collect::<Vec<_>>(),
            DEFAULT_GLOBAL_IDS.iter().map(String::as_str).collect::<Vec<_>>()
        );
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("logging.level", "debug")
            .expect("override to apply")
            .set_override("output.specs", vec!["SVG2"])
            .expect("override to apply")
            .set_override("output.pretty_print", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.output.specs, vec!["SVG2"]);
        assert!(config.output.pretty_print);
    }

    #[test]
    fn rejects_unknown_log_level() {
        let result = Loader::new()
            .set_override("logging.level", "loud")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn user_file_adds_per_spec_scopes() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[scopes.specs]\nmathml-core = [\"mathml-global\"]").unwrap();

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");

        let mathml = config.scopes.scope_for("mathml-core");
        assert_eq!(mathml.ids().collect::<Vec<_>>(), vec!["mathml-global"]);
        assert_eq!(config.scopes.scope_for("SVG2"), GlobalScope::default());
    }

    #[test]
    fn missing_user_file_is_an_error() {
        assert!(Loader::new()
            .with_file("/nonexistent/webtags.toml")
            .build()
            .is_err());
    }
}
