//! Configuration schema definitions.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelicConfig {
    /// Registry settings.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

// =============================================================================
// Registry
// =============================================================================

/// Registry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Name of the host application's extension. Keys typed without a
    /// namespace resolve into it.
    #[serde(default = "default_host_namespace")]
    pub host_namespace: String,

    /// Locale used for descriptions when the caller names none.
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Linked extensions that are not registered, matched ignoring case.
    #[serde(default)]
    pub disabled_extensions: Vec<String>,

    /// Abort startup when any type fails to register.
    #[serde(default)]
    pub strict: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host_namespace: default_host_namespace(),
            default_locale: default_locale(),
            disabled_extensions: Vec::new(),
            strict: false,
        }
    }
}

impl RegistryConfig {
    /// Whether the extension called `name` is disabled.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled_extensions
            .iter()
            .any(|disabled| disabled.eq_ignore_ascii_case(name))
    }
}

fn default_host_namespace() -> String {
    "relic".to_string()
}

fn default_locale() -> String {
    relic_registry::DEFAULT_LOCALE.to_string()
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature.
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    /// Requires `file_path`.
    File,
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Level for registration events, overriding `level` for
    /// `relic_registry`. `debug` shows every type registered or skipped.
    #[serde(default)]
    pub registration: Option<LogLevel>,

    /// Include source file and line.
    #[serde(default)]
    pub file_location: bool,

    /// Log file for [`LogOutput::File`].
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Per-module levels, e.g. `relic_powers = "trace"`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,
}
