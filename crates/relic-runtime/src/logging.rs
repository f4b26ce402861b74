//! Log output for the load phase.
//!
//! Relic logs almost everything while extensions register: a `warn` per
//! failed type or setup hook, an `info` summary per extension, and `debug`
//! or `trace` lines per type, adapter and override. Once the registry is
//! frozen only power implementations log, through their own targets.
//!
//! [`init_from_config`] installs one `fmt` layer, filtered by
//! [`env_filter`]. `RUST_LOG` replaces the configured base level, while
//! `logging.registration` and `logging.filters` are always applied on top.
//! A host that installed its own subscriber keeps it.

use std::ffi::OsStr;
use std::path::Path;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig};

/// Target of the registry's load-phase events.
pub const REGISTRATION_TARGET: &str = "relic_registry";

/// Installs the global subscriber described by `config`.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_from_config(config: &LoggingConfig) -> bool {
    let layer = fmt_layer(config, writer(config)).with_filter(env_filter(config));
    tracing_subscriber::registry().with(layer).try_init().is_ok()
}

/// The filter for `config`.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    let base = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    directives(config)
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(base, EnvFilter::add_directive)
}

/// Per-target directives, sorted by target.
///
/// An explicit filter for [`REGISTRATION_TARGET`] wins over
/// `logging.registration`.
pub fn directives(config: &LoggingConfig) -> Vec<String> {
    let mut directives: Vec<String> = config
        .filters
        .iter()
        .map(|(target, level)| format!("{target}={level}"))
        .collect();
    let registration = config
        .registration
        .filter(|_| !config.filters.contains_key(REGISTRATION_TARGET));
    if let Some(level) = registration {
        directives.push(format!("{REGISTRATION_TARGET}={level}"));
    }
    directives.sort();
    directives
}

fn writer(config: &LoggingConfig) -> BoxMakeWriter {
    match (config.output, &config.file_path) {
        (LogOutput::Stdout, _) | (LogOutput::File, None) => BoxMakeWriter::new(std::io::stdout),
        (LogOutput::Stderr, _) => BoxMakeWriter::new(std::io::stderr),
        (LogOutput::File, Some(path)) => BoxMakeWriter::new(tracing_appender::rolling::never(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_name().unwrap_or_else(|| OsStr::new("relic.log")),
        )),
    }
}

fn fmt_layer(
    config: &LoggingConfig,
    writer: BoxMakeWriter,
) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer()
        .with_writer(writer)
        .with_file(config.file_location)
        .with_line_number(config.file_location);
    match config.format {
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Full => layer.boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        #[cfg(feature = "json-log")]
        LogFormat::Json => layer.json().boxed(),
        // Rejected by validation; compact if it gets here anyway.
        #[cfg(not(feature = "json-log"))]
        LogFormat::Json => layer.compact().boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_directives_are_sorted() {
        let mut config = LoggingConfig::default();
        config.filters.insert("relic_powers".to_string(), LogLevel::Trace);
        config.filters.insert("host".to_string(), LogLevel::Warn);
        assert_eq!(directives(&config), ["host=warn", "relic_powers=trace"]);
    }

    #[test]
    fn test_registration_level() {
        let mut config = LoggingConfig {
            registration: Some(LogLevel::Debug),
            ..Default::default()
        };
        assert_eq!(directives(&config), ["relic_registry=debug"]);

        config.filters.insert(REGISTRATION_TARGET.to_string(), LogLevel::Error);
        assert_eq!(directives(&config), ["relic_registry=error"]);
    }

    #[test]
    fn test_filter_carries_directives() {
        let config = LoggingConfig {
            registration: Some(LogLevel::Trace),
            ..Default::default()
        };
        assert!(env_filter(&config).to_string().contains("relic_registry=trace"));
    }
}
