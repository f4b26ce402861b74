//! Configuration validation utilities.

use relic_core::NamespacedKey;

use super::error::{ConfigError, ConfigResult};
use super::schema::{LogFormat, LogOutput, LoggingConfig, RegistryConfig, RelicConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &RelicConfig) -> ConfigResult<()> {
    validate_registry_config(&config.registry)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates registry settings.
fn validate_registry_config(config: &RegistryConfig) -> ConfigResult<()> {
    if config.host_namespace.is_empty() {
        return Err(ConfigError::missing_field("registry.host_namespace"));
    }
    // Namespaces are lowercased on use; only the character set matters here.
    NamespacedKey::try_new(&config.host_namespace, "any").map_err(|e| {
        ConfigError::InvalidNamespace {
            namespace: config.host_namespace.clone(),
            reason: e.to_string(),
        }
    })?;

    validate_locale(&config.default_locale)?;

    if config.is_disabled(&config.host_namespace) {
        return Err(ConfigError::validation(format!(
            "The host extension '{}' cannot be disabled",
            config.host_namespace
        )));
    }

    Ok(())
}

/// Accepts `ll`, `lll`, `ll_CC` and `lll_CC`.
fn validate_locale(locale: &str) -> ConfigResult<()> {
    let (language, country) = match locale.split_once('_') {
        Some((language, country)) => (language, Some(country)),
        None => (locale, None),
    };
    let language_ok =
        (2..=3).contains(&language.len()) && language.chars().all(|c| c.is_ascii_alphabetic());
    let country_ok = country.is_none_or(|country| {
        country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic())
    });
    if language_ok && country_ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidLocale(locale.to_string()))
    }
}

/// Validates logging settings.
fn validate_logging_config(config: &LoggingConfig) -> ConfigResult<()> {
    if config.output == LogOutput::File && config.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    if cfg!(not(feature = "json-log")) && config.format == LogFormat::Json {
        return Err(ConfigError::validation(
            "JSON log format requires the json-log feature",
        ));
    }

    if let Some(module) = config.filters.keys().find(|module| module.trim().is_empty()) {
        return Err(ConfigError::validation(format!(
            "Invalid log filter module: {module:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&RelicConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_host_namespace() {
        let mut config = RelicConfig::default();
        config.registry.host_namespace = "my server".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidNamespace { .. })
        ));

        config.registry.host_namespace.clear();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn test_locales() {
        for locale in ["en", "en_US", "zh_CN", "fil_PH"] {
            assert!(validate_locale(locale).is_ok(), "{locale}");
        }
        for locale in ["", "e", "en_", "en-US", "en_USA", "e1_US"] {
            assert!(
                matches!(validate_locale(locale), Err(ConfigError::InvalidLocale(_))),
                "{locale}"
            );
        }
    }

    #[test]
    fn test_host_cannot_be_disabled() {
        let mut config = RelicConfig::default();
        config.registry.disabled_extensions = vec!["RELIC".to_string()];
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_file_output_requires_path() {
        let mut config = RelicConfig::default();
        config.logging.output = LogOutput::File;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField { field }) if field == "logging.file_path"
        ));
        config.logging.file_path = Some("relic.log".into());
        assert!(validate_config(&config).is_ok());
    }
}
