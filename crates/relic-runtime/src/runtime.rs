//! Startup orchestration.
//!
//! The runtime loads configuration, initializes logging, registers every
//! linked extension and freezes the registry.
//!
//! ```rust,ignore
//! use relic_runtime::RelicRuntime;
//!
//! // Auto-loads relic.toml from the current directory
//! let runtime = RelicRuntime::new()?;
//! let registry = runtime.registry().clone();
//!
//! // Custom configuration
//! let runtime = RelicRuntime::builder()
//!     .config_file("plugins/relic/relic.toml")
//!     .profile("production")
//!     .build()?;
//! ```

use std::path::Path;
use std::sync::Arc;

use relic_core::Extension;
use relic_registry::{
    ExtensionDescriptor, RegistrationReport, Registry, RegistryBuilder, collect_extensions,
};
use tracing::{debug, info, warn};

use crate::config::{ConfigLoader, RelicConfig, validate_config};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;

/// A started Relic instance.
pub struct RelicRuntime {
    config: RelicConfig,
    registry: Arc<Registry>,
    reports: Vec<(&'static str, RegistrationReport)>,
}

impl RelicRuntime {
    /// Starts with configuration from the default locations.
    ///
    /// Falls back to defaults if the configuration cannot be loaded.
    pub fn new() -> RuntimeResult<Self> {
        let config = ConfigLoader::new().load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config ({e}), using defaults");
            RelicConfig::default()
        });

        Self::from_config(&config)
    }

    /// Creates a runtime builder for custom configuration.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Starts with `config` and every statically linked extension.
    pub fn from_config(config: &RelicConfig) -> RuntimeResult<Self> {
        Self::start(config, collect_extensions())
    }

    fn start(
        config: &RelicConfig,
        mut extensions: Vec<&'static ExtensionDescriptor>,
    ) -> RuntimeResult<Self> {
        logging::init_from_config(&config.logging);
        validate_config(config)?;

        let settings = &config.registry;
        let host = Extension::new(settings.host_namespace.as_str());

        // Host types first so extension setup hooks can override them.
        extensions.sort_by_key(|descriptor| {
            (
                !descriptor.name.eq_ignore_ascii_case(&settings.host_namespace),
                descriptor.name.to_lowercase(),
            )
        });

        let mut builder =
            RegistryBuilder::new(host).with_default_locale(settings.default_locale.as_str());
        let mut reports = Vec::with_capacity(extensions.len());
        for descriptor in extensions {
            if settings.is_disabled(descriptor.name) {
                info!(extension = descriptor.name, "Extension disabled by configuration");
                continue;
            }
            debug!(extension = descriptor.name, "Registering extension");
            let report = builder.register_extension(descriptor);
            if let Some(error) = report.setup_error.as_ref().filter(|_| settings.strict) {
                return Err(error.clone().into());
            }
            reports.push((descriptor.name, report));
        }

        let failed: Vec<String> = reports
            .iter()
            .flat_map(|(_, report)| &report.failed)
            .map(|(type_name, error)| format!("{type_name} ({error})"))
            .collect();
        if !failed.is_empty() {
            if settings.strict {
                return Err(RuntimeError::RegistrationFailed {
                    count: failed.len(),
                    failed,
                });
            }
            warn!(count = failed.len(), "Some types failed to register");
        }

        let registry = Arc::new(builder.build());
        info!(
            host = %registry.host(),
            powers = registry.powers().len(),
            conditions = registry.conditions().len(),
            "Relic runtime started"
        );

        Ok(Self {
            config: config.clone(),
            registry,
            reports,
        })
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &RelicConfig {
        &self.config
    }

    /// The frozen registry, shared.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Registration outcome per extension, in registration order.
    pub fn reports(&self) -> &[(&'static str, RegistrationReport)] {
        &self.reports
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for [`RelicRuntime`].
pub struct RuntimeBuilder {
    loader: ConfigLoader,
    extensions: Option<Vec<&'static ExtensionDescriptor>>,
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            loader: ConfigLoader::new(),
            extensions: None,
        }
    }

    /// Loads this configuration file instead of searching.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.loader = self.loader.file(path);
        self
    }

    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.loader = self.loader.search_path(path);
        self
    }

    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.loader = self.loader.profile(profile);
        self
    }

    pub fn without_env(mut self) -> Self {
        self.loader = self.loader.without_env();
        self
    }

    /// Replaces the built-in configuration defaults.
    pub fn config(mut self, config: RelicConfig) -> Self {
        self.loader = self.loader.defaults(config);
        self
    }

    /// Registers `descriptor` instead of the linked extensions.
    ///
    /// Once called, only explicitly added extensions are registered.
    pub fn extension(mut self, descriptor: &'static ExtensionDescriptor) -> Self {
        self.extensions.get_or_insert_with(Vec::new).push(descriptor);
        self
    }

    /// Loads configuration and starts the runtime.
    pub fn build(self) -> RuntimeResult<RelicRuntime> {
        let config = self.loader.load()?;
        let extensions = self.extensions.unwrap_or_else(collect_extensions);
        RelicRuntime::start(&config, extensions)
    }
}
