//! Layered configuration with figment.
//!
//! Layers, later ones winning:
//!
//! 1. [`RelicConfig::default`]
//! 2. Defaults supplied by the host ([`ConfigLoader::defaults`])
//! 3. `relic.toml` (or `relic.yaml`/`relic.yml` with `yaml-config`), taken
//!    from the first search directory that has one
//! 4. `relic.<profile>.<ext>` next to that file, when a profile is set
//! 5. `RELIC_*` environment variables, `__` separating sections:
//!    `RELIC_REGISTRY__STRICT=true`
//!
//! Without explicit search directories, the current directory and the
//! user's `relic` config directory are searched, in that order. The
//! profile comes from `RELIC_PROFILE` unless set on the loader.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "toml-config", feature = "yaml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use tracing::{debug, info};

use super::error::{ConfigError, ConfigResult};
use super::schema::RelicConfig;

/// Stem of configuration file names.
const FILE_STEM: &str = "relic";

/// File extensions in search order; only enabled formats are looked for.
const FILE_EXTENSIONS: &[&str] = &["toml", "yaml", "yml"];

fn is_enabled(extension: &str) -> bool {
    match extension {
        "toml" => cfg!(feature = "toml-config"),
        "yaml" | "yml" => cfg!(feature = "yaml-config"),
        _ => false,
    }
}

/// Builds a [`RelicConfig`] from defaults, files and the environment.
pub struct ConfigLoader {
    defaults: Option<RelicConfig>,
    file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
    profile: Option<String>,
    env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            defaults: None,
            file: None,
            search_paths: Vec::new(),
            profile: std::env::var("RELIC_PROFILE").ok(),
            env: true,
        }
    }

    /// Uses `path` instead of searching. The file must exist.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Searches `path`. Directories are searched in the order added.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Also loads `relic.<profile>.<ext>`, names compared in lowercase.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Some(profile.as_ref().to_lowercase());
        self
    }

    /// Ignores `RELIC_*` environment variables.
    pub fn without_env(mut self) -> Self {
        self.env = false;
        self
    }

    /// Replaces the built-in defaults. Files and the environment still win.
    pub fn defaults(mut self, config: RelicConfig) -> Self {
        self.defaults = Some(config);
        self
    }

    pub fn load(self) -> ConfigResult<RelicConfig> {
        let mut figment = Figment::from(Serialized::defaults(RelicConfig::default()));
        if let Some(defaults) = &self.defaults {
            figment = figment.merge(Serialized::defaults(defaults));
        }

        match self.config_file()? {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration file");
                figment = merge_file(figment, &path)?;
                if let Some(profile_path) = self.profile_file(&path) {
                    info!(path = %profile_path.display(), "Loading profile configuration");
                    figment = merge_file(figment, &profile_path)?;
                }
            }
            None => debug!(search_paths = ?self.search_dirs(), "No configuration file found"),
        }

        if self.env {
            figment = figment.merge(Env::prefixed("RELIC_").ignore(&["PROFILE"]).split("__"));
        }

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// The explicit file, or the first one found while searching.
    fn config_file(&self) -> ConfigResult<Option<PathBuf>> {
        if let Some(path) = &self.file {
            if !has_enabled_extension(path) {
                return Err(ConfigError::UnsupportedFormat(path.clone()));
            }
            if !path.is_file() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            return Ok(Some(path.clone()));
        }

        Ok(self.search_dirs().into_iter().find_map(|dir| {
            FILE_EXTENSIONS
                .iter()
                .filter(|extension| is_enabled(extension))
                .map(|extension| dir.join(format!("{FILE_STEM}.{extension}")))
                .find(|path| path.is_file())
        }))
    }

    /// `relic.toml` becomes `relic.<profile>.toml`, if that file exists.
    fn profile_file(&self, base: &Path) -> Option<PathBuf> {
        let profile = self.profile.as_deref()?;
        let stem = base.file_stem().and_then(OsStr::to_str)?;
        let extension = base.extension().and_then(OsStr::to_str)?;
        let path = base.with_file_name(format!("{stem}.{profile}.{extension}"));
        path.is_file().then_some(path)
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        std::env::current_dir()
            .ok()
            .into_iter()
            .chain(dirs::config_dir().map(|dir| dir.join(FILE_STEM)))
            .collect()
    }
}

fn has_enabled_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(is_enabled)
}

fn merge_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
    match path.extension().and_then(OsStr::to_str) {
        #[cfg(feature = "toml-config")]
        Some("toml") => Ok(figment.merge(Toml::file(path))),
        #[cfg(feature = "yaml-config")]
        Some("yaml" | "yml") => Ok(figment.merge(Yaml::file(path))),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}
