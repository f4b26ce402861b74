//! Powers, conditions and the configuration sections they persist into.

use std::any::Any;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{SectionError, SectionResult};
use crate::key::NamespacedKey;

/// Type-erasure helpers implemented for every sized `'static` type.
///
/// Call these through a `&dyn Power` (or `*arc`), never on a `Box` or `Arc`
/// directly: the smart pointer is itself `Any` and would be erased instead.
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Common contract of powers and conditions.
pub trait PropertyHolder: AsAny {
    /// The key this type registers under. `None` opts the type out of
    /// registration without an error.
    fn key(&self) -> Option<NamespacedKey>;

    /// Loads configuration from a section. Declared properties not read
    /// here keep their defaults.
    fn init(&mut self, section: &dyn ConfigSection) -> SectionResult<()> {
        let _ = section;
        Ok(())
    }

    /// Writes configuration back to a section.
    fn save(&self, section: &mut dyn ConfigSection) {
        let _ = section;
    }
}

/// An item ability.
pub trait Power: PropertyHolder {
    /// Human readable summary shown on the item.
    fn display_text(&self) -> String {
        String::new()
    }
}

/// A predicate gating powers.
pub trait Condition: PropertyHolder {}

// =============================================================================
// Configuration Sections
// =============================================================================

/// A flat key/value configuration block.
pub trait ConfigSection {
    fn get(&self, key: &str) -> Option<&Value>;

    fn set(&mut self, key: &str, value: Value);

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl ConfigSection for Map<String, Value> {
    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }
}

/// Typed access to a [`ConfigSection`].
pub trait ConfigSectionExt: ConfigSection {
    /// Reads `key` as `T`, or `None` when absent.
    fn read<T: DeserializeOwned>(&self, key: &str) -> SectionResult<Option<T>> {
        self.get(key)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|source| {
                    SectionError::InvalidValue {
                        key: key.to_string(),
                        source,
                    }
                })
            })
            .transpose()
    }

    /// Reads `key` as `T`, falling back to `default` when absent.
    fn read_or<T: DeserializeOwned>(&self, key: &str, default: T) -> SectionResult<T> {
        Ok(self.read(key)?.unwrap_or(default))
    }

    /// Reads the first present key of `keys`, falling back to `default`.
    fn read_first_or<T: DeserializeOwned>(&self, keys: &[&str], default: T) -> SectionResult<T> {
        for key in keys {
            if let Some(value) = self.read(key)? {
                return Ok(value);
            }
        }
        Ok(default)
    }

    /// Reads `key` as `T`, failing when absent.
    fn require<T: DeserializeOwned>(&self, key: &str) -> SectionResult<T> {
        self.read(key)?
            .ok_or_else(|| SectionError::Missing(key.to_string()))
    }

    /// Serializes `value` under `key`. Values that cannot be represented are
    /// stored as `null`.
    fn write<T: Serialize>(&mut self, key: &str, value: T) {
        self.set(key, serde_json::to_value(value).unwrap_or(Value::Null));
    }
}

impl<S: ConfigSection + ?Sized> ConfigSectionExt for S {}
