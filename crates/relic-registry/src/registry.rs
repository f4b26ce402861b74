//! The frozen registry.
//!
//! A [`Registry`] is produced by [`RegistryBuilder::build`](crate::RegistryBuilder::build)
//! and never changes afterwards. It is `Send + Sync` and meant to be shared
//! as `Arc<Registry>`; every query is a plain read.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use indexmap::IndexMap;
use relic_core::{
    Capability, Condition, ConditionType, ConfigSection, Extension, KeyError, KeyResult,
    NamespacedKey, Pimpl, Power, PowerType, TypeDescriptor, TypeMeta, downcast_view, split_key,
};
use tracing::trace;

use crate::adapter::AdapterTable;
use crate::description::DescriptionTable;
use crate::error::{RegistryError, RegistryResult};
use crate::overrides::OverrideTable;
use crate::scan::PropertyTable;

/// Key ↔ descriptor map for one kind of type.
pub struct TypeTable<T: ?Sized + 'static> {
    by_key: BTreeMap<NamespacedKey, &'static TypeDescriptor<T>>,
    by_type: HashMap<TypeId, NamespacedKey>,
}

impl<T: ?Sized + 'static> Default for TypeTable<T> {
    fn default() -> Self {
        Self {
            by_key: BTreeMap::new(),
            by_type: HashMap::new(),
        }
    }
}

impl<T: ?Sized + 'static> TypeTable<T> {
    pub fn get(&self, key: &NamespacedKey) -> Option<&'static TypeDescriptor<T>> {
        self.by_key.get(key).copied()
    }

    pub fn contains(&self, key: &NamespacedKey) -> bool {
        self.by_key.contains_key(key)
    }

    /// The key `descriptor` is registered under.
    pub fn key_of(&self, descriptor: &TypeDescriptor<T>) -> Option<&NamespacedKey> {
        self.by_type.get(&descriptor.type_id())
    }

    /// Entries sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&NamespacedKey, &'static TypeDescriptor<T>)> {
        self.by_key.iter().map(|(key, descriptor)| (key, *descriptor))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub(crate) fn insert(&mut self, key: NamespacedKey, descriptor: &'static TypeDescriptor<T>) {
        self.by_type.insert(descriptor.type_id(), key.clone());
        self.by_key.insert(key, descriptor);
    }
}

/// Registered types, capabilities and resolvers.
pub struct Registry {
    pub(crate) host: Extension,
    pub(crate) default_locale: String,
    pub(crate) extensions: IndexMap<String, Extension>,
    pub(crate) powers: TypeTable<dyn Power>,
    pub(crate) conditions: TypeTable<dyn Condition>,
    pub(crate) metas: HashMap<TypeId, TypeMeta>,
    pub(crate) properties: HashMap<TypeId, PropertyTable>,
    pub(crate) adapters: AdapterTable,
    pub(crate) overrides: OverrideTable,
    pub(crate) descriptions: DescriptionTable,
}

impl Registry {
    pub(crate) fn new(host: Extension, default_locale: String) -> Self {
        let mut extensions = IndexMap::new();
        extensions.insert(host.namespace(), host.clone());
        Self {
            host,
            default_locale,
            extensions,
            powers: TypeTable::default(),
            conditions: TypeTable::default(),
            metas: HashMap::new(),
            properties: HashMap::new(),
            adapters: AdapterTable::default(),
            overrides: OverrideTable::default(),
            descriptions: DescriptionTable::default(),
        }
    }

    /// Records `extension` if its namespace is not known yet.
    pub(crate) fn add_extension(&mut self, extension: &Extension) {
        self.extensions
            .entry(extension.namespace())
            .or_insert_with(|| extension.clone());
    }

    // =========================================================================
    // Extensions and keys
    // =========================================================================

    /// The host application's own extension.
    pub fn host(&self) -> &Extension {
        &self.host
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Looks up an extension by name, ignoring case.
    pub fn extension(&self, name: &str) -> Option<&Extension> {
        self.extensions.get(&name.to_lowercase())
    }

    /// Registered extensions, host first.
    pub fn extensions(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.values()
    }

    /// Whether any extension besides the host is registered.
    pub fn has_extensions(&self) -> bool {
        self.extensions.len() > 1
    }

    /// Parses user input into a key.
    ///
    /// A bare name uses the host namespace. A `namespace:name` form must name
    /// a registered extension, matched case-insensitively.
    pub fn parse_key(&self, input: &str) -> KeyResult<NamespacedKey> {
        let key = match split_key(input)? {
            (None, name) => NamespacedKey::new(self.host.namespace(), name),
            (Some(namespace), name) => {
                let extension = self
                    .extension(namespace)
                    .ok_or_else(|| KeyError::UnknownExtension(namespace.to_string()))?;
                NamespacedKey::new(extension.namespace(), name)
            }
        };
        key.validate()?;
        Ok(key)
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// The power registered under `key`, after applying its override.
    pub fn get_power(&self, key: &NamespacedKey) -> Option<&'static PowerType> {
        self.powers.get(self.overrides.resolve(key))
    }

    /// The condition registered under `key`, after applying its override.
    pub fn get_condition(&self, key: &NamespacedKey) -> Option<&'static ConditionType> {
        self.conditions.get(self.overrides.resolve(key))
    }

    /// Whether a power is registered under exactly `key`.
    pub fn has_power(&self, key: &NamespacedKey) -> bool {
        self.powers.contains(key)
    }

    pub fn has_condition(&self, key: &NamespacedKey) -> bool {
        self.conditions.contains(key)
    }

    pub fn power_key(&self, descriptor: &PowerType) -> Option<&NamespacedKey> {
        self.powers.key_of(descriptor)
    }

    pub fn condition_key(&self, descriptor: &ConditionType) -> Option<&NamespacedKey> {
        self.conditions.key_of(descriptor)
    }

    pub fn powers(&self) -> &TypeTable<dyn Power> {
        &self.powers
    }

    pub fn conditions(&self) -> &TypeTable<dyn Condition> {
        &self.conditions
    }

    /// The replacement registered for `origin`, if any.
    pub fn override_of(&self, origin: &NamespacedKey) -> Option<&NamespacedKey> {
        self.overrides.get(origin)
    }

    // =========================================================================
    // Metadata and properties
    // =========================================================================

    /// Metadata of the type registered under exactly `key`.
    pub fn meta(&self, key: &NamespacedKey) -> Option<&TypeMeta> {
        self.metas.get(&self.type_id_of(key)?)
    }

    pub fn meta_of<T: ?Sized + 'static>(&self, descriptor: &TypeDescriptor<T>) -> Option<&TypeMeta> {
        self.metas.get(&descriptor.type_id())
    }

    /// Property table of the type registered under exactly `key`.
    pub fn properties(&self, key: &NamespacedKey) -> Option<&PropertyTable> {
        self.properties.get(&self.type_id_of(key)?)
    }

    pub fn properties_of<T: ?Sized + 'static>(
        &self,
        descriptor: &TypeDescriptor<T>,
    ) -> Option<&PropertyTable> {
        self.properties.get(&descriptor.type_id())
    }

    fn type_id_of(&self, key: &NamespacedKey) -> Option<TypeId> {
        self.powers
            .get(key)
            .map(|descriptor| descriptor.type_id())
            .or_else(|| self.conditions.get(key).map(|descriptor| descriptor.type_id()))
    }

    // =========================================================================
    // Descriptions
    // =========================================================================

    /// Description of `property` of `key` in `locale`.
    pub fn description(&self, locale: &str, key: &NamespacedKey, property: &str) -> Option<String> {
        self.descriptions.resolve(locale, key, property)
    }

    /// Description of `property` of `key` in the default locale.
    pub fn description_default(&self, key: &NamespacedKey, property: &str) -> Option<String> {
        self.description(&self.default_locale, key, property)
    }

    // =========================================================================
    // Instances and capabilities
    // =========================================================================

    /// Creates the power registered under `key` (override applied) and
    /// loads `section` into it.
    pub fn create_power(
        &self,
        key: &NamespacedKey,
        section: &dyn ConfigSection,
    ) -> RegistryResult<Box<dyn Power>> {
        let descriptor = self
            .get_power(key)
            .ok_or_else(|| RegistryError::UnknownType(key.clone()))?;
        let instantiation = |reason: String| RegistryError::Instantiation {
            type_name: descriptor.name,
            reason,
        };
        let create = descriptor
            .create
            .ok_or_else(|| instantiation("type has no factory".to_string()))?;
        let mut power = create().map_err(|e| instantiation(e.to_string()))?;
        power.init(section).map_err(|e| instantiation(e.to_string()))?;
        Ok(power)
    }

    /// Builds the implementation wrapper of `descriptor` around `power`.
    pub fn create_impl(
        &self,
        descriptor: &'static PowerType,
        power: Arc<dyn Power>,
    ) -> RegistryResult<Arc<dyn Pimpl>> {
        if (*power).as_any().type_id() != descriptor.type_id() {
            return Err(RegistryError::TypeMismatch(descriptor.name));
        }
        let factory = self
            .meta_of(descriptor)
            .or(descriptor.meta.as_ref())
            .and_then(|meta| meta.implementation)
            .ok_or(RegistryError::NoImplementation(descriptor.name))?;
        factory(power).map_err(|e| RegistryError::Instantiation {
            type_name: descriptor.name,
            reason: e.to_string(),
        })
    }

    /// Resolves capability `S` for `pimpl` through the adapter table.
    ///
    /// The power's general interfaces are tried in declared order, keeping
    /// only those the wrapper implements directly; the first with an adapter
    /// to `S` wins.
    pub fn adapt<S>(&self, pimpl: &Arc<dyn Pimpl>) -> RegistryResult<Arc<S>>
    where
        S: ?Sized + Capability + Send + Sync,
    {
        let specific = S::ID;
        let type_id = pimpl.power().as_any().type_id();
        let statics = pimpl.capabilities();
        let generals = self
            .metas
            .get(&type_id)
            .map(|meta| meta.general_interfaces)
            .unwrap_or_default();

        for general in generals.iter().filter(|general| statics.contains(general)) {
            if !self.adapters.contains(*general, specific) {
                continue;
            }
            trace!(general = %general, specific = %specific, "Adapting capability");
            let converted = Arc::clone(pimpl)
                .upcast(*general)
                .and_then(|view| self.adapters.convert(*general, specific, view))
                .and_then(downcast_view::<S>);
            if let Some(adapted) = converted {
                return Ok(adapted);
            }
        }

        Err(RegistryError::UnsupportedCapability {
            power: pimpl
                .power()
                .key()
                .map_or_else(|| "<unkeyed power>".to_string(), |key| key.to_string()),
            capability: specific.name(),
        })
    }

    /// The adapter table.
    pub fn adapters(&self) -> &AdapterTable {
        &self.adapters
    }
}
