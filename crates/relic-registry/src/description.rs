//! Description resolvers per extension and locale.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use relic_core::NamespacedKey;

/// Resolves the localized description of a property of a type.
pub type DescriptionResolver =
    Arc<dyn Fn(&NamespacedKey, &str) -> Option<String> + Send + Sync>;

/// `(extension namespace, locale) → resolver` map.
#[derive(Default, Clone)]
pub struct DescriptionTable {
    resolvers: HashMap<(String, String), DescriptionResolver>,
}

impl DescriptionTable {
    pub(crate) fn insert(
        &mut self,
        namespace: String,
        locale: String,
        resolver: DescriptionResolver,
    ) -> bool {
        self.resolvers.insert((namespace, locale), resolver).is_some()
    }

    /// Resolves `property` of `key` in `locale`. `None` when the key's
    /// extension has no resolver for that locale, or the resolver has no text.
    pub fn resolve(&self, locale: &str, key: &NamespacedKey, property: &str) -> Option<String> {
        let resolver = self
            .resolvers
            .get(&(key.namespace().to_string(), locale.to_string()))?;
        resolver(key, property)
    }

    pub fn has_resolver(&self, namespace: &str, locale: &str) -> bool {
        self.resolvers
            .contains_key(&(namespace.to_string(), locale.to_string()))
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl fmt::Debug for DescriptionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.resolvers.keys()).finish()
    }
}
