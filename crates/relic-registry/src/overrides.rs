//! Override edges between power keys.

use std::collections::HashMap;

use relic_core::NamespacedKey;

/// `origin → replacement` edges. Lookups follow exactly one edge.
#[derive(Debug, Default, Clone)]
pub struct OverrideTable {
    edges: HashMap<NamespacedKey, NamespacedKey>,
}

impl OverrideTable {
    /// The replacement registered for `origin`, if any.
    pub fn get(&self, origin: &NamespacedKey) -> Option<&NamespacedKey> {
        self.edges.get(origin)
    }

    /// `origin` after applying its override, if one exists.
    pub fn resolve<'a>(&'a self, origin: &'a NamespacedKey) -> &'a NamespacedKey {
        self.edges.get(origin).unwrap_or(origin)
    }

    pub(crate) fn insert(&mut self, origin: NamespacedKey, replacement: NamespacedKey) {
        self.edges.insert(origin, replacement);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NamespacedKey, &NamespacedKey)> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_single_hop() {
        let a = NamespacedKey::new("x", "a");
        let b = NamespacedKey::new("x", "b");
        let c = NamespacedKey::new("x", "c");
        let mut table = OverrideTable::default();
        table.insert(a.clone(), b.clone());
        table.insert(b.clone(), c.clone());
        assert_eq!(table.resolve(&a), &b);
        assert_eq!(table.resolve(&b), &c);
        assert_eq!(table.resolve(&c), &c);
    }
}
