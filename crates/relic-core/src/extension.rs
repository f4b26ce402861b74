//! Extension identity.
//!
//! An extension is any component that contributes power or condition types,
//! adapters, overrides, or description resolvers. Its identity is its name,
//! compared case-insensitively; the lowercased name is its key namespace.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A contributing extension.
#[derive(Clone)]
pub struct Extension {
    name: Arc<str>,
    handle: Option<Arc<dyn Any + Send + Sync>>,
}

impl Extension {
    /// Creates an extension with no attached handle.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            handle: None,
        }
    }

    /// Attaches an opaque handle (for example the host's plugin object).
    pub fn with_handle<H: Any + Send + Sync>(mut self, handle: H) -> Self {
        self.handle = Some(Arc::new(handle));
        self
    }

    /// Returns the name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the key namespace owned by this extension.
    pub fn namespace(&self) -> String {
        self.name.to_lowercase()
    }

    /// Returns the attached handle if it has type `H`.
    pub fn handle<H: Any>(&self) -> Option<&H> {
        self.handle.as_deref()?.downcast_ref()
    }
}

impl PartialEq for Extension {
    fn eq(&self, other: &Self) -> bool {
        self.namespace() == other.namespace()
    }
}

impl Eq for Extension {}

impl Hash for Extension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace().hash(state);
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("name", &self.name)
            .field("has_handle", &self.handle.is_some())
            .finish()
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_case_insensitive() {
        assert_eq!(Extension::new("RPGItems"), Extension::new("rpgitems"));
        assert_eq!(Extension::new("RPGItems").namespace(), "rpgitems");
    }

    #[test]
    fn test_handle_downcast() {
        let ext = Extension::new("host").with_handle(42u32);
        assert_eq!(ext.handle::<u32>(), Some(&42));
        assert_eq!(ext.handle::<String>(), None);
        assert_eq!(Extension::new("bare").handle::<u32>(), None);
    }
}
