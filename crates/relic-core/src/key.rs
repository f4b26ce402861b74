//! Namespaced identifiers for power and condition types.
//!
//! A key is written `namespace:name`. Both halves are normalised to lowercase
//! on construction; validity is checked separately by [`NamespacedKey::validate`]
//! so that a type can report a key before the registry decides whether to
//! accept it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{KeyError, KeyResult};

/// Separator between the namespace and the name.
pub const SEPARATOR: char = ':';

/// A `namespace:name` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacedKey {
    namespace: String,
    name: String,
}

impl NamespacedKey {
    /// Creates a key, lowercasing both parts.
    pub fn new(namespace: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        Self {
            namespace: namespace.as_ref().to_lowercase(),
            name: name.as_ref().to_lowercase(),
        }
    }

    /// Creates a key and validates it immediately.
    pub fn try_new(namespace: impl AsRef<str>, name: impl AsRef<str>) -> KeyResult<Self> {
        let key = Self::new(namespace, name);
        key.validate()?;
        Ok(key)
    }

    /// Returns the namespace half.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the name half.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Checks both parts against the allowed character sets.
    pub fn validate(&self) -> KeyResult<()> {
        if self.namespace.is_empty() {
            return Err(KeyError::malformed(self.to_string(), "empty namespace"));
        }
        if self.name.is_empty() {
            return Err(KeyError::malformed(self.to_string(), "empty name"));
        }
        if !self.namespace.chars().all(is_namespace_char) {
            return Err(KeyError::malformed(
                self.to_string(),
                "namespace must match [a-z0-9._-]",
            ));
        }
        if !self.name.chars().all(is_name_char) {
            return Err(KeyError::malformed(
                self.to_string(),
                "name must match [a-z0-9._/-]",
            ));
        }
        Ok(())
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '-')
}

fn is_name_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

/// Splits raw user input into an optional namespace and a name.
///
/// No separator yields `(None, input)`. Exactly one separator with two
/// non-empty halves yields `(Some(namespace), name)`. Anything else is
/// malformed.
pub fn split_key(input: &str) -> KeyResult<(Option<&str>, &str)> {
    let mut parts = input.split(SEPARATOR);
    let first = parts.next().unwrap_or_default();
    match (parts.next(), parts.next()) {
        (None, _) if first.is_empty() => Err(KeyError::malformed(input, "empty key")),
        (None, _) => Ok((None, first)),
        (Some(name), None) => {
            if first.is_empty() || name.is_empty() {
                Err(KeyError::malformed(input, "empty namespace or name"))
            } else {
                Ok((Some(first), name))
            }
        }
        (Some(_), Some(_)) => Err(KeyError::malformed(input, "more than one separator")),
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, SEPARATOR, self.name)
    }
}

/// Parses a fully qualified `namespace:name` key.
///
/// Use the registry's `parse_key` to resolve bare names against the host
/// namespace.
impl FromStr for NamespacedKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_key(s)? {
            (Some(namespace), name) => Self::try_new(namespace, name),
            (None, _) => Err(KeyError::malformed(s, "missing namespace")),
        }
    }
}

impl Serialize for NamespacedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NamespacedKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_lowercased() {
        let key = NamespacedKey::new("MyPlugin", "Fire_Ball");
        assert_eq!(key.namespace(), "myplugin");
        assert_eq!(key.name(), "fire_ball");
        assert_eq!(key.to_string(), "myplugin:fire_ball");
    }

    #[test]
    fn test_equality_uses_both_parts() {
        assert_eq!(NamespacedKey::new("a", "b"), NamespacedKey::new("A", "B"));
        assert_ne!(NamespacedKey::new("a", "b"), NamespacedKey::new("b", "b"));
        assert_ne!(NamespacedKey::new("a", "b"), NamespacedKey::new("a", "c"));
    }

    #[test]
    fn test_validate_rejects_bad_characters() {
        assert!(NamespacedKey::new("relic", "sub/path.v2").validate().is_ok());
        assert!(NamespacedKey::new("re/lic", "x").validate().is_err());
        assert!(NamespacedKey::new("relic", "has space").validate().is_err());
        assert!(NamespacedKey::new("", "x").validate().is_err());
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("tick").unwrap(), (None, "tick"));
        assert_eq!(split_key("ext:tick").unwrap(), (Some("ext"), "tick"));
        assert!(split_key("a:b:c").is_err());
        assert!(split_key(":b").is_err());
        assert!(split_key("a:").is_err());
        assert!(split_key("").is_err());
    }

    #[test]
    fn test_serde_uses_display_form() {
        let key = NamespacedKey::new("relic", "stuck");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"relic:stuck\"");
        let back: NamespacedKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<NamespacedKey>("\"stuck\"").is_err());
    }
}
