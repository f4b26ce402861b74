//! Error types for the Relic registry.

use relic_core::{KeyError, NamespacedKey};
use thiserror::Error;

/// Errors raised while scanning a type's property declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The same property name is declared on more than one level of the
    /// type chain.
    #[error("property '{field}' of {type_name} is declared more than once in its type chain")]
    AmbiguousAccessor {
        type_name: &'static str,
        field: &'static str,
    },

    /// A property declaration carries no accessor on a non-marker type.
    #[error("property '{field}' of {type_name} has no accessor")]
    MissingAccessor {
        type_name: &'static str,
        field: &'static str,
    },
}

/// Errors that abort the registration of a single type.
///
/// These never abort a batch; they are logged and collected into a
/// [`RegistrationReport`](crate::RegistrationReport).
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// The type could not be constructed.
    #[error("failed to instantiate {type_name}: {reason}")]
    Instantiation {
        type_name: &'static str,
        reason: String,
    },

    /// Another type already uses the key.
    #[error("key {key} of {type_name} is already registered by {existing}")]
    DuplicateKey {
        key: NamespacedKey,
        type_name: &'static str,
        existing: &'static str,
    },

    /// The type is already registered under another key.
    #[error("{type_name} is already registered as {existing}")]
    DuplicateType {
        type_name: &'static str,
        existing: NamespacedKey,
    },

    /// The instance reported an invalid key.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Property scanning failed.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl RegistrationError {
    /// Creates an instantiation error.
    pub fn instantiation(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::Instantiation {
            type_name,
            reason: reason.into(),
        }
    }
}

/// Result type for a single type registration.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Errors raised by registry operations other than type registration.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The origin already has an override.
    #[error("cannot override {origin} with {replacement}: already overridden by {existing}")]
    OverrideConflict {
        origin: NamespacedKey,
        replacement: NamespacedKey,
        existing: NamespacedKey,
    },

    /// A power cannot override itself.
    #[error("power {0} cannot override itself")]
    SelfOverride(NamespacedKey),

    /// No power is registered under the key.
    #[error("no power registered as {0}")]
    UnknownType(NamespacedKey),

    /// The replacement is not a subtype of the origin, or lacks some of its
    /// capabilities.
    #[error("{replacement} ({replacement_type}) cannot override {origin} ({origin_type})")]
    InvalidOverrideSubtype {
        origin: NamespacedKey,
        origin_type: &'static str,
        replacement: NamespacedKey,
        replacement_type: &'static str,
    },

    /// No adapter leads from the power's capabilities to the requested one.
    #[error("{power} cannot provide capability '{capability}'")]
    UnsupportedCapability {
        power: String,
        capability: &'static str,
    },

    /// The type's metadata names no implementation factory.
    #[error("{0} declares no implementation")]
    NoImplementation(&'static str),

    /// The instance is not of the descriptor's type.
    #[error("instance is not a {0}")]
    TypeMismatch(&'static str),

    /// The implementation factory failed.
    #[error("failed to create implementation of {type_name}: {reason}")]
    Instantiation {
        type_name: &'static str,
        reason: String,
    },

    /// An extension's setup hook failed.
    #[error("setup of extension {extension} failed: {reason}")]
    Setup { extension: String, reason: String },

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
