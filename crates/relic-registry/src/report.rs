//! Outcome of a registration batch.

use relic_core::NamespacedKey;

use crate::error::{RegistrationError, RegistryError};

/// What happened to each candidate of a batch.
#[derive(Debug, Default, Clone)]
pub struct RegistrationReport {
    /// Keys registered, in registration order.
    pub registered: Vec<NamespacedKey>,
    /// Types whose instance reported no key.
    pub skipped: Vec<&'static str>,
    /// Types whose registration failed and was rolled back.
    pub failed: Vec<(&'static str, RegistrationError)>,
    /// Why the extension's setup hook failed.
    pub setup_error: Option<RegistryError>,
}

impl RegistrationReport {
    /// Appends the outcomes of `other`.
    pub fn merge(&mut self, other: RegistrationReport) {
        self.registered.extend(other.registered);
        self.skipped.extend(other.skipped);
        self.failed.extend(other.failed);
        if self.setup_error.is_none() {
            self.setup_error = other.setup_error;
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.setup_error.is_none()
    }

    /// The failure recorded for `type_name`, if any.
    pub fn failure(&self, type_name: &str) -> Option<&RegistrationError> {
        self.failed
            .iter()
            .find(|(name, _)| *name == type_name)
            .map(|(_, error)| error)
    }
}
