//! Declared configurable properties.
//!
//! Each power or condition type declares a table of properties for its own
//! level of the type chain, usually through `#[derive(Properties)]`. The
//! registry's scanner merges the tables of a whole chain into the final,
//! ordered property descriptor table.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Reads a property value out of a type-erased holder.
///
/// Returns `None` when the holder is not of the expected type or the value
/// cannot be represented.
pub type Accessor = Arc<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;

/// Maps a holder to the embedded value of its parent type.
pub type Projection = fn(&dyn Any) -> Option<&dyn Any>;

/// A named source of accepted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    #[default]
    None,
    PotionEffectType,
    Triggers,
    VisualEffect,
}

/// Values a property accepts: a literal list, optionally widened by a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AcceptedValues {
    values: &'static [&'static str],
    preset: Preset,
}

impl AcceptedValues {
    pub const fn new(values: &'static [&'static str], preset: Preset) -> Self {
        Self { values, preset }
    }

    pub const fn values(&self) -> &'static [&'static str] {
        self.values
    }

    pub const fn preset(&self) -> Preset {
        self.preset
    }
}

/// A property as declared on one level of a type chain.
#[derive(Clone)]
pub struct PropertyDecl {
    name: &'static str,
    order: i32,
    required: bool,
    accepted: Option<AcceptedValues>,
    accessor: Option<Accessor>,
}

impl PropertyDecl {
    /// Order used when a declaration does not give one; sorts last.
    pub const DEFAULT_ORDER: i32 = i32::MAX;

    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            order: Self::DEFAULT_ORDER,
            required: false,
            accepted: None,
            accessor: None,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Flags the property as explicitly required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_accepted(mut self, accepted: AcceptedValues) -> Self {
        self.accepted = Some(accepted);
        self
    }

    /// Binds the accessor used to read the value from a live holder.
    pub fn with_accessor<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&dyn Any) -> Option<Value> + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn accepted(&self) -> Option<AcceptedValues> {
        self.accepted
    }

    pub fn accessor(&self) -> Option<&Accessor> {
        self.accessor.as_ref()
    }
}

impl fmt::Debug for PropertyDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDecl")
            .field("name", &self.name)
            .field("order", &self.order)
            .field("required", &self.required)
            .field("accepted", &self.accepted)
            .field("bound", &self.accessor.is_some())
            .finish()
    }
}

/// Implemented by `#[derive(Properties)]`.
pub trait DeclareProperties: 'static {
    /// The properties declared directly on this type.
    fn declared_properties() -> Vec<PropertyDecl>;

    /// Projects a holder of this type onto its embedded parent value.
    fn project_parent(holder: &dyn Any) -> Option<&dyn Any> {
        let _ = holder;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        range: u32,
    }

    #[test]
    fn test_defaults() {
        let decl = PropertyDecl::new("range");
        assert_eq!(decl.order(), i32::MAX);
        assert!(!decl.is_required());
        assert!(decl.accepted().is_none());
        assert!(decl.accessor().is_none());
    }

    #[test]
    fn test_accessor_reads_concrete_holder() {
        let decl = PropertyDecl::new("range").with_accessor(|holder: &dyn Any| {
            holder
                .downcast_ref::<Sample>()
                .map(|sample| Value::from(sample.range))
        });
        let accessor = decl.accessor().unwrap();
        let sample = Sample { range: 7 };
        assert_eq!(accessor(&sample as &dyn Any), Some(Value::from(7)));
        assert_eq!(accessor(&"not a sample" as &dyn Any), None);
    }
}
