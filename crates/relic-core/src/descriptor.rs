//! Static type descriptors for power and condition types.
//!
//! A descriptor is the registry's handle on a type: how to construct it,
//! which type it extends, which properties each level declares, and which
//! capabilities it implements. Descriptors are `static` values, normally
//! built with [`power_type!`](crate::power_type) or
//! [`condition_type!`](crate::condition_type) and listed by an extension.
//!
//! ```rust,ignore
//! pub static POTION_TICK: PowerType = power_type!(PotionTick, parent: BASE_POWER)
//!     .with_meta(TypeMeta::new().with_implementation(PotionTickImpl::create))
//!     .with_capabilities(PotionTickImpl::CAPABILITIES);
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::capability::{CapabilityId, Pimpl};
use crate::error::BoxError;
use crate::holder::{Condition, Power};
use crate::property::{DeclareProperties, Projection, PropertyDecl};

/// Zero-argument factory producing a default instance.
pub type Factory<T> = fn() -> Result<Box<T>, BoxError>;

/// Builds the implementation wrapper for a live power instance.
pub type ImplFactory = fn(Arc<dyn Power>) -> Result<Arc<dyn Pimpl>, BoxError>;

/// Whether a descriptor can be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Concrete,
    /// Shared base type; never instantiated.
    Abstract,
    /// Capability-only type; never instantiated.
    Interface,
}

/// Registration metadata, the presence of which marks a type as
/// discoverable from an extension's type list.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMeta {
    /// Leave every property accessor unbound.
    pub marker: bool,
    /// Capabilities adapters may start from, in preference order.
    pub general_interfaces: &'static [CapabilityId],
    pub implementation: Option<ImplFactory>,
    /// Users cannot edit this power's trigger list.
    pub immutable_trigger: bool,
}

impl TypeMeta {
    pub const fn new() -> Self {
        Self {
            marker: false,
            general_interfaces: &[],
            implementation: None,
            immutable_trigger: false,
        }
    }

    pub const fn marker(mut self) -> Self {
        self.marker = true;
        self
    }

    pub const fn with_general_interfaces(mut self, interfaces: &'static [CapabilityId]) -> Self {
        self.general_interfaces = interfaces;
        self
    }

    pub const fn with_implementation(mut self, factory: ImplFactory) -> Self {
        self.implementation = Some(factory);
        self
    }

    pub const fn immutable_trigger(mut self) -> Self {
        self.immutable_trigger = true;
        self
    }
}

/// Link from a descriptor to the descriptor of its parent type.
pub struct ParentLink<T: ?Sized + 'static> {
    pub descriptor: &'static TypeDescriptor<T>,
    /// Projects an instance of the child onto its embedded parent value.
    pub project: Projection,
}

/// Describes one power or condition type.
pub struct TypeDescriptor<T: ?Sized + 'static> {
    /// Fully qualified type path; also the registration sort key.
    pub name: &'static str,
    pub kind: TypeKind,
    pub type_id: fn() -> TypeId,
    pub create: Option<Factory<T>>,
    pub parent: Option<ParentLink<T>>,
    /// Properties declared on this level of the chain.
    pub properties: fn() -> Vec<PropertyDecl>,
    pub meta: Option<TypeMeta>,
    /// Capabilities implemented directly by this type's wrapper.
    pub capabilities: &'static [CapabilityId],
}

/// Descriptor of a power type.
pub type PowerType = TypeDescriptor<dyn Power>;

/// Descriptor of a condition type.
pub type ConditionType = TypeDescriptor<dyn Condition>;

fn no_properties() -> Vec<PropertyDecl> {
    Vec::new()
}

fn create_power<P: Power + Default>() -> Result<Box<dyn Power>, BoxError> {
    Ok(Box::new(P::default()))
}

fn create_condition<C: Condition + Default>() -> Result<Box<dyn Condition>, BoxError> {
    Ok(Box::new(C::default()))
}

impl<T: ?Sized + 'static> TypeDescriptor<T> {
    /// A descriptor with no factory, parent, properties, or metadata.
    pub const fn bare<U: Any>(name: &'static str, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            type_id: TypeId::of::<U>,
            create: None,
            parent: None,
            properties: no_properties,
            meta: None,
            capabilities: &[],
        }
    }

    /// Uses the declared property table of `U`.
    pub const fn with_declared<U: DeclareProperties>(mut self) -> Self {
        self.properties = U::declared_properties;
        self
    }

    pub const fn with_properties(mut self, properties: fn() -> Vec<PropertyDecl>) -> Self {
        self.properties = properties;
        self
    }

    pub const fn with_parent(mut self, parent: &'static TypeDescriptor<T>, project: Projection) -> Self {
        self.parent = Some(ParentLink {
            descriptor: parent,
            project,
        });
        self
    }

    pub const fn with_factory(mut self, create: Factory<T>) -> Self {
        self.create = Some(create);
        self
    }

    pub const fn with_meta(mut self, meta: TypeMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub const fn with_capabilities(mut self, capabilities: &'static [CapabilityId]) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    pub fn is_instantiable(&self) -> bool {
        self.kind == TypeKind::Concrete
    }

    /// This descriptor followed by its ancestors, nearest first.
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static TypeDescriptor<T>> {
        std::iter::successors(Some(self), |descriptor| {
            descriptor.parent.as_ref().map(|link| link.descriptor)
        })
    }

    /// Whether `other` appears in this descriptor's lineage.
    pub fn is_subtype_of(&'static self, other: &TypeDescriptor<T>) -> bool {
        let target = other.type_id();
        self.lineage().any(|descriptor| descriptor.type_id() == target)
    }

    /// Capabilities of the whole lineage, deduplicated, nearest level first.
    pub fn all_capabilities(&'static self) -> Vec<CapabilityId> {
        let mut all: Vec<CapabilityId> = Vec::new();
        for capability in self.lineage().flat_map(|descriptor| descriptor.capabilities) {
            if !all.contains(capability) {
                all.push(*capability);
            }
        }
        all
    }
}

impl PowerType {
    /// A concrete power constructed through `Default`.
    pub const fn power<P: Power + Default + DeclareProperties>(name: &'static str) -> Self {
        Self::bare::<P>(name, TypeKind::Concrete)
            .with_declared::<P>()
            .with_factory(create_power::<P>)
    }

    /// An abstract base power.
    pub const fn abstract_power<P: Power + DeclareProperties>(name: &'static str) -> Self {
        Self::bare::<P>(name, TypeKind::Abstract).with_declared::<P>()
    }
}

impl ConditionType {
    /// A concrete condition constructed through `Default`.
    pub const fn condition<C: Condition + Default + DeclareProperties>(name: &'static str) -> Self {
        Self::bare::<C>(name, TypeKind::Concrete)
            .with_declared::<C>()
            .with_factory(create_condition::<C>)
    }

    /// An abstract base condition.
    pub const fn abstract_condition<C: Condition + DeclareProperties>(name: &'static str) -> Self {
        Self::bare::<C>(name, TypeKind::Abstract).with_declared::<C>()
    }
}

impl<T: ?Sized + 'static> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parent", &self.parent.as_ref().map(|link| link.descriptor.name))
            .field("meta", &self.meta)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

impl<T: ?Sized + 'static> PartialEq for TypeDescriptor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl<T: ?Sized + 'static> Eq for TypeDescriptor<T> {}
