//! Capability identity and implementation wrappers.
//!
//! # Overview
//!
//! A capability is a trait describing one way a power can be invoked
//! (`PowerTick`, `PowerHit`, ...). Each capability trait object implements
//! [`Capability`], giving it a stable [`CapabilityId`] and the triggers it
//! contributes, the same way services declare their id in a
//! `ServiceMeta`-style marker trait.
//!
//! A [`Pimpl`] wraps a live power and implements some capability traits
//! directly. Other capabilities are reached through adapters registered with
//! the registry, which consume the erased [`CapabilityView`] returned by
//! [`Pimpl::upcast`].

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::game::{EntityId, PowerOutcome, TriggerContext};
use crate::holder::Power;
use crate::trigger::TriggerType;

/// Stable identity of a capability trait.
#[derive(Clone, Copy)]
pub struct CapabilityId {
    name: &'static str,
    triggers: &'static [TriggerType],
}

impl CapabilityId {
    /// A capability contributing no triggers.
    pub const fn new(name: &'static str) -> Self {
        Self { name, triggers: &[] }
    }

    pub const fn with_triggers(name: &'static str, triggers: &'static [TriggerType]) -> Self {
        Self { name, triggers }
    }

    /// Declares a capability owned by an extension.
    ///
    /// `name` must read `namespace:name`, so ids declared by different
    /// extensions never collide with each other or with the built-in
    /// trigger capabilities. Panics (at compile time in const contexts)
    /// otherwise.
    pub const fn namespaced(name: &'static str, triggers: &'static [TriggerType]) -> Self {
        assert!(
            is_namespaced(name),
            "capability ids declared by extensions must be `namespace:name`"
        );
        Self { name, triggers }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The owning namespace, `None` for built-in capabilities.
    pub fn namespace(&self) -> Option<&'static str> {
        self.name.split_once(':').map(|(namespace, _)| namespace)
    }

    /// Triggers a power gains by implementing this capability.
    pub const fn triggers(&self) -> &'static [TriggerType] {
        self.triggers
    }
}

/// Exactly one `:` with a non-empty lowercase namespace and name on either side.
const fn is_namespaced(name: &str) -> bool {
    let bytes = name.as_bytes();
    let mut colon = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b':' if colon.is_none() => colon = Some(i),
            b':' => return false,
            b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' => {}
            _ => return false,
        }
        i += 1;
    }
    match colon {
        Some(at) => at > 0 && at + 1 < bytes.len(),
        None => false,
    }
}

impl PartialEq for CapabilityId {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CapabilityId {}

impl Hash for CapabilityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapabilityId({})", self.name)
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Implemented for `dyn CapabilityTrait`.
pub trait Capability: 'static {
    const ID: CapabilityId;
}

/// An erased `Arc<dyn C>` for some capability `C`.
pub type CapabilityView = Box<dyn Any + Send + Sync>;

/// Implementation wrapper around a live power instance.
///
/// Usually implemented through [`impl_pimpl!`](crate::impl_pimpl).
pub trait Pimpl: Any + Send + Sync {
    /// The wrapped power.
    fn power(&self) -> &dyn Power;

    /// Capabilities this wrapper implements directly.
    fn capabilities(&self) -> &'static [CapabilityId];

    /// Returns `Arc<dyn C>` boxed as a [`CapabilityView`] when `capability`
    /// is one of [`capabilities`](Self::capabilities).
    fn upcast(self: Arc<Self>, capability: CapabilityId) -> Option<CapabilityView>;
}

/// Recovers a typed capability from a view produced by [`Pimpl::upcast`].
pub fn downcast_view<C: ?Sized + Capability + Send + Sync>(view: CapabilityView) -> Option<Arc<C>> {
    view.downcast::<Arc<C>>().ok().map(|boxed| *boxed)
}

// =============================================================================
// Trigger Capabilities
// =============================================================================

macro_rules! trigger_capability {
    (
        $(#[$attr:meta])*
        $name:ident = $id:literal [$($trigger:ident),*] {
            $($body:tt)*
        }
    ) => {
        $(#[$attr])*
        pub trait $name: Pimpl {
            $($body)*
        }

        impl Capability for dyn $name {
            const ID: CapabilityId =
                CapabilityId::with_triggers($id, &[$(TriggerType::$trigger),*]);
        }
    };
}

trigger_capability! {
    /// A generic activation with no event-specific data.
    ///
    /// Contributes no trigger on its own; adapters map it onto concrete
    /// trigger capabilities.
    PowerPlain = "plain" [] {
        fn fire(&self, ctx: &TriggerContext<'_>) -> PowerOutcome;
    }
}

trigger_capability! {
    /// The holder hit an entity. Returns the adjusted damage.
    PowerHit = "hit" [Hit] {
        fn hit(&self, ctx: &TriggerContext<'_>, target: EntityId, damage: f64) -> PowerOutcome<f64>;
    }
}

trigger_capability! {
    /// The holder was hit by an entity. Returns the adjusted damage.
    PowerHitTaken = "hit_taken" [HitTaken] {
        fn take_hit(&self, ctx: &TriggerContext<'_>, attacker: EntityId, damage: f64) -> PowerOutcome<f64>;
    }
}

trigger_capability! {
    /// The holder took damage from any source.
    PowerHurt = "hurt" [Hurt] {
        fn hurt(&self, ctx: &TriggerContext<'_>) -> PowerOutcome;
    }
}

trigger_capability! {
    PowerLeftClick = "left_click" [LeftClick] {
        fn left_click(&self, ctx: &TriggerContext<'_>) -> PowerOutcome;
    }
}

trigger_capability! {
    PowerRightClick = "right_click" [RightClick] {
        fn right_click(&self, ctx: &TriggerContext<'_>) -> PowerOutcome;
    }
}

trigger_capability! {
    PowerOffhandClick = "offhand_click" [OffhandClick] {
        fn offhand_click(&self, ctx: &TriggerContext<'_>) -> PowerOutcome;
    }
}

trigger_capability! {
    PowerProjectileHit = "projectile_hit" [ProjectileHit] {
        fn projectile_hit(&self, ctx: &TriggerContext<'_>, projectile: EntityId) -> PowerOutcome;
    }
}

trigger_capability! {
    PowerProjectileLaunch = "projectile_launch" [ProjectileLaunch] {
        fn projectile_launch(&self, ctx: &TriggerContext<'_>, projectile: EntityId) -> PowerOutcome;
    }
}

trigger_capability! {
    PowerSneak = "sneak" [Sneak] {
        fn sneak(&self, ctx: &TriggerContext<'_>) -> PowerOutcome;
    }
}

trigger_capability! {
    PowerSprint = "sprint" [Sprint] {
        fn sprint(&self, ctx: &TriggerContext<'_>) -> PowerOutcome;
    }
}

trigger_capability! {
    /// Swapping the item between hands.
    PowerSwap = "swap" [SwapToOffhand, SwapToMainhand] {
        fn swap_to_offhand(&self, ctx: &TriggerContext<'_>) -> PowerOutcome;
        fn swap_to_mainhand(&self, ctx: &TriggerContext<'_>) -> PowerOutcome;
    }
}

trigger_capability! {
    /// Fired periodically while the item is held or worn.
    PowerTick = "tick" [Tick] {
        fn tick(&self, ctx: &TriggerContext<'_>) -> PowerOutcome;
    }
}

trigger_capability! {
    PowerConsume = "consume" [Consume] {
        fn consume(&self, ctx: &TriggerContext<'_>) -> PowerOutcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_compare_by_name() {
        assert_eq!(<dyn PowerTick as Capability>::ID, CapabilityId::new("tick"));
        assert_ne!(
            <dyn PowerTick as Capability>::ID,
            <dyn PowerHit as Capability>::ID
        );
    }

    #[test]
    fn test_trigger_contributions() {
        assert!(<dyn PowerPlain as Capability>::ID.triggers().is_empty());
        assert_eq!(
            <dyn PowerSwap as Capability>::ID.triggers(),
            &[TriggerType::SwapToOffhand, TriggerType::SwapToMainhand]
        );
    }

    trait PowerGlide: Pimpl {}
    trait OtherGlide: Pimpl {}

    crate::capability!(dyn PowerGlide => "wings:glide", [Sneak]);
    crate::capability!(dyn OtherGlide => "kites:glide");

    #[test]
    fn test_custom_capability() {
        let id = <dyn PowerGlide as Capability>::ID;
        assert_eq!(id.name(), "wings:glide");
        assert_eq!(id.namespace(), Some("wings"));
        assert_eq!(id.triggers(), &[TriggerType::Sneak]);
        assert_eq!(<dyn PowerTick as Capability>::ID.namespace(), None);
    }

    #[test]
    fn test_custom_capabilities_are_kept_apart_by_namespace() {
        let wings = <dyn PowerGlide as Capability>::ID;
        let kites = <dyn OtherGlide as Capability>::ID;
        assert_ne!(wings, kites);
        let ids: std::collections::HashSet<_> = [wings, kites].into_iter().collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_namespaced_ids_are_validated() {
        assert!(is_namespaced("myext:glow"));
        assert!(!is_namespaced("glow"));
        assert!(!is_namespaced(":glow"));
        assert!(!is_namespaced("myext:"));
        assert!(!is_namespaced("a:b:c"));
        assert!(!is_namespaced("MyExt:glow"));
    }

    #[test]
    #[should_panic(expected = "namespace:name")]
    fn test_bare_custom_id_is_rejected() {
        let name = String::from("glide").leak();
        let _ = CapabilityId::namespaced(name, &[]);
    }
}
