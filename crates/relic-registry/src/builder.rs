//! Load-phase registration.
//!
//! [`RegistryBuilder`] is the only way to mutate registry state. Extensions
//! register their types, adapters, overrides and description resolvers
//! through it; [`RegistryBuilder::build`] then consumes it and hands back a
//! frozen [`Registry`].

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use relic_core::{
    Capability, ConditionType, Extension, NamespacedKey, PowerType, PropertyHolder,
    TypeDescriptor, TypeMeta,
};
use tracing::{debug, info, trace, warn};

use crate::description::DescriptionResolver;
use crate::error::{RegistrationError, RegistrationResult, RegistryError, RegistryResult};
use crate::extension::ExtensionDescriptor;
use crate::registry::{Registry, TypeTable};
use crate::report::RegistrationReport;
use crate::scan::{PropertyTable, scan};

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Builder for a [`Registry`].
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    /// Creates a builder with `host` as the host application's extension.
    pub fn new(host: Extension) -> Self {
        Self {
            registry: Registry::new(host, DEFAULT_LOCALE.to_string()),
        }
    }

    /// Sets the locale used by [`Registry::description_default`].
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.registry.default_locale = locale.into();
        self
    }

    /// Read access to the state registered so far.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Freezes the registry.
    pub fn build(self) -> Registry {
        info!(
            powers = self.registry.powers.len(),
            conditions = self.registry.conditions.len(),
            extensions = self.registry.extensions.len(),
            adapters = self.registry.adapters.len(),
            overrides = self.registry.overrides.len(),
            "Registry built"
        );
        self.registry
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Registers the concrete powers among `candidates` for `extension`.
    ///
    /// Each type is registered independently: a failing type is logged,
    /// recorded in the report, and leaves no trace in the registry.
    pub fn register_powers(
        &mut self,
        extension: &Extension,
        candidates: &[&'static PowerType],
    ) -> RegistrationReport {
        self.registry.add_extension(extension);
        let Registry {
            powers,
            metas,
            properties,
            ..
        } = &mut self.registry;
        register_types(
            Tables {
                types: powers,
                metas,
                properties,
            },
            "power",
            candidates,
        )
    }

    /// Registers the concrete conditions among `candidates` for `extension`.
    pub fn register_conditions(
        &mut self,
        extension: &Extension,
        candidates: &[&'static ConditionType],
    ) -> RegistrationReport {
        self.registry.add_extension(extension);
        let Registry {
            conditions,
            metas,
            properties,
            ..
        } = &mut self.registry;
        register_types(
            Tables {
                types: conditions,
                metas,
                properties,
            },
            "condition",
            candidates,
        )
    }

    /// Registers a statically linked extension.
    ///
    /// Only candidates carrying [`TypeMeta`] are registered. The setup hook
    /// runs afterwards, whatever the outcome of the individual types. A
    /// failing hook is recorded in the report; the types stay registered
    /// and other extensions are unaffected.
    pub fn register_extension(&mut self, descriptor: &ExtensionDescriptor) -> RegistrationReport {
        let extension = Extension::new(descriptor.name);

        let powers = with_meta(descriptor.powers);
        let conditions = with_meta(descriptor.conditions);

        let mut report = self.register_powers(&extension, &powers);
        report.merge(self.register_conditions(&extension, &conditions));

        if let Some(Err(e)) = descriptor.setup.map(|setup| setup(self, &extension)) {
            warn!(extension = descriptor.name, error = %e, "Extension setup failed");
            report.setup_error = Some(RegistryError::Setup {
                extension: descriptor.name.to_string(),
                reason: e.to_string(),
            });
        }

        info!(
            extension = descriptor.name,
            registered = report.registered.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Extension registered"
        );
        report
    }

    // =========================================================================
    // Adapters and overrides
    // =========================================================================

    /// Registers a converter from capability `G` to capability `S`.
    ///
    /// A later registration for the same pair replaces the earlier one.
    pub fn register_adapter<G, S>(&mut self, converter: fn(Arc<G>) -> Arc<S>) -> &mut Self
    where
        G: ?Sized + Capability + Send + Sync,
        S: ?Sized + Capability + Send + Sync,
    {
        if self.registry.adapters.insert::<G, S>(converter) {
            warn!(general = %G::ID, specific = %S::ID, "Replaced existing adapter");
        } else {
            debug!(general = %G::ID, specific = %S::ID, "Registered adapter");
        }
        self
    }

    /// Makes `get_power(origin)` resolve to the power registered as
    /// `replacement`.
    ///
    /// The replacement's type must descend from the origin's type and
    /// provide every capability the origin provides.
    pub fn register_override(
        &mut self,
        origin: &NamespacedKey,
        replacement: &NamespacedKey,
    ) -> RegistryResult<()> {
        if let Some(existing) = self.registry.overrides.get(origin) {
            return Err(RegistryError::OverrideConflict {
                origin: origin.clone(),
                replacement: replacement.clone(),
                existing: existing.clone(),
            });
        }
        if origin == replacement {
            return Err(RegistryError::SelfOverride(origin.clone()));
        }

        let origin_type = self
            .registry
            .powers
            .get(origin)
            .ok_or_else(|| RegistryError::UnknownType(origin.clone()))?;
        let replacement_type = self
            .registry
            .powers
            .get(replacement)
            .ok_or_else(|| RegistryError::UnknownType(replacement.clone()))?;

        let provided = replacement_type.all_capabilities();
        let covers_origin = origin_type
            .all_capabilities()
            .iter()
            .all(|capability| provided.contains(capability));
        if !replacement_type.is_subtype_of(origin_type) || !covers_origin {
            return Err(RegistryError::InvalidOverrideSubtype {
                origin: origin.clone(),
                origin_type: origin_type.name,
                replacement: replacement.clone(),
                replacement_type: replacement_type.name,
            });
        }

        self.registry
            .overrides
            .insert(origin.clone(), replacement.clone());
        info!(origin = %origin, replacement = %replacement, "Registered power override");
        Ok(())
    }

    // =========================================================================
    // Descriptions
    // =========================================================================

    /// Registers `resolver` for properties of `extension`'s types in `locale`.
    pub fn add_description_resolver<F>(
        &mut self,
        extension: &Extension,
        locale: impl Into<String>,
        resolver: F,
    ) -> &mut Self
    where
        F: Fn(&NamespacedKey, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.registry.add_extension(extension);
        let locale = locale.into();
        let resolver: DescriptionResolver = Arc::new(resolver);
        if self
            .registry
            .descriptions
            .insert(extension.namespace(), locale.clone(), resolver)
        {
            warn!(extension = %extension, locale = %locale, "Replaced description resolver");
        } else {
            debug!(extension = %extension, locale = %locale, "Registered description resolver");
        }
        self
    }

    /// Registers `resolver` for the default locale.
    pub fn add_default_description_resolver<F>(
        &mut self,
        extension: &Extension,
        resolver: F,
    ) -> &mut Self
    where
        F: Fn(&NamespacedKey, &str) -> Option<String> + Send + Sync + 'static,
    {
        let locale = self.registry.default_locale.clone();
        self.add_description_resolver(extension, locale, resolver)
    }
}

fn with_meta<T: ?Sized>(
    candidates: &[&'static TypeDescriptor<T>],
) -> Vec<&'static TypeDescriptor<T>> {
    candidates
        .iter()
        .copied()
        .filter(|descriptor| {
            let keep = descriptor.meta.is_some();
            if !keep {
                trace!(type_name = descriptor.name, "Ignoring type without metadata");
            }
            keep
        })
        .collect()
}

// =============================================================================
// Per-type registration
// =============================================================================

struct Tables<'a, T: ?Sized + 'static> {
    types: &'a mut TypeTable<T>,
    metas: &'a mut HashMap<TypeId, TypeMeta>,
    properties: &'a mut HashMap<TypeId, PropertyTable>,
}

fn register_types<T>(
    mut tables: Tables<'_, T>,
    kind: &'static str,
    candidates: &[&'static TypeDescriptor<T>],
) -> RegistrationReport
where
    T: ?Sized + PropertyHolder,
{
    let mut sorted: Vec<_> = candidates
        .iter()
        .copied()
        .filter(|descriptor| descriptor.is_instantiable())
        .collect();
    sorted.sort_by_key(|descriptor| descriptor.name);

    let mut report = RegistrationReport::default();
    for descriptor in sorted {
        match register_one(&mut tables, descriptor) {
            Ok(Some(key)) => {
                debug!(key = %key, type_name = descriptor.name, "Registered {kind}");
                report.registered.push(key);
            }
            Ok(None) => {
                trace!(type_name = descriptor.name, "Skipped {kind} without key");
                report.skipped.push(descriptor.name);
            }
            Err(error) => {
                warn!(type_name = descriptor.name, error = %error, "Failed to register {kind}");
                report.failed.push((descriptor.name, error));
            }
        }
    }
    report
}

/// Registers one type. Nothing is written until every check has passed.
fn register_one<T>(
    tables: &mut Tables<'_, T>,
    descriptor: &'static TypeDescriptor<T>,
) -> RegistrationResult<Option<NamespacedKey>>
where
    T: ?Sized + PropertyHolder,
{
    let type_name = descriptor.name;
    let create = descriptor
        .create
        .ok_or_else(|| RegistrationError::instantiation(type_name, "type has no factory"))?;
    let instance = guarded(type_name, create)?
        .map_err(|e| RegistrationError::instantiation(type_name, e.to_string()))?;

    let Some(key) = guarded(type_name, || instance.key())? else {
        return Ok(None);
    };
    key.validate()?;

    if let Some(existing) = tables.types.get(&key) {
        return Err(RegistrationError::DuplicateKey {
            key,
            type_name,
            existing: existing.name,
        });
    }
    if let Some(existing) = tables.types.key_of(descriptor) {
        return Err(RegistrationError::DuplicateType {
            type_name,
            existing: existing.clone(),
        });
    }

    let properties = scan(descriptor)?;

    let type_id = descriptor.type_id();
    tables.types.insert(key.clone(), descriptor);
    if let Some(meta) = descriptor.meta {
        tables.metas.insert(type_id, meta);
    }
    tables.properties.insert(type_id, properties);
    Ok(Some(key))
}

/// Runs extension code, turning a panic into an instantiation error.
fn guarded<R>(type_name: &'static str, f: impl FnOnce() -> R) -> RegistrationResult<R> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| RegistrationError::instantiation(type_name, panic_message(&*payload)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relic_core::{
        BoxError, Condition, KeyError, Power, PowerOutcome, PowerPlain, PowerRightClick,
        PowerTick, Properties, TriggerContext, TypeKind, condition_type, impl_pimpl, power_type,
    };

    fn host() -> Extension {
        Extension::new("relic")
    }

    // -- fixtures -------------------------------------------------------------

    #[derive(Debug, Default, Properties)]
    struct Glow {
        #[property(order = 0, required)]
        radius: u32,
    }

    impl PropertyHolder for Glow {
        fn key(&self) -> Option<NamespacedKey> {
            Some(NamespacedKey::new("relic", "glow"))
        }
    }

    impl Power for Glow {}

    #[derive(Debug, Default, Properties)]
    struct GlowClone;

    impl PropertyHolder for GlowClone {
        fn key(&self) -> Option<NamespacedKey> {
            Some(NamespacedKey::new("relic", "glow"))
        }
    }

    impl Power for GlowClone {}

    #[derive(Debug, Default, Properties)]
    struct Hidden;

    impl PropertyHolder for Hidden {
        fn key(&self) -> Option<NamespacedKey> {
            None
        }
    }

    impl Power for Hidden {}

    #[derive(Debug, Default, Properties)]
    struct Explosive;

    impl PropertyHolder for Explosive {
        fn key(&self) -> Option<NamespacedKey> {
            panic!("boom")
        }
    }

    impl Power for Explosive {}

    #[derive(Debug, Default, Properties)]
    struct BadKey;

    impl PropertyHolder for BadKey {
        fn key(&self) -> Option<NamespacedKey> {
            Some(NamespacedKey::new("relic", "bad key"))
        }
    }

    impl Power for BadKey {}

    #[derive(Debug, Default, Properties)]
    struct Ambiguous {
        #[property(parent)]
        glow: Glow,
        #[property(order = 1)]
        radius: u32,
    }

    impl PropertyHolder for Ambiguous {
        fn key(&self) -> Option<NamespacedKey> {
            Some(NamespacedKey::new("relic", "ambiguous"))
        }
    }

    impl Power for Ambiguous {}

    fn failing_factory() -> Result<Box<dyn Power>, BoxError> {
        Err("no world available".into())
    }

    static GLOW: PowerType = power_type!(Glow).with_meta(TypeMeta::new());
    static GLOW_CLONE: PowerType = power_type!(GlowClone).with_meta(TypeMeta::new());
    static HIDDEN: PowerType = power_type!(Hidden);
    static EXPLOSIVE: PowerType = power_type!(Explosive);
    static BAD_KEY: PowerType = power_type!(BadKey);
    static AMBIGUOUS: PowerType = power_type!(Ambiguous, parent: GLOW).with_meta(TypeMeta::new());
    static ABSTRACT_GLOW: PowerType = power_type!(abstract Glow);
    static FAILING: PowerType = power_type!(Hidden).with_factory(failing_factory);

    // Override fixtures: Pulse <- Strobe, plus an unrelated Flash.

    #[derive(Debug, Default, Properties)]
    struct Pulse;

    impl PropertyHolder for Pulse {
        fn key(&self) -> Option<NamespacedKey> {
            Some(NamespacedKey::new("relic", "pulse"))
        }
    }

    impl Power for Pulse {}

    struct PulseImpl {
        power: Arc<Pulse>,
    }

    impl_pimpl!(PulseImpl for Pulse: [dyn PowerTick]);

    impl PowerTick for PulseImpl {
        fn tick(&self, _ctx: &TriggerContext<'_>) -> PowerOutcome {
            let _ = &self.power;
            PowerOutcome::ok()
        }
    }

    #[derive(Debug, Default, Properties)]
    struct Strobe {
        #[property(parent)]
        pulse: Pulse,
    }

    impl PropertyHolder for Strobe {
        fn key(&self) -> Option<NamespacedKey> {
            Some(NamespacedKey::new("ext", "strobe"))
        }
    }

    impl Power for Strobe {}

    struct StrobeImpl {
        power: Arc<Strobe>,
    }

    impl_pimpl!(StrobeImpl for Strobe: [dyn PowerTick, dyn PowerPlain]);

    impl PowerTick for StrobeImpl {
        fn tick(&self, _ctx: &TriggerContext<'_>) -> PowerOutcome {
            let _ = &self.power;
            PowerOutcome::ok()
        }
    }

    impl PowerPlain for StrobeImpl {
        fn fire(&self, _ctx: &TriggerContext<'_>) -> PowerOutcome {
            PowerOutcome::ok()
        }
    }

    #[derive(Debug, Default, Properties)]
    struct Flash;

    impl PropertyHolder for Flash {
        fn key(&self) -> Option<NamespacedKey> {
            Some(NamespacedKey::new("ext", "flash"))
        }
    }

    impl Power for Flash {}

    static PULSE: PowerType = power_type!(Pulse)
        .with_meta(TypeMeta::new().with_implementation(PulseImpl::create))
        .with_capabilities(PulseImpl::CAPABILITIES);
    static STROBE: PowerType = power_type!(Strobe, parent: PULSE)
        .with_meta(TypeMeta::new().with_implementation(StrobeImpl::create))
        .with_capabilities(StrobeImpl::CAPABILITIES);
    static FLASH: PowerType = power_type!(Flash).with_meta(TypeMeta::new());
    fn pulse_factory() -> Result<Box<dyn Power>, BoxError> {
        Ok(Box::new(Pulse))
    }

    // Same type id as Glow, but instances report Pulse's key.
    static GLOW_ALIAS: PowerType =
        PowerType::bare::<Glow>("GlowAlias", TypeKind::Concrete).with_factory(pulse_factory);

    fn override_builder() -> RegistryBuilder {
        let mut builder = RegistryBuilder::new(host());
        let report = builder.register_powers(&host(), &[&PULSE]);
        assert!(report.is_clean());
        let report = builder.register_powers(&Extension::new("Ext"), &[&STROBE, &FLASH]);
        assert!(report.is_clean());
        builder
    }

    // -- registration ---------------------------------------------------------

    #[test]
    fn test_register_stores_type_meta_and_properties() {
        let mut builder = RegistryBuilder::new(host());
        let report = builder.register_powers(&host(), &[&GLOW]);
        let key = NamespacedKey::new("relic", "glow");
        assert_eq!(report.registered, [key.clone()]);

        let registry = builder.build();
        assert!(registry.has_power(&key));
        assert!(std::ptr::eq(registry.get_power(&key).unwrap(), &GLOW));
        assert_eq!(registry.power_key(&GLOW), Some(&key));
        assert!(registry.meta(&key).is_some());
        let properties = registry.properties(&key).unwrap();
        assert!(properties.get("radius").unwrap().is_required());
    }

    #[test]
    fn test_duplicate_key_keeps_first_in_name_order() {
        let mut builder = RegistryBuilder::new(host());
        // Passed out of order; registration sorts by type name.
        let report = builder.register_powers(&host(), &[&GLOW_CLONE, &GLOW]);
        assert_eq!(report.registered.len(), 1);
        assert!(matches!(
            report.failure(GLOW_CLONE.name),
            Some(RegistrationError::DuplicateKey { .. })
        ));

        let registry = builder.build();
        let key = NamespacedKey::new("relic", "glow");
        assert!(std::ptr::eq(registry.get_power(&key).unwrap(), &GLOW));
        assert!(registry.meta_of(&GLOW_CLONE).is_none());
        assert!(registry.properties_of(&GLOW_CLONE).is_none());
    }

    #[test]
    fn test_same_type_under_second_key_is_rejected() {
        let mut builder = RegistryBuilder::new(host());
        builder.register_powers(&host(), &[&GLOW]);
        let report = builder.register_powers(&host(), &[&GLOW_ALIAS]);
        assert!(matches!(
            report.failure("GlowAlias"),
            Some(RegistrationError::DuplicateType { existing, .. })
                if *existing == NamespacedKey::new("relic", "glow")
        ));
        assert_eq!(builder.registry().powers().len(), 1);
        assert!(!builder.registry().has_power(&NamespacedKey::new("relic", "pulse")));
    }

    #[test]
    fn test_keyless_type_is_skipped() {
        let mut builder = RegistryBuilder::new(host());
        let report = builder.register_powers(&host(), &[&HIDDEN]);
        assert!(report.registered.is_empty());
        assert_eq!(report.skipped, [HIDDEN.name]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_abstract_candidates_are_dropped() {
        let mut builder = RegistryBuilder::new(host());
        let report = builder.register_powers(&host(), &[&ABSTRACT_GLOW]);
        assert!(report.registered.is_empty());
        assert!(report.skipped.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_failures_are_contained() {
        let mut builder = RegistryBuilder::new(host());
        let report =
            builder.register_powers(&host(), &[&EXPLOSIVE, &FAILING, &BAD_KEY, &AMBIGUOUS, &GLOW]);

        assert!(matches!(
            report.failure(EXPLOSIVE.name),
            Some(RegistrationError::Instantiation { reason, .. }) if reason.contains("boom")
        ));
        assert!(matches!(
            report.failure(FAILING.name),
            Some(RegistrationError::Instantiation { reason, .. }) if reason == "no world available"
        ));
        assert!(matches!(
            report.failure(BAD_KEY.name),
            Some(RegistrationError::Key(KeyError::MalformedKey { .. }))
        ));
        assert!(matches!(
            report.failure(AMBIGUOUS.name),
            Some(RegistrationError::Scan(_))
        ));

        let registry = builder.build();
        assert_eq!(registry.powers().len(), 1);
        let ambiguous = NamespacedKey::new("relic", "ambiguous");
        assert!(!registry.has_power(&ambiguous));
        assert!(registry.meta_of(&AMBIGUOUS).is_none());
        assert!(registry.properties_of(&AMBIGUOUS).is_none());
    }

    #[test]
    fn test_extensions_registered_implicitly() {
        let mut builder = RegistryBuilder::new(host());
        assert!(!builder.registry().has_extensions());
        builder.register_powers(&Extension::new("Ext"), &[]);
        let registry = builder.build();
        assert!(registry.has_extensions());
        assert_eq!(registry.extension("EXT").map(Extension::name), Some("Ext"));
        let names: Vec<_> = registry.extensions().map(Extension::namespace).collect();
        assert_eq!(names, ["relic", "ext"]);
    }

    #[test]
    fn test_register_extension_keeps_meta_types_and_runs_setup() {
        fn setup(builder: &mut RegistryBuilder, extension: &Extension) -> RegistryResult<()> {
            builder.add_default_description_resolver(extension, |_, property| {
                Some(format!("about {property}"))
            });
            Ok(())
        }

        static DESCRIPTOR: ExtensionDescriptor = ExtensionDescriptor {
            name: "Ext",
            powers: &[&FLASH, &HIDDEN],
            conditions: &[],
            setup: Some(setup),
        };

        let mut builder = RegistryBuilder::new(host());
        let report = builder.register_extension(&DESCRIPTOR);
        // Hidden has no metadata and never reaches registration.
        assert!(report.skipped.is_empty());
        let flash = NamespacedKey::new("ext", "flash");
        assert_eq!(report.registered, [flash.clone()]);

        let registry = builder.build();
        assert_eq!(
            registry.description_default(&flash, "radius").as_deref(),
            Some("about radius")
        );
    }

    #[test]
    fn test_failing_setup_is_reported() {
        fn setup(_: &mut RegistryBuilder, _: &Extension) -> RegistryResult<()> {
            Err(RegistryError::NoImplementation("Nothing"))
        }

        static DESCRIPTOR: ExtensionDescriptor = ExtensionDescriptor {
            name: "broken",
            powers: &[],
            conditions: &[],
            setup: Some(setup),
        };

        let mut builder = RegistryBuilder::new(host());
        let report = builder.register_extension(&DESCRIPTOR);
        assert!(!report.is_clean());
        assert!(matches!(
            report.setup_error,
            Some(RegistryError::Setup { ref extension, .. }) if extension == "broken"
        ));
        assert!(builder.registry().extension("broken").is_some());
    }

    // -- overrides ------------------------------------------------------------

    #[test]
    fn test_override_resolves_one_hop() {
        let mut builder = override_builder();
        let pulse = NamespacedKey::new("relic", "pulse");
        let strobe = NamespacedKey::new("ext", "strobe");
        builder.register_override(&pulse, &strobe).unwrap();

        let registry = builder.build();
        assert!(std::ptr::eq(registry.get_power(&pulse).unwrap(), &STROBE));
        assert!(std::ptr::eq(registry.get_power(&strobe).unwrap(), &STROBE));
        assert!(registry.has_power(&pulse));
        assert_eq!(registry.override_of(&pulse), Some(&strobe));
    }

    #[test]
    fn test_override_conflict() {
        let mut builder = override_builder();
        let pulse = NamespacedKey::new("relic", "pulse");
        let strobe = NamespacedKey::new("ext", "strobe");
        builder.register_override(&pulse, &strobe).unwrap();
        assert!(matches!(
            builder.register_override(&pulse, &strobe),
            Err(RegistryError::OverrideConflict { existing, .. }) if existing == strobe
        ));
    }

    #[test]
    fn test_override_rejects_unrelated_and_unknown_types() {
        let mut builder = override_builder();
        let pulse = NamespacedKey::new("relic", "pulse");
        let flash = NamespacedKey::new("ext", "flash");
        let missing = NamespacedKey::new("ext", "missing");

        assert!(matches!(
            builder.register_override(&pulse, &flash),
            Err(RegistryError::InvalidOverrideSubtype { .. })
        ));
        assert!(matches!(
            builder.register_override(&pulse, &missing),
            Err(RegistryError::UnknownType(key)) if key == missing
        ));
        assert!(matches!(
            builder.register_override(&missing, &pulse),
            Err(RegistryError::UnknownType(key)) if key == missing
        ));
        assert!(matches!(
            builder.register_override(&pulse, &pulse),
            Err(RegistryError::SelfOverride(_))
        ));
        assert!(builder.registry().override_of(&pulse).is_none());
    }

    // -- conditions -----------------------------------------------------------

    #[derive(Debug, Default, Properties)]
    struct Sunny {
        #[property(order = 0)]
        threshold: u32,
    }

    impl PropertyHolder for Sunny {
        fn key(&self) -> Option<NamespacedKey> {
            Some(NamespacedKey::new("relic", "sunny"))
        }
    }

    impl Condition for Sunny {}

    static SUNNY: ConditionType = condition_type!(Sunny).with_meta(TypeMeta::new());
    static ANY_WEATHER: ConditionType =
        ConditionType::bare::<Sunny>("AnyWeather", TypeKind::Interface);

    #[test]
    fn test_conditions_have_their_own_key_space() {
        let mut builder = RegistryBuilder::new(host());
        let report = builder.register_conditions(&host(), &[&ANY_WEATHER, &SUNNY]);
        let key = NamespacedKey::new("relic", "sunny");
        assert_eq!(report.registered, [key.clone()]);
        assert!(report.is_clean());

        let registry = builder.build();
        assert!(std::ptr::eq(registry.get_condition(&key).unwrap(), &SUNNY));
        assert!(registry.has_condition(&key));
        assert!(!registry.has_power(&key));
        assert_eq!(registry.condition_key(&SUNNY), Some(&key));
        assert_eq!(registry.properties_of(&SUNNY).map(|table| table.len()), Some(1));
    }

    // -- adapters -------------------------------------------------------------

    #[test]
    fn test_register_adapter_replaces_same_pair() {
        fn first(plain: Arc<dyn PowerPlain>) -> Arc<dyn PowerRightClick> {
            let _ = plain;
            unreachable!()
        }
        fn second(plain: Arc<dyn PowerPlain>) -> Arc<dyn PowerRightClick> {
            let _ = plain;
            unreachable!()
        }

        let mut builder = RegistryBuilder::new(host());
        builder
            .register_adapter::<dyn PowerPlain, dyn PowerRightClick>(first)
            .register_adapter::<dyn PowerPlain, dyn PowerRightClick>(second);
        assert_eq!(builder.registry().adapters().len(), 1);
    }
}
