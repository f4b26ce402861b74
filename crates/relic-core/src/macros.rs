//! Declaration macros for descriptors, wrappers and capabilities.

/// Builds a [`PowerType`](crate::PowerType) for a type deriving `Properties`.
///
/// ```rust,ignore
/// pub static BASE_POWER: PowerType = power_type!(abstract BasePower);
/// pub static STUCK: PowerType = power_type!(Stuck, parent: BASE_POWER)
///     .with_meta(TypeMeta::new().with_implementation(StuckImpl::create))
///     .with_capabilities(StuckImpl::CAPABILITIES);
/// ```
#[macro_export]
macro_rules! power_type {
    (abstract $ty:ty) => {
        $crate::PowerType::abstract_power::<$ty>(concat!(module_path!(), "::", stringify!($ty)))
    };
    (abstract $ty:ty, parent: $parent:path) => {
        $crate::power_type!(abstract $ty)
            .with_parent(&$parent, <$ty as $crate::DeclareProperties>::project_parent)
    };
    ($ty:ty) => {
        $crate::PowerType::power::<$ty>(concat!(module_path!(), "::", stringify!($ty)))
    };
    ($ty:ty, parent: $parent:path) => {
        $crate::power_type!($ty)
            .with_parent(&$parent, <$ty as $crate::DeclareProperties>::project_parent)
    };
}

/// Builds a [`ConditionType`](crate::ConditionType); see [`power_type!`].
#[macro_export]
macro_rules! condition_type {
    (abstract $ty:ty) => {
        $crate::ConditionType::abstract_condition::<$ty>(concat!(
            module_path!(),
            "::",
            stringify!($ty)
        ))
    };
    ($ty:ty) => {
        $crate::ConditionType::condition::<$ty>(concat!(module_path!(), "::", stringify!($ty)))
    };
    ($ty:ty, parent: $parent:path) => {
        $crate::condition_type!($ty)
            .with_parent(&$parent, <$ty as $crate::DeclareProperties>::project_parent)
    };
}

/// Implements [`Pimpl`](crate::Pimpl) for a wrapper holding `power: Arc<P>`.
///
/// Generates:
/// - `CAPABILITIES`, the static capability list for the descriptor
/// - `create`, an [`ImplFactory`](crate::ImplFactory) downcasting the power
/// - the `Pimpl` impl, upcasting to each listed capability
///
/// The wrapper must also implement every listed capability trait.
///
/// ```rust,ignore
/// pub struct PotionTickImpl {
///     power: Arc<PotionTick>,
/// }
///
/// impl_pimpl!(PotionTickImpl for PotionTick: [dyn PowerTick]);
/// ```
#[macro_export]
macro_rules! impl_pimpl {
    ($wrapper:ident for $power:ty: [$($cap:ty),* $(,)?]) => {
        impl $wrapper {
            pub const CAPABILITIES: &'static [$crate::CapabilityId] =
                &[$(<$cap as $crate::Capability>::ID),*];

            pub fn create(
                power: ::std::sync::Arc<dyn $crate::Power>,
            ) -> ::std::result::Result<::std::sync::Arc<dyn $crate::Pimpl>, $crate::BoxError> {
                let power = $crate::AsAny::into_any(power)
                    .downcast::<$power>()
                    .map_err(|_| concat!("expected an instance of ", stringify!($power)))?;
                Ok(::std::sync::Arc::new(Self { power }))
            }
        }

        impl $crate::Pimpl for $wrapper {
            fn power(&self) -> &dyn $crate::Power {
                &*self.power
            }

            fn capabilities(&self) -> &'static [$crate::CapabilityId] {
                Self::CAPABILITIES
            }

            #[allow(unused_variables)]
            fn upcast(
                self: ::std::sync::Arc<Self>,
                capability: $crate::CapabilityId,
            ) -> ::std::option::Option<$crate::CapabilityView> {
                $(
                    if capability == <$cap as $crate::Capability>::ID {
                        let view: ::std::sync::Arc<$cap> = self;
                        return Some(::std::boxed::Box::new(view));
                    }
                )*
                None
            }
        }
    };
}

/// Declares the [`CapabilityId`](crate::CapabilityId) of a custom capability trait.
///
/// The id must be namespaced by the declaring extension; a bare name fails
/// to compile.
///
/// ```rust,ignore
/// pub trait PowerGlow: Pimpl { fn glow(&self, ctx: &TriggerContext<'_>) -> PowerOutcome; }
/// capability!(dyn PowerGlow => "myext:glow", [Tick]);
/// ```
#[macro_export]
macro_rules! capability {
    ($cap:ty => $name:literal) => {
        $crate::capability!($cap => $name, []);
    };
    ($cap:ty => $name:literal, [$($trigger:ident),* $(,)?]) => {
        impl $crate::Capability for $cap {
            const ID: $crate::CapabilityId = $crate::CapabilityId::namespaced(
                $name,
                &[$($crate::TriggerType::$trigger),*],
            );
        }
    };
}
