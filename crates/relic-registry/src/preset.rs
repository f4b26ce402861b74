//! Trigger classification and enumerable property values.

use relic_core::{
    AcceptedValues, CapabilityId, POTION_EFFECT_TYPES, Preset, TriggerType, TypeDescriptor,
    visual_effects,
};

use crate::registry::Registry;

impl Registry {
    /// Triggers a type responds to.
    ///
    /// Collects the triggers of every capability in the type's lineage,
    /// nearest level first, then those of capabilities reachable through
    /// adapters from the type's general interfaces.
    pub fn triggers<T: ?Sized + 'static>(
        &self,
        descriptor: &'static TypeDescriptor<T>,
    ) -> Vec<TriggerType> {
        let statics = descriptor.all_capabilities();
        let adapted: Vec<CapabilityId> = self
            .meta_of(descriptor)
            .or(descriptor.meta.as_ref())
            .map(|meta| meta.general_interfaces)
            .unwrap_or_default()
            .iter()
            .filter(|general| statics.contains(general))
            .flat_map(|general| self.adapters.targets(*general))
            .collect();

        let mut triggers = Vec::new();
        for trigger in statics
            .iter()
            .chain(&adapted)
            .flat_map(|capability| capability.triggers())
        {
            if !triggers.contains(trigger) {
                triggers.push(*trigger);
            }
        }
        triggers
    }

    /// Values enumerated by `preset` for `descriptor`.
    pub fn preset_values<T: ?Sized + 'static>(
        &self,
        descriptor: &'static TypeDescriptor<T>,
        preset: Preset,
    ) -> Vec<String> {
        match preset {
            Preset::None => Vec::new(),
            Preset::PotionEffectType => POTION_EFFECT_TYPES.iter().map(|s| s.to_string()).collect(),
            Preset::Triggers => self
                .triggers(descriptor)
                .into_iter()
                .map(|trigger| trigger.name().to_string())
                .collect(),
            Preset::VisualEffect => visual_effects().map(str::to_string).collect(),
        }
    }

    /// Values accepted by a property of `descriptor`.
    ///
    /// Without a preset this is the literal list, unchanged. With one it is
    /// the sorted, deduplicated union of the list and the preset's values.
    pub fn accepted_values<T: ?Sized + 'static>(
        &self,
        descriptor: &'static TypeDescriptor<T>,
        accepted: AcceptedValues,
    ) -> Vec<String> {
        let literal = accepted.values().iter().map(|s| s.to_string());
        if accepted.preset() == Preset::None {
            return literal.collect();
        }
        let mut values: Vec<String> = literal
            .chain(self.preset_values(descriptor, accepted.preset()))
            .collect();
        values.sort();
        values.dedup();
        values
    }
}
