//! Capability adapter table.
//!
//! An adapter converts a pimpl's view of a *general* capability into a
//! *specific* one, for example turning any `PowerPlain` into a
//! `PowerRightClick`. Adapters are global across extensions and keyed by the
//! `(general, specific)` pair.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use relic_core::{Capability, CapabilityId, CapabilityView, downcast_view};

type Converter = Arc<dyn Fn(CapabilityView) -> Option<CapabilityView> + Send + Sync>;

/// `(general, specific) → converter` map.
#[derive(Default, Clone)]
pub struct AdapterTable {
    entries: HashMap<(CapabilityId, CapabilityId), Converter>,
    // Registration order of the pairs, for deterministic iteration.
    order: Vec<(CapabilityId, CapabilityId)>,
}

impl AdapterTable {
    /// Registers `converter` for `(G, S)`. Returns `true` when it replaced
    /// an existing adapter.
    pub fn insert<G, S>(&mut self, converter: fn(Arc<G>) -> Arc<S>) -> bool
    where
        G: ?Sized + Capability + Send + Sync,
        S: ?Sized + Capability + Send + Sync,
    {
        let pair = (G::ID, S::ID);
        let erased: Converter = Arc::new(move |view: CapabilityView| {
            let general = downcast_view::<G>(view)?;
            let specific: CapabilityView = Box::new(converter(general));
            Some(specific)
        });
        let replaced = self.entries.insert(pair, erased).is_some();
        if !replaced {
            self.order.push(pair);
        }
        replaced
    }

    pub fn contains(&self, general: CapabilityId, specific: CapabilityId) -> bool {
        self.entries.contains_key(&(general, specific))
    }

    /// Converts a view of `general` into a view of `specific`.
    pub fn convert(
        &self,
        general: CapabilityId,
        specific: CapabilityId,
        view: CapabilityView,
    ) -> Option<CapabilityView> {
        self.entries.get(&(general, specific))?(view)
    }

    /// Specific capabilities reachable from `general`, in registration order.
    pub fn targets(&self, general: CapabilityId) -> impl Iterator<Item = CapabilityId> + '_ {
        self.order
            .iter()
            .filter(move |(from, _)| *from == general)
            .map(|(_, to)| *to)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for AdapterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.order.iter()).finish()
    }
}
