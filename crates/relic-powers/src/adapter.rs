//! Capability adapters registered by the built-in extension.

use std::sync::Arc;

use relic_core::CapabilityView;
use relic_core::prelude::*;

/// Fires a plain power on right click.
pub struct PlainRightClick {
    plain: Arc<dyn PowerPlain>,
}

impl PlainRightClick {
    const CAPABILITIES: &'static [CapabilityId] = &[<dyn PowerRightClick as Capability>::ID];
}

impl Pimpl for PlainRightClick {
    fn power(&self) -> &dyn Power {
        self.plain.power()
    }

    fn capabilities(&self) -> &'static [CapabilityId] {
        Self::CAPABILITIES
    }

    fn upcast(self: Arc<Self>, capability: CapabilityId) -> Option<CapabilityView> {
        if capability == <dyn PowerRightClick as Capability>::ID {
            let view: Arc<dyn PowerRightClick> = self;
            return Some(Box::new(view));
        }
        None
    }
}

impl PowerRightClick for PlainRightClick {
    fn right_click(&self, ctx: &TriggerContext<'_>) -> PowerOutcome {
        self.plain.fire(ctx)
    }
}

pub fn plain_to_right_click(plain: Arc<dyn PowerPlain>) -> Arc<dyn PowerRightClick> {
    Arc::new(PlainRightClick { plain })
}
