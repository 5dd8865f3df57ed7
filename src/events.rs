//! Hooks that let other systems modify or veto damage

use std::sync::Arc;

use crate::body::model::{ModelSnapshot, PlayerDamageModel};
use crate::core::types::EntityId;
use crate::damage::source::DamageSource;
use crate::host::PlayerHost;

/// Listener verdict on a cancellable event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Continue,
    Cancel,
}

/// Fired after damage was distributed, before death is checked
pub struct PostDamageEvent<'a> {
    pub player: EntityId,
    /// Model with the damage applied
    pub after: &'a PlayerDamageModel,
    /// Model state before the damage
    pub before: &'a ModelSnapshot,
    pub source: &'a DamageSource,
    /// Damage no part could absorb
    pub undistributed: f32,
}

/// Receives damage events. Both hooks default to doing nothing.
pub trait DamageListener: Send + Sync {
    /// Modify the damage about to hit one armor slot's parts
    fn on_living_damage(
        &self,
        _player: &dyn PlayerHost,
        _source: &DamageSource,
        damage: f32,
    ) -> f32 {
        damage
    }

    fn on_post_damage(&self, _event: &PostDamageEvent<'_>) -> EventOutcome {
        EventOutcome::Continue
    }
}

/// Ordered set of listeners
#[derive(Default, Clone)]
pub struct EventBus {
    listeners: Vec<Arc<dyn DamageListener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Arc<dyn DamageListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Pass damage through every listener; stops once nothing is left
    pub fn fire_living_damage(
        &self,
        player: &dyn PlayerHost,
        source: &DamageSource,
        damage: f32,
    ) -> f32 {
        let mut damage = damage;
        for listener in &self.listeners {
            damage = listener.on_living_damage(player, source, damage);
            if damage <= 0.0 {
                return 0.0;
            }
        }
        damage
    }

    /// Returns [`EventOutcome::Cancel`] as soon as one listener vetoes
    pub fn post_damage(&self, event: &PostDamageEvent<'_>) -> EventOutcome {
        for listener in &self.listeners {
            if listener.on_post_damage(event) == EventOutcome::Cancel {
                return EventOutcome::Cancel;
            }
        }
        EventOutcome::Continue
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
