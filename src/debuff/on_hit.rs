//! Debuffs triggered by a single hit

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::core::types::{EffectId, Tick};
use crate::debuff::{Debuff, EnabledFn};
use crate::host::PlayerHost;

/// Applies an effect when one hit deals at least a threshold of damage
///
/// Conditions map damage thresholds to effect durations. The highest
/// threshold reached wins.
pub struct OnHitDebuff {
    effect: EffectId,
    conditions: BTreeMap<OrderedFloat<f32>, Tick>,
    enabled: EnabledFn,
    sound: Option<String>,
}

impl OnHitDebuff {
    pub fn new(
        effect: EffectId,
        conditions: BTreeMap<OrderedFloat<f32>, Tick>,
        enabled: EnabledFn,
        sound: Option<String>,
    ) -> Self {
        Self {
            effect,
            conditions,
            enabled,
            sound,
        }
    }

    /// Duration for a hit of `damage`, if any threshold is reached
    pub fn duration_for(&self, damage: f32) -> Option<Tick> {
        self.conditions
            .iter()
            .rev()
            .find(|(threshold, _)| damage >= threshold.0)
            .map(|(_, duration)| *duration)
    }
}

impl Debuff for OnHitDebuff {
    fn effect(&self) -> &EffectId {
        &self.effect
    }

    fn handle_damage_taken(
        &mut self,
        damage: f32,
        _health_per_max: f32,
        player: &mut dyn PlayerHost,
    ) {
        if !self.is_enabled() {
            return;
        }
        let Some(duration) = self.duration_for(damage) else {
            return;
        };
        // Never shorten an effect that is already running
        let running = player.active_effect_duration(&self.effect).unwrap_or(0);
        player.apply_effect(&self.effect, duration.max(running), 0);
        if let Some(sound) = &self.sound {
            player.play_sound(sound);
        }
    }

    fn handle_healing(
        &mut self,
        _healing_done: f32,
        _health_per_max: f32,
        _player: &mut dyn PlayerHost,
    ) {
    }

    fn is_enabled(&self) -> bool {
        (self.enabled)()
    }
}
