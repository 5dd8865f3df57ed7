//! Debuffs that last as long as a part stays injured

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::core::types::{EffectId, Tick};
use crate::debuff::{Debuff, EnabledFn};
use crate::host::PlayerHost;

/// Duration of each application of the effect
pub const EFFECT_DURATION: Tick = 169;

/// Ticks between re-applications, shorter than the duration so the effect never lapses
pub const REFRESH_INTERVAL: Tick = 160;

/// Keeps an effect running while the health fraction is below a threshold
///
/// Conditions map health fractions to effect levels. The lowest threshold
/// above the current fraction wins; level 0 means no effect.
pub struct ConstantDebuff {
    effect: EffectId,
    conditions: BTreeMap<OrderedFloat<f32>, u32>,
    enabled: EnabledFn,
    active_level: u32,
    ticks: Tick,
}

impl ConstantDebuff {
    pub fn new(
        effect: EffectId,
        conditions: BTreeMap<OrderedFloat<f32>, u32>,
        enabled: EnabledFn,
    ) -> Self {
        Self {
            effect,
            conditions,
            enabled,
            active_level: 0,
            ticks: 0,
        }
    }

    pub fn active_level(&self) -> u32 {
        self.active_level
    }

    fn level_for(&self, health_per_max: f32) -> u32 {
        self.conditions
            .iter()
            .find(|(threshold, _)| health_per_max < threshold.0)
            .map(|(_, level)| *level)
            .unwrap_or(0)
    }

    fn sync_level(&mut self, health_per_max: f32) {
        let level = self.level_for(health_per_max);
        if level != self.active_level {
            self.active_level = level;
            self.ticks = 0;
        }
    }
}

impl Debuff for ConstantDebuff {
    fn effect(&self) -> &EffectId {
        &self.effect
    }

    fn handle_damage_taken(
        &mut self,
        _damage: f32,
        health_per_max: f32,
        _player: &mut dyn PlayerHost,
    ) {
        if self.is_enabled() {
            self.sync_level(health_per_max);
        }
    }

    fn handle_healing(
        &mut self,
        _healing_done: f32,
        health_per_max: f32,
        _player: &mut dyn PlayerHost,
    ) {
        if self.is_enabled() {
            self.sync_level(health_per_max);
        }
    }

    fn is_enabled(&self) -> bool {
        (self.enabled)()
    }

    fn update(&mut self, player: &mut dyn PlayerHost, health_per_max: f32) {
        if !self.is_enabled() {
            return;
        }
        self.sync_level(health_per_max);
        if self.active_level == 0 {
            self.ticks = 0;
            return;
        }
        if self.ticks == 0 {
            let amplifier = u8::try_from(self.active_level - 1).unwrap_or(u8::MAX);
            player.apply_effect(&self.effect, EFFECT_DURATION, amplifier);
            self.ticks = REFRESH_INTERVAL;
        } else {
            self.ticks -= 1;
        }
    }
}
