//! Debuff shared by several parts (both arms, legs and feet)

use crate::body::part::DebuffSlot;
use crate::core::types::EffectId;
use crate::debuff::Debuff;
use crate::host::PlayerHost;

/// Collects damage and healing from every part of a slot and forwards the
/// averages once per update, using the slot-wide health fraction.
pub struct SharedDebuff {
    inner: Box<dyn Debuff>,
    slot: DebuffSlot,
    damage: f32,
    damage_count: u32,
    healing: f32,
    healing_count: u32,
}

impl SharedDebuff {
    pub fn new(inner: Box<dyn Debuff>, slot: DebuffSlot) -> Self {
        Self {
            inner,
            slot,
            damage: 0.0,
            damage_count: 0,
            healing: 0.0,
            healing_count: 0,
        }
    }

    pub fn slot(&self) -> DebuffSlot {
        self.slot
    }
}

impl Debuff for SharedDebuff {
    fn effect(&self) -> &EffectId {
        self.inner.effect()
    }

    fn handle_damage_taken(
        &mut self,
        damage: f32,
        _health_per_max: f32,
        _player: &mut dyn PlayerHost,
    ) {
        if !self.is_enabled() {
            return;
        }
        self.damage += damage;
        self.damage_count += 1;
    }

    fn handle_healing(
        &mut self,
        healing_done: f32,
        _health_per_max: f32,
        _player: &mut dyn PlayerHost,
    ) {
        if !self.is_enabled() {
            return;
        }
        self.healing += healing_done;
        self.healing_count += 1;
    }

    fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }

    fn update(&mut self, player: &mut dyn PlayerHost, health_per_max: f32) {
        if !self.is_enabled() {
            return;
        }
        if self.damage_count > 0 {
            let damage = self.damage / self.damage_count as f32;
            self.inner.handle_damage_taken(damage, health_per_max, player);
            self.damage = 0.0;
            self.damage_count = 0;
        }
        if self.healing_count > 0 {
            let healing = self.healing / self.healing_count as f32;
            self.inner.handle_healing(healing, health_per_max, player);
            self.healing = 0.0;
            self.healing_count = 0;
        }
        self.inner.update(player, health_per_max);
    }
}
