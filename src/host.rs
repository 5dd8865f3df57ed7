//! The host game's player, as seen by the damage model
//!
//! The damage model never owns the player entity. Everything it needs from
//! the game (equipment, vanilla health, effects, client messages, death) goes
//! through [`PlayerHost`].

use ahash::AHashMap;

use crate::body::part::EquipmentSlot;
use crate::core::types::{EffectId, EntityId, Tick};
use crate::damage::armor::ArmorPiece;
use crate::damage::source::DamageSource;
use crate::network::DamageNotice;

/// Entity collaborator provided by the host game
pub trait PlayerHost {
    fn id(&self) -> EntityId;

    /// Vanilla health bar value
    fn health(&self) -> f32;

    fn max_health(&self) -> f32;

    fn set_health(&mut self, health: f32);

    fn is_alive(&self) -> bool {
        self.health() > 0.0
    }

    /// Armor worn in a slot
    fn equipped(&self, slot: EquipmentSlot) -> Option<&ArmorPiece>;

    /// Amplifier of an active resistance effect
    fn resistance_amplifier(&self) -> Option<u8> {
        None
    }

    /// Hunger cost of taking damage
    fn add_exhaustion(&mut self, amount: f32);

    /// Record damage for death messages (pre-damage health)
    fn track_damage(&mut self, _source: &DamageSource, _health: f32, _damage: f32) {}

    /// Add to the "damage taken" statistic
    fn add_damage_stat(&mut self, _amount: i32) {}

    /// Forward a per-part damage notice to the owning client
    fn send_damage_notice(&mut self, _notice: &DamageNotice) {}

    fn apply_effect(&mut self, _effect: &EffectId, _duration: Tick, _amplifier: u8) {}

    /// Remaining duration of an active effect
    fn active_effect_duration(&self, _effect: &EffectId) -> Option<Tick> {
        None
    }

    fn play_sound(&mut self, _sound: &str) {}

    /// Let the game's own death protection (totems) save the player.
    /// Returns true if the death was prevented.
    fn try_totem(&mut self, _source: &DamageSource) -> bool {
        false
    }

    /// Revival collaborator, if one applies to this player right now
    fn revival(&mut self) -> Option<&mut dyn Revival> {
        None
    }

    /// Kill the player outright
    fn kill(&mut self, source: Option<&DamageSource>);
}

/// External revive mechanic that replaces death with bleeding out
pub trait Revival {
    fn start_bleeding(&mut self);

    fn is_bleeding(&self) -> bool;
}

/// Revival state for [`SimplePlayer`]
#[derive(Debug, Clone, Default)]
pub struct SimpleRevival {
    bleeding: bool,
}

impl Revival for SimpleRevival {
    fn start_bleeding(&mut self) {
        self.bleeding = true;
    }

    fn is_bleeding(&self) -> bool {
        self.bleeding
    }
}

/// In-memory player for headless simulation and tests
#[derive(Debug, Clone)]
pub struct SimplePlayer {
    pub id: EntityId,
    pub health: f32,
    pub max_health: f32,
    pub armor: AHashMap<EquipmentSlot, ArmorPiece>,
    pub resistance: Option<u8>,
    pub exhaustion: f32,
    pub damage_stat: i32,
    pub notices: Vec<DamageNotice>,
    pub effects: AHashMap<EffectId, (Tick, u8)>,
    pub sounds: Vec<String>,
    pub combat_log: Vec<(String, f32, f32)>,
    /// Death protections left
    pub totems: u32,
    pub revival: Option<SimpleRevival>,
    pub kills: u32,
}

impl SimplePlayer {
    pub fn new() -> Self {
        Self {
            id: EntityId::new(),
            health: 20.0,
            max_health: 20.0,
            armor: AHashMap::new(),
            resistance: None,
            exhaustion: 0.0,
            damage_stat: 0,
            notices: Vec::new(),
            effects: AHashMap::new(),
            sounds: Vec::new(),
            combat_log: Vec::new(),
            totems: 0,
            revival: None,
            kills: 0,
        }
    }

    /// Equip armor in a slot
    pub fn with_armor(mut self, slot: EquipmentSlot, piece: ArmorPiece) -> Self {
        self.armor.insert(slot, piece);
        self
    }

    /// Attach a revival collaborator
    pub fn with_revival(mut self) -> Self {
        self.revival = Some(SimpleRevival::default());
        self
    }

    pub fn is_bleeding(&self) -> bool {
        self.revival.as_ref().is_some_and(|r| r.is_bleeding())
    }
}

impl Default for SimplePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerHost for SimplePlayer {
    fn id(&self) -> EntityId {
        self.id
    }

    fn health(&self) -> f32 {
        self.health
    }

    fn max_health(&self) -> f32 {
        self.max_health
    }

    fn set_health(&mut self, health: f32) {
        self.health = health.clamp(0.0, self.max_health);
    }

    fn equipped(&self, slot: EquipmentSlot) -> Option<&ArmorPiece> {
        self.armor.get(&slot)
    }

    fn resistance_amplifier(&self) -> Option<u8> {
        self.resistance
    }

    fn add_exhaustion(&mut self, amount: f32) {
        self.exhaustion += amount;
    }

    fn track_damage(&mut self, source: &DamageSource, health: f32, damage: f32) {
        self.combat_log.push((source.kind.clone(), health, damage));
    }

    fn add_damage_stat(&mut self, amount: i32) {
        self.damage_stat += amount;
    }

    fn send_damage_notice(&mut self, notice: &DamageNotice) {
        self.notices.push(notice.clone());
    }

    fn apply_effect(&mut self, effect: &EffectId, duration: Tick, amplifier: u8) {
        self.effects.insert(effect.clone(), (duration, amplifier));
    }

    fn active_effect_duration(&self, effect: &EffectId) -> Option<Tick> {
        self.effects.get(effect).map(|(duration, _)| *duration)
    }

    fn play_sound(&mut self, sound: &str) {
        self.sounds.push(sound.to_string());
    }

    fn try_totem(&mut self, _source: &DamageSource) -> bool {
        if self.totems > 0 {
            self.totems -= 1;
            self.health = 1.0;
            true
        } else {
            false
        }
    }

    fn revival(&mut self) -> Option<&mut dyn Revival> {
        self.revival.as_mut().map(|r| r as &mut dyn Revival)
    }

    fn kill(&mut self, _source: Option<&DamageSource>) {
        self.health = 0.0;
        self.kills += 1;
    }
}
