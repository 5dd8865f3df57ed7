//! Armor, enchantment and resistance mitigation
//!
//! A single armor piece only covers the parts of its slot, so its values
//! are scaled up per slot before the usual armor curve is applied.

use serde::{Deserialize, Serialize};

use crate::body::part::EquipmentSlot;
use crate::core::config::ArmorConfig;
use crate::damage::source::DamageSource;

/// Armor values above this stop helping
pub const MAX_ARMOR: f32 = 20.0;

/// Protection enchantments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Enchantment {
    Protection,
    FireProtection,
    BlastProtection,
    ProjectileProtection,
    FeatherFalling,
}

impl Enchantment {
    /// Enchantment protection factor against a source
    pub fn protection_factor(self, level: u8, source: &DamageSource) -> u32 {
        if source.is_absolute {
            return 0;
        }
        let level = u32::from(level);
        match self {
            Enchantment::Protection => level,
            Enchantment::FireProtection if source.is_fire => level * 2,
            Enchantment::BlastProtection if source.is_explosion => level * 2,
            Enchantment::ProjectileProtection if source.is_projectile => level * 2,
            Enchantment::FeatherFalling if source.is_fall => level * 3,
            _ => 0,
        }
    }
}

/// Stock armor materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorMaterial {
    Leather,
    Iron,
    Diamond,
}

/// One worn armor item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorPiece {
    pub armor: f32,
    pub toughness: f32,
    #[serde(default)]
    pub enchantments: Vec<(Enchantment, u8)>,
}

impl ArmorPiece {
    pub fn new(armor: f32, toughness: f32) -> Self {
        Self {
            armor,
            toughness,
            enchantments: Vec::new(),
        }
    }

    /// Stock piece of a material for a slot
    pub fn of(material: ArmorMaterial, slot: EquipmentSlot) -> Self {
        use ArmorMaterial::*;
        use EquipmentSlot::*;
        let (armor, toughness) = match (material, slot) {
            (Leather, Head) => (1.0, 0.0),
            (Leather, Chest) => (3.0, 0.0),
            (Leather, Legs) => (2.0, 0.0),
            (Leather, Feet) => (1.0, 0.0),
            (Iron, Head) => (2.0, 0.0),
            (Iron, Chest) => (6.0, 0.0),
            (Iron, Legs) => (5.0, 0.0),
            (Iron, Feet) => (2.0, 0.0),
            (Diamond, Head) => (3.0, 2.0),
            (Diamond, Chest) => (8.0, 2.0),
            (Diamond, Legs) => (6.0, 2.0),
            (Diamond, Feet) => (3.0, 2.0),
        };
        Self::new(armor, toughness)
    }

    pub fn with_enchantment(mut self, enchantment: Enchantment, level: u8) -> Self {
        self.enchantments.push((enchantment, level));
        self
    }

    pub fn protection_factor(&self, source: &DamageSource) -> u32 {
        self.enchantments
            .iter()
            .map(|(enchantment, level)| enchantment.protection_factor(*level, source))
            .sum()
    }
}

/// Standard armor curve: toughness keeps armor effective against big hits
pub fn damage_after_absorb(damage: f32, armor: f32, toughness: f32) -> f32 {
    let toughness_factor = 2.0 + toughness / 4.0;
    let effective = (armor - damage / toughness_factor)
        .max(armor * 0.2)
        .clamp(0.0, MAX_ARMOR);
    damage * (1.0 - effective / 25.0)
}

/// Enchantment protection curve
pub fn damage_after_magic_absorb(damage: f32, protection: f32) -> f32 {
    let protection = protection.clamp(0.0, MAX_ARMOR);
    damage * (1.0 - protection / 25.0)
}

/// Reduce damage by the armor worn in `slot`
pub fn apply_armor(
    piece: Option<&ArmorPiece>,
    slot: EquipmentSlot,
    source: &DamageSource,
    damage: f32,
    config: &ArmorConfig,
) -> f32 {
    let Some(piece) = piece else {
        return damage;
    };
    if source.bypasses_armor {
        return damage;
    }
    let scaling = config.slot(slot);
    let armor = if piece.armor <= 0.0 {
        0.0
    } else {
        piece.armor * scaling.multiplier + scaling.offset
    };
    let toughness = if piece.toughness <= 0.0 {
        0.0
    } else {
        piece.toughness * scaling.toughness_multiplier
    };
    damage_after_absorb(damage, armor, toughness)
}

/// Reduce damage by the protection enchantments of one piece
pub fn apply_enchantment_modifiers(
    piece: Option<&ArmorPiece>,
    source: &DamageSource,
    damage: f32,
    config: &ArmorConfig,
) -> f32 {
    let Some(piece) = piece else {
        return damage;
    };
    let protection = piece.protection_factor(source);
    if protection == 0 {
        return damage;
    }
    damage_after_magic_absorb(damage, protection as f32 * config.enchantment_multiplier)
}

/// Apply the resistance effect to the raw incoming damage
pub fn apply_global_potion_modifiers(
    resistance: Option<u8>,
    source: &DamageSource,
    damage: f32,
) -> f32 {
    if source.is_absolute {
        return damage;
    }
    match resistance {
        Some(amplifier) => {
            let reduction = (f32::from(amplifier) + 1.0) * 5.0;
            (damage * (25.0 - reduction) / 25.0).max(0.0)
        }
        None => damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_armor_curve() {
        assert!(close(damage_after_absorb(10.0, 20.0, 8.0), 3.0));
        assert_eq!(damage_after_absorb(10.0, 0.0, 0.0), 10.0);
    }

    #[test]
    fn test_more_armor_means_less_damage() {
        let light = damage_after_absorb(6.0, 5.0, 0.0);
        let heavy = damage_after_absorb(6.0, 15.0, 0.0);
        assert!(heavy < light);
        assert!(light < 6.0);
    }

    #[test]
    fn test_slot_scaling() {
        let chest = ArmorPiece::of(ArmorMaterial::Diamond, EquipmentSlot::Chest);
        let source = DamageSource::mob();
        let reduced = apply_armor(
            Some(&chest),
            EquipmentSlot::Chest,
            &source,
            10.0,
            &ArmorConfig::default(),
        );
        // 8 * 2.5 armor, 2 * 2.5 toughness
        assert!(close(reduced, damage_after_absorb(10.0, 20.0, 5.0)));
    }

    #[test]
    fn test_no_piece_or_bypass_is_unchanged() {
        let config = ArmorConfig::default();
        let source = DamageSource::mob();
        assert_eq!(apply_armor(None, EquipmentSlot::Head, &source, 5.0, &config), 5.0);

        let helmet = ArmorPiece::of(ArmorMaterial::Iron, EquipmentSlot::Head);
        let fall = DamageSource::fall();
        assert_eq!(apply_armor(Some(&helmet), EquipmentSlot::Head, &fall, 5.0, &config), 5.0);
    }

    #[test]
    fn test_protection_enchantment() {
        let piece = ArmorPiece::new(0.0, 0.0).with_enchantment(Enchantment::Protection, 4);
        let reduced = apply_enchantment_modifiers(
            Some(&piece),
            &DamageSource::mob(),
            10.0,
            &ArmorConfig::default(),
        );
        assert!(close(reduced, 3.6));
    }

    #[test]
    fn test_specialised_protection_only_matches_its_source() {
        let boots = ArmorPiece::new(0.0, 0.0).with_enchantment(Enchantment::FeatherFalling, 2);
        assert_eq!(boots.protection_factor(&DamageSource::fall()), 6);
        assert_eq!(boots.protection_factor(&DamageSource::mob()), 0);
        assert_eq!(boots.protection_factor(&DamageSource::starve()), 0);
    }

    #[test]
    fn test_resistance() {
        let source = DamageSource::mob();
        assert_eq!(apply_global_potion_modifiers(None, &source, 10.0), 10.0);
        assert!(close(apply_global_potion_modifiers(Some(0), &source, 10.0), 8.0));
        assert_eq!(apply_global_potion_modifiers(Some(4), &source, 10.0), 0.0);
        assert_eq!(apply_global_potion_modifiers(Some(4), &DamageSource::starve(), 10.0), 10.0);
    }
}
