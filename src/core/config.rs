//! Damage model configuration with documented defaults
//!
//! Every tunable number of the damage model lives here. Values can be
//! overridden from a TOML file; missing keys fall back to the defaults.

use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::body::part::{EquipmentSlot, PlayerPart};
use crate::core::error::{Result, TriageError};
use crate::core::types::Tick;

/// When is a player dead?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeathRule {
    /// One death-capable part at zero health kills
    Any,
    /// Every death-capable part must be at zero health
    All,
}

/// Configuration for the damage model
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    /// Log every damage call and the registry readout on close
    pub debug: bool,

    /// Max health and lethality per part
    pub parts: PartConfig,

    /// Armor scaling per equipment slot
    pub armor: ArmorConfig,

    /// Lowest health a death-capable part can be brought to by a no-kill
    /// distribution.
    pub no_kill_floor: f32,

    /// Multiplier for the host's "damage taken" statistic.
    ///
    /// The host counts in tenths of a heart, so 10.0 matches its own
    /// bookkeeping.
    pub damage_stat_scale: f32,

    /// Which death-capable parts must be empty before the player dies
    pub death_rule: DeathRule,

    /// Allow the host's own death protection (totems) to cancel a kill
    pub allow_other_healing_items: bool,

    /// Duration of a morphine shot when none is given explicitly
    pub morphine_ticks: Tick,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            debug: false,
            parts: PartConfig::default(),
            armor: ArmorConfig::default(),
            no_kill_floor: 1.0,
            damage_stat_scale: 10.0,
            death_rule: DeathRule::All,
            allow_other_healing_items: true,
            morphine_ticks: 20 * 30,
        }
    }
}

impl DamageConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DamageConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        for part in PlayerPart::ALL {
            let max = self.parts.max_health(part);
            if max <= 0.0 {
                return Err(TriageError::InvalidConfig(format!(
                    "max health of {} must be positive, got {}",
                    part, max
                )));
            }
            if self.parts.can_cause_death(part) && self.no_kill_floor > max {
                return Err(TriageError::InvalidConfig(format!(
                    "no_kill_floor ({}) exceeds max health of {} ({})",
                    self.no_kill_floor, part, max
                )));
            }
        }

        if self.no_kill_floor < 0.0 {
            return Err(TriageError::InvalidConfig(
                "no_kill_floor must not be negative".into(),
            ));
        }

        if self.damage_stat_scale < 0.0 || self.armor.enchantment_multiplier < 0.0 {
            return Err(TriageError::InvalidConfig(
                "Multipliers must not be negative".into(),
            ));
        }

        for slot in EquipmentSlot::ARMOR_SLOTS {
            let armor = self.armor.slot(slot);
            if armor.multiplier < 0.0 || armor.toughness_multiplier < 0.0 {
                return Err(TriageError::InvalidConfig(format!(
                    "armor multipliers of slot {:?} must not be negative",
                    slot
                )));
            }
        }

        Ok(())
    }
}

/// Max health and lethality per body part
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PartConfig {
    pub max_health_head: f32,
    pub max_health_arm: f32,
    pub max_health_body: f32,
    pub max_health_leg: f32,
    pub max_health_foot: f32,
    pub cause_death_head: bool,
    pub cause_death_body: bool,
}

impl Default for PartConfig {
    fn default() -> Self {
        Self {
            max_health_head: 4.0,
            max_health_arm: 4.0,
            max_health_body: 6.0,
            max_health_leg: 4.0,
            max_health_foot: 4.0,
            cause_death_head: true,
            cause_death_body: true,
        }
    }
}

impl PartConfig {
    pub fn max_health(&self, part: PlayerPart) -> f32 {
        use PlayerPart::*;
        match part {
            Head => self.max_health_head,
            LeftArm | RightArm => self.max_health_arm,
            Body => self.max_health_body,
            LeftLeg | RightLeg => self.max_health_leg,
            LeftFoot | RightFoot => self.max_health_foot,
        }
    }

    pub fn can_cause_death(&self, part: PlayerPart) -> bool {
        match part {
            PlayerPart::Head => self.cause_death_head,
            PlayerPart::Body => self.cause_death_body,
            _ => false,
        }
    }
}

/// How armor in one slot is scaled before the armor curve is applied
///
/// A single piece only covers part of the body, so its raw value is
/// multiplied up to what a full set would give.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SlotArmor {
    pub multiplier: f32,
    pub offset: f32,
    pub toughness_multiplier: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArmorConfig {
    pub head: SlotArmor,
    pub chest: SlotArmor,
    pub legs: SlotArmor,
    pub feet: SlotArmor,
    /// Scale of the enchantment protection factor of a single piece
    pub enchantment_multiplier: f32,
}

impl Default for ArmorConfig {
    fn default() -> Self {
        Self {
            head: SlotArmor {
                multiplier: 6.0,
                offset: 1.0,
                toughness_multiplier: 6.0,
            },
            chest: SlotArmor {
                multiplier: 2.5,
                offset: 0.0,
                toughness_multiplier: 2.5,
            },
            legs: SlotArmor {
                multiplier: 3.0,
                offset: 0.0,
                toughness_multiplier: 3.0,
            },
            feet: SlotArmor {
                multiplier: 6.0,
                offset: 0.0,
                toughness_multiplier: 6.0,
            },
            enchantment_multiplier: 4.0,
        }
    }
}

impl ArmorConfig {
    pub fn slot(&self, slot: EquipmentSlot) -> &SlotArmor {
        match slot {
            EquipmentSlot::Head => &self.head,
            EquipmentSlot::Chest => &self.chest,
            EquipmentSlot::Legs => &self.legs,
            EquipmentSlot::Feet => &self.feet,
        }
    }
}

// === GLOBAL CONFIG ACCESS ===

static CONFIG: OnceLock<DamageConfig> = OnceLock::new();

/// Get the global damage config (initializes with defaults if not set)
pub fn config() -> &'static DamageConfig {
    CONFIG.get_or_init(DamageConfig::default)
}

/// Set the global damage config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: DamageConfig) -> std::result::Result<(), DamageConfig> {
    CONFIG.set(config)
}
